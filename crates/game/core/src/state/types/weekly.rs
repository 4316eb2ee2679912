use super::{SongId, Week};

/// Snapshot appended once per committed week. The log is never rewritten.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeeklyStats {
    pub week: Week,
    pub total_streams: u64,
    pub total_followers: u64,
    pub wealth: u64,
    pub revenue: u64,
    pub new_streams_this_week: u64,
}

/// Week-over-week deltas shown to the player before confirming a week.
///
/// Deltas are diffs of pre/post aggregates floored at zero; an aggregate
/// that shrank reports no change rather than a negative number.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeeklySummary {
    /// Week being advanced out of.
    pub week: Week,
    pub new_streams: u64,
    pub new_followers: u64,
    pub revenue: u64,
    pub viral_songs: Vec<SongId>,
    pub flopped_songs: Vec<SongId>,
    pub comeback_songs: Vec<SongId>,
}

impl WeeklySummary {
    /// Builds deltas from before/after aggregates.
    pub fn from_aggregates(week: Week, before: Aggregates, after: Aggregates) -> Self {
        Self {
            week,
            new_streams: after.streams.saturating_sub(before.streams),
            new_followers: after.followers.saturating_sub(before.followers),
            revenue: after.revenue.saturating_sub(before.revenue),
            viral_songs: Vec::new(),
            flopped_songs: Vec::new(),
            comeback_songs: Vec::new(),
        }
    }
}

/// Totals compared when building a [`WeeklySummary`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Aggregates {
    pub streams: u64,
    pub followers: u64,
    /// Lifetime streaming revenue across platforms.
    pub revenue: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrinking_aggregates_report_zero() {
        let before = Aggregates {
            streams: 500,
            followers: 80,
            revenue: 10,
        };
        let after = Aggregates {
            streams: 400,
            followers: 90,
            revenue: 5,
        };
        let summary = WeeklySummary::from_aggregates(Week(3), before, after);
        assert_eq!(summary.new_streams, 0);
        assert_eq!(summary.new_followers, 10);
        assert_eq!(summary.revenue, 0);
    }
}
