use std::collections::{BTreeMap, BTreeSet};

use super::{ArtistId, SongId, StreamingPlatformKind, Week};

/// Per-platform stream counts for one song.
pub type PlatformDistribution = BTreeMap<StreamingPlatformKind, u64>;

/// Ordinal quality class of a recording.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SongTier {
    Demo,
    Mixtape,
    Solid,
    Hit,
    Classic,
}

impl SongTier {
    /// Weekly streams a fresh release of this tier draws before modifiers.
    pub const fn base_weekly_streams(self) -> u64 {
        match self {
            Self::Demo => 500,
            Self::Mixtape => 2_000,
            Self::Solid => 8_000,
            Self::Hit => 25_000,
            Self::Classic => 60_000,
        }
    }

    /// Maps a recording score (creativity + roll + feature bonus) to a tier.
    pub const fn from_score(score: u32) -> Self {
        match score {
            0..30 => Self::Demo,
            30..55 => Self::Mixtape,
            55..75 => Self::Solid,
            75..90 => Self::Hit,
            _ => Self::Classic,
        }
    }
}

/// Weekly performance classification of a released song.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PerformanceType {
    #[default]
    Normal,
    Viral,
    Flop,
    Comeback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub tier: SongTier,
    /// Cumulative streams across all platforms.
    pub streams: u64,
    /// `None` while the song is recorded but unreleased.
    pub release_date: Option<Week>,
    pub featuring: Vec<ArtistId>,
    pub performance: PerformanceType,
    /// Week the performance classification last changed.
    pub performance_status_week: Week,
    pub release_platforms: BTreeSet<StreamingPlatformKind>,
    /// Generated lazily; once present its values sum to `streams`.
    pub platform_stream_distribution: Option<PlatformDistribution>,
    /// Streams gained in the most recently committed week.
    pub last_week_streams: u64,
    pub active: bool,
}

impl Song {
    /// A freshly recorded, unreleased song.
    pub fn recorded(
        id: SongId,
        title: impl Into<String>,
        tier: SongTier,
        featuring: Vec<ArtistId>,
        week: Week,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            tier,
            streams: 0,
            release_date: None,
            featuring,
            performance: PerformanceType::Normal,
            performance_status_week: week,
            release_platforms: BTreeSet::new(),
            platform_stream_distribution: None,
            last_week_streams: 0,
            active: true,
        }
    }

    pub fn is_released(&self) -> bool {
        self.release_date.is_some()
    }

    /// Released, active songs accrue streams every week.
    pub fn is_streaming(&self) -> bool {
        self.active && self.is_released()
    }

    pub fn weeks_since_release(&self, week: Week) -> u32 {
        self.release_date.map(|date| week.since(date)).unwrap_or(0)
    }

    pub fn weeks_in_status(&self, week: Week) -> u32 {
        week.since(self.performance_status_week)
    }

    /// Platforms the song streams on; an empty release set means everywhere.
    pub fn effective_platforms(&self) -> BTreeSet<StreamingPlatformKind> {
        if self.release_platforms.is_empty() {
            StreamingPlatformKind::ALL.iter().copied().collect()
        } else {
            self.release_platforms.clone()
        }
    }

    /// Key the distribution generator seeds from.
    pub fn distribution_key(&self) -> String {
        format!("{}:{}", self.id.0, self.title)
    }

    /// True when a distribution exists and sums to `streams`.
    pub fn has_consistent_distribution(&self) -> bool {
        self.platform_stream_distribution
            .as_ref()
            .is_some_and(|map| {
                map.values()
                    .try_fold(0u64, |acc, streams| acc.checked_add(*streams))
                    == Some(self.streams)
            })
    }
}
