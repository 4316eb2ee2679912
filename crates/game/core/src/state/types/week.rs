use super::{Album, AiRapper, SocialMediaPlatform, Song, StreamingPlatform, WeeklySummary};

/// Weekly advancement lifecycle.
///
/// `Idle → Advancing → SummaryReady → Committed → Idle`. `Advancing` and
/// `Committed` are transient: the engine passes through them inside a single
/// call, so a snapshot taken between commands only ever shows `Idle` or
/// `SummaryReady`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeekPhase {
    #[default]
    Idle,
    Advancing,
    /// Deltas computed and staged, waiting for the player to confirm.
    SummaryReady(Box<StagedWeek>),
    Committed,
}

impl WeekPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Advancing => "advancing",
            Self::SummaryReady(_) => "summary_ready",
            Self::Committed => "committed",
        }
    }

    pub fn summary(&self) -> Option<&WeeklySummary> {
        match self {
            Self::SummaryReady(staged) => Some(&staged.summary),
            _ => None,
        }
    }
}

/// Everything the next week will look like, computed but not yet applied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StagedWeek {
    pub summary: WeeklySummary,
    pub songs: Vec<Song>,
    pub albums: Vec<Album>,
    pub streaming: Vec<StreamingPlatform>,
    pub social: Vec<SocialMediaPlatform>,
    pub rappers: Vec<AiRapper>,
    pub wealth: u64,
}
