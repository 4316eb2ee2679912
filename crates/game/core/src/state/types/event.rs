use std::collections::BTreeMap;

use super::{ArtistId, RelationshipStatus, SocialPlatformKind, SongTier, StatKind, Week};

/// Narrative flavour of an event, derived from its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    Opportunity,
    Challenge,
    Neutral,
}

impl EventKind {
    const OPPORTUNITY_MARKERS: [&'static str; 6] =
        ["offer", "feature", "collab", "deal", "opportunity", "sponsor"];
    const CHALLENGE_MARKERS: [&'static str; 6] =
        ["beef", "scandal", "leak", "lawsuit", "challenge", "diss"];

    /// Classifies an event id by the markers it contains. Challenge markers
    /// win over opportunity markers.
    pub fn from_id(id: &str) -> Self {
        let id = id.to_ascii_lowercase();
        if Self::CHALLENGE_MARKERS.iter().any(|m| id.contains(m)) {
            Self::Challenge
        } else if Self::OPPORTUNITY_MARKERS.iter().any(|m| id.contains(m)) {
            Self::Opportunity
        } else {
            Self::Neutral
        }
    }
}

/// One state change an event option performs.
///
/// Effects are data so catalogs can be authored in RON; applying them is a
/// pure `GameState -> GameState` transform (see [`crate::events`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Effect {
    /// Signed change to a stat. Percentage stats clamp to `[0, 100]`,
    /// wealth floors at zero, career level is derived and ignored.
    AdjustStat { stat: StatKind, delta: i32 },
    AdjustWealth { delta: i64 },
    /// `None` applies to every social platform.
    AdjustFollowers {
        platform: Option<SocialPlatformKind>,
        delta: i64,
    },
    /// Adds `percent`% of the latest released song's streams to it.
    BoostSongStreams { percent: u32 },
    /// Releases a new song featuring the event subject.
    ReleaseFeatureSong {
        title: String,
        tier: SongTier,
        streams: u64,
    },
    SetRelationship { status: RelationshipStatus },
    AdjustRapperPopularity { delta: i32 },
}

/// A choice offered by an event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventOption {
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

/// Catalog entry from which active events are instantiated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventTemplate {
    pub id: String,
    /// May contain `{rapper}`, replaced by the subject's name.
    pub title: String,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_stats: BTreeMap<StatKind, u32>,
    pub options: Vec<EventOption>,
}

impl EventTemplate {
    pub fn kind(&self) -> EventKind {
        EventKind::from_id(&self.id)
    }
}

/// An event instance waiting for (or already given) a player decision.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEvent {
    /// Instance id; equals the template id except for per-week events.
    pub id: String,
    pub template_id: String,
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    pub week: Week,
    /// AI rapper the event is about, if any.
    pub subject: Option<ArtistId>,
    pub resolved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_id_patterns() {
        assert_eq!(EventKind::from_id("feature_request-w4"), EventKind::Opportunity);
        assert_eq!(EventKind::from_id("label_deal"), EventKind::Opportunity);
        assert_eq!(EventKind::from_id("beef_with_rival"), EventKind::Challenge);
        assert_eq!(EventKind::from_id("leaked_demo"), EventKind::Challenge);
        assert_eq!(EventKind::from_id("studio_flood"), EventKind::Neutral);
        // both markers present: challenge wins
        assert_eq!(EventKind::from_id("collab_beef"), EventKind::Challenge);
    }
}
