use super::ArtistId;

/// How an AI rapper currently regards the player.
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
pub enum RelationshipStatus {
    #[default]
    Neutral,
    Friendly,
    Collaborator,
    Rival,
    /// Set by beef events; enemies never send feature requests.
    Enemy,
}

/// Competing NPC artist.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiRapper {
    pub id: ArtistId,
    pub name: String,
    pub popularity: u8,
    pub monthly_listeners: u64,
    pub total_streams: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub relationship: RelationshipStatus,
}

impl AiRapper {
    pub fn new(
        id: ArtistId,
        name: impl Into<String>,
        popularity: u8,
        monthly_listeners: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            popularity: popularity.min(100),
            monthly_listeners,
            total_streams: 0,
            relationship: RelationshipStatus::Neutral,
        }
    }

    pub fn with_total_streams(mut self, total_streams: u64) -> Self {
        self.total_streams = total_streams;
        self
    }

    /// Candidates for feature requests and AI-track features.
    pub fn is_approachable(&self) -> bool {
        self.relationship != RelationshipStatus::Enemy
    }
}
