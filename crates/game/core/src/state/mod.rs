//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the player's career,
//! the competing AI rappers, random events, and the weekly log. Runtime
//! layers clone or query this state but mutate it exclusively through the
//! engine.
pub mod error;
pub mod types;

use std::collections::BTreeSet;

pub use error::{InitializationError, StateError};
pub use types::{
    ActiveEvent, Aggregates, AiRapper, Album, AlbumId, AlbumKind, ArtistId, Certification,
    CharacterStats, Effect, EventKind, EventOption, EventTemplate, MediaKind, PerformanceType,
    PlatformDistribution, PostId, RelationshipStatus, STAT_MAX, SocialMediaPlatform,
    SocialPlatformKind, SocialPost, Song, SongId, SongTier, StagedWeek, StatKind,
    StreamingPlatform, StreamingPlatformKind, Week, WeekPhase, WeeklyStats, WeeklySummary,
    career_level_for,
};

use crate::config::GameConfig;

/// Canonical snapshot of the deterministic simulation state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified. Combined with the
    /// week or nonce to derive a unique seed for every roll.
    pub game_seed: u64,

    /// Count of successfully applied commands.
    pub nonce: u64,

    /// Current week. Only ever increases.
    pub week: Week,
    pub phase: WeekPhase,

    pub stats: CharacterStats,
    pub songs: Vec<Song>,
    pub albums: Vec<Album>,
    pub streaming: Vec<StreamingPlatform>,
    pub social: Vec<SocialMediaPlatform>,
    pub rappers: Vec<AiRapper>,

    /// Templates available this session. Built once, never mutated.
    pub event_pool: Vec<EventTemplate>,
    pub active_events: Vec<ActiveEvent>,
    /// Instance ids already decided. Never holds duplicates.
    pub resolved_event_ids: Vec<String>,

    /// Append-only per-week log.
    pub weekly_stats: Vec<WeeklyStats>,
    pub posts: Vec<SocialPost>,

    next_song_id: u32,
    next_album_id: u32,
    next_post_id: u32,
}

impl GameState {
    /// Fresh career with default starting stats.
    pub fn new(game_seed: u64) -> Self {
        Self::with_config(game_seed, &GameConfig::default())
    }

    /// Fresh career with starting stats taken from `config`.
    pub fn with_config(game_seed: u64, config: &GameConfig) -> Self {
        Self {
            game_seed,
            nonce: 0,
            week: Week::FIRST,
            phase: WeekPhase::Idle,
            stats: CharacterStats {
                wealth: config.starting_wealth,
                reputation: config.starting_reputation.min(STAT_MAX),
                creativity: config.starting_creativity.min(STAT_MAX),
                marketing: config.starting_marketing.min(STAT_MAX),
                networking: config.starting_networking.min(STAT_MAX),
                fan_loyalty: config.starting_fan_loyalty.min(STAT_MAX),
                career_level: 0,
            },
            songs: Vec::new(),
            albums: Vec::new(),
            streaming: StreamingPlatform::all(),
            social: SocialMediaPlatform::all(),
            rappers: Vec::new(),
            event_pool: Vec::new(),
            active_events: Vec::new(),
            resolved_event_ids: Vec::new(),
            weekly_stats: Vec::new(),
            posts: Vec::new(),
            next_song_id: 1,
            next_album_id: 1,
            next_post_id: 1,
        }
    }

    /// Installs the AI rapper roster.
    ///
    /// Ids must be unique and must not collide with [`ArtistId::PLAYER`].
    pub fn with_rappers(mut self, rappers: Vec<AiRapper>) -> Result<Self, InitializationError> {
        let mut seen = BTreeSet::new();
        for rapper in &rappers {
            if rapper.id.is_player() {
                return Err(InitializationError::ReservedRapperId(rapper.id));
            }
            if !seen.insert(rapper.id) {
                return Err(InitializationError::DuplicateRapperId(rapper.id));
            }
        }
        self.rappers = rappers;
        Ok(self)
    }

    /// Installs the session's event pool.
    pub fn with_event_pool(
        mut self,
        pool: Vec<EventTemplate>,
    ) -> Result<Self, InitializationError> {
        let mut seen = BTreeSet::new();
        for template in &pool {
            if !seen.insert(template.id.as_str()) {
                return Err(InitializationError::DuplicateEventTemplate(
                    template.id.clone(),
                ));
            }
            if template.options.is_empty() {
                return Err(InitializationError::EventWithoutOptions(template.id.clone()));
            }
        }
        self.event_pool = pool;
        Ok(self)
    }

    pub fn total_streams(&self) -> u64 {
        self.songs
            .iter()
            .fold(0u64, |acc, song| acc.saturating_add(song.streams))
    }

    pub fn total_followers(&self) -> u64 {
        self.social
            .iter()
            .fold(0u64, |acc, platform| acc.saturating_add(platform.followers))
    }

    pub fn total_revenue(&self) -> u64 {
        self.streaming
            .iter()
            .fold(0u64, |acc, platform| acc.saturating_add(platform.revenue))
    }

    pub fn aggregates(&self) -> Aggregates {
        Aggregates {
            streams: self.total_streams(),
            followers: self.total_followers(),
            revenue: self.total_revenue(),
        }
    }

    pub fn song(&self, id: SongId) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == id)
    }

    pub fn song_mut(&mut self, id: SongId) -> Option<&mut Song> {
        self.songs.iter_mut().find(|song| song.id == id)
    }

    pub fn album(&self, id: AlbumId) -> Option<&Album> {
        self.albums.iter().find(|album| album.id == id)
    }

    pub fn rapper(&self, id: ArtistId) -> Option<&AiRapper> {
        self.rappers.iter().find(|rapper| rapper.id == id)
    }

    pub fn rapper_mut(&mut self, id: ArtistId) -> Option<&mut AiRapper> {
        self.rappers.iter_mut().find(|rapper| rapper.id == id)
    }

    pub fn social_platform(&self, kind: SocialPlatformKind) -> Option<&SocialMediaPlatform> {
        self.social.iter().find(|platform| platform.kind == kind)
    }

    pub fn event_template(&self, id: &str) -> Option<&EventTemplate> {
        self.event_pool.iter().find(|template| template.id == id)
    }

    pub fn active_event(&self, id: &str) -> Option<&ActiveEvent> {
        self.active_events.iter().find(|event| event.id == id)
    }

    /// Any event the player still has to decide blocks the week.
    pub fn has_unresolved_events(&self) -> bool {
        self.active_events.iter().any(|event| !event.resolved)
    }

    pub fn is_resolved(&self, event_id: &str) -> bool {
        self.resolved_event_ids.iter().any(|id| id == event_id)
    }

    /// Streams of the most recently released active song, if any.
    pub fn latest_release(&self) -> Option<&Song> {
        self.songs
            .iter()
            .filter(|song| song.is_streaming())
            .max_by_key(|song| (song.release_date, song.id))
    }

    pub fn allocate_song_id(&mut self) -> SongId {
        let id = SongId(self.next_song_id);
        self.next_song_id = self.next_song_id.saturating_add(1);
        id
    }

    pub fn allocate_album_id(&mut self) -> AlbumId {
        let id = AlbumId(self.next_album_id);
        self.next_album_id = self.next_album_id.saturating_add(1);
        id
    }

    pub fn allocate_post_id(&mut self) -> PostId {
        let id = PostId(self.next_post_id);
        self.next_post_id = self.next_post_id.saturating_add(1);
        id
    }

    /// SHA-256 over the bincode encoding of the whole state.
    ///
    /// Two sessions that started from the same seed and received the same
    /// commands produce the same digest.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], StateError> {
        use sha2::{Digest, Sha256};

        let bytes =
            bincode::serialize(self).map_err(|e| StateError::Encoding(e.to_string()))?;
        Ok(Sha256::digest(&bytes).into())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}
