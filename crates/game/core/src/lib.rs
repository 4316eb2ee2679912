//! Deterministic rapper career simulation.
//!
//! `rapsim-core` defines the canonical rules (weekly streaming growth, song
//! classification, platform distributions, random events, charts) and exposes
//! pure APIs shared by the runtime and offline tools. All state mutation flows
//! through [`engine::GameEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod charts;
pub mod command;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod state;
pub mod streaming;

pub use charts::{ChartEntry, ChartStanding, global_chart, global_standing, top_songs};
pub use command::{
    BeginWeek, Command, CommandOutcome, CommandTransition, CommitWeek, DeactivateSong,
    PostOnSocialMedia, RecordSong, ReleaseAlbum, ReleaseSong, ResolveEvent, WeekReport,
};
pub use config::{ClassificationConfig, EventConfig, GameConfig, GrowthConfig};
pub use engine::{
    AlbumRuleViolation, EngineError, GameEngine, StateReducer, TransitionPhase, simulate_week,
};
pub use env::{GameEnv, PcgRng, RngOracle, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use events::{DrawBranch, EventSelector, default_pool, is_eligible};
pub use state::{
    ActiveEvent, AiRapper, Album, AlbumId, AlbumKind, ArtistId, Certification, CharacterStats,
    Effect, EventKind, EventOption, EventTemplate, GameState, InitializationError, MediaKind,
    PerformanceType, PlatformDistribution, PostId, RelationshipStatus, SocialMediaPlatform,
    SocialPlatformKind, SocialPost, Song, SongId, SongTier, StagedWeek, StatKind, StateError,
    StreamingPlatform, StreamingPlatformKind, Week, WeekPhase, WeeklyStats, WeeklySummary,
};
