pub mod album;
pub mod common;
pub mod event;
pub mod platform;
pub mod rapper;
pub mod social;
pub mod song;
pub mod stats;
pub mod week;
pub mod weekly;

// Re-export identifiers
pub use common::{AlbumId, ArtistId, PostId, SongId, Week};

// Re-export catalog and release types
pub use album::{Album, AlbumKind, Certification};
pub use song::{PerformanceType, PlatformDistribution, Song, SongTier};

// Re-export platform types
pub use platform::{
    MediaKind, SocialMediaPlatform, SocialPlatformKind, StreamingPlatform, StreamingPlatformKind,
};
pub use social::SocialPost;

// Re-export competitor types
pub use rapper::{AiRapper, RelationshipStatus};

// Re-export event types
pub use event::{ActiveEvent, Effect, EventKind, EventOption, EventTemplate};

// Re-export stats and weekly bookkeeping
pub use stats::{CharacterStats, STAT_MAX, StatKind, career_level_for};
pub use week::{StagedWeek, WeekPhase};
pub use weekly::{Aggregates, WeeklyStats, WeeklySummary};
