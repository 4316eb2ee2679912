//! Player commands.
//!
//! Every state change the player can request is a command:
//! - `week`: begin / commit weekly advancement
//! - `studio`: record, release, album, deactivate
//! - `social`: social-media posts
//! - `event`: random-event resolution
//!
//! Commands are plain data so a session can log and replay them. The engine
//! drives each one through the same three-phase transition.
mod event;
mod social;
mod studio;
mod week;

pub use event::ResolveEvent;
pub use social::{PostOnSocialMedia, engagement_likes};
pub use studio::{DeactivateSong, RecordSong, ReleaseAlbum, ReleaseSong};
pub use week::{BeginWeek, CommitWeek, WeekReport};

use crate::engine::EngineError;
use crate::env::GameEnv;
use crate::state::{ActiveEvent, AlbumId, GameState, SocialPost, SongId, WeekPhase, WeeklySummary};

/// Defines how a concrete command mutates game state.
///
/// Implementors override the validation hooks to surface pre- and
/// post-conditions around the mutation. A failing `pre_validate` leaves the
/// state untouched.
pub trait CommandTransition {
    type Output;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
        Ok(())
    }

    /// Applies the command. Implementations may assume `pre_validate` passed.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>)
    -> Result<Self::Output, EngineError>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Serializable command envelope, as logged and replayed by sessions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Command {
    BeginWeek,
    CommitWeek,
    /// Begin immediately followed by commit.
    AdvanceWeek,
    ResolveEvent(ResolveEvent),
    RecordSong(RecordSong),
    ReleaseSong(ReleaseSong),
    ReleaseAlbum(ReleaseAlbum),
    DeactivateSong(DeactivateSong),
    PostOnSocialMedia(PostOnSocialMedia),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeginWeek => "begin_week",
            Self::CommitWeek => "commit_week",
            Self::AdvanceWeek => "advance_week",
            Self::ResolveEvent(_) => "resolve_event",
            Self::RecordSong(_) => "record_song",
            Self::ReleaseSong(_) => "release_song",
            Self::ReleaseAlbum(_) => "release_album",
            Self::DeactivateSong(_) => "deactivate_song",
            Self::PostOnSocialMedia(_) => "post_on_social_media",
        }
    }
}

/// Result of a successfully executed [`Command`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CommandOutcome {
    WeekStaged(WeeklySummary),
    WeekCommitted(WeekReport),
    /// The resolved event and the option the player picked.
    EventResolved { event: ActiveEvent, option: usize },
    SongRecorded(SongId),
    SongReleased(SongId),
    AlbumReleased(AlbumId),
    /// `changed` is false when the song was already inactive.
    SongDeactivated { song: SongId, changed: bool },
    Posted(SocialPost),
}

/// Studio and social commands run only between weeks: a staged week would
/// overwrite their changes on commit.
pub(crate) fn ensure_idle(state: &GameState) -> Result<(), EngineError> {
    match state.phase {
        WeekPhase::Idle => Ok(()),
        ref other => Err(EngineError::phase(WeekPhase::Idle.name(), other.name())),
    }
}
