//! Error types for the command pipeline.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{AlbumKind, ArtistId, SongId};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Album release rules a command violated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AlbumRuleViolation {
    #[error("a {kind} album cannot hold {count} tracks")]
    TrackCount { kind: AlbumKind, count: usize },

    #[error("{0} has not been released")]
    UnreleasedSong(SongId),

    #[error("{0} is listed more than once")]
    DuplicateSong(SongId),
}

/// Errors surfaced while executing a command through the game engine.
///
/// Every variant except [`EngineError::InvariantViolation`] is raised during
/// pre-validation, before the state is touched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("command requires phase '{expected}', current phase is '{actual}'")]
    PhaseMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{count} active event(s) must be resolved before advancing the week")]
    UnresolvedEvents { count: usize },

    #[error("unknown song {0}")]
    UnknownSong(SongId),

    #[error("unknown artist {0}")]
    UnknownArtist(ArtistId),

    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    #[error("event '{event_id}' has no option {index}")]
    InvalidOption { event_id: String, index: usize },

    #[error("event '{0}' was already resolved")]
    AlreadyResolved(String),

    #[error("{0} is already released")]
    AlreadyReleased(SongId),

    #[error("not enough wealth: need {required}, have {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("album rejected: {0}")]
    AlbumValidation(#[from] AlbumRuleViolation),

    #[error("state invariant violated: {0}")]
    InvariantViolation(&'static str),
}

impl EngineError {
    pub(crate) fn phase(expected: &'static str, actual: &'static str) -> Self {
        Self::PhaseMismatch { expected, actual }
    }
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        use EngineError::*;
        match self {
            UnresolvedEvents { .. } | InsufficientFunds { .. } => ErrorSeverity::Recoverable,
            PhaseMismatch { .. }
            | UnknownSong(_)
            | UnknownArtist(_)
            | UnknownEvent(_)
            | InvalidOption { .. }
            | AlreadyResolved(_)
            | AlreadyReleased(_)
            | InvalidInput(_)
            | AlbumValidation(_) => ErrorSeverity::Validation,
            InvariantViolation(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use EngineError::*;
        match self {
            PhaseMismatch { .. } => "ENGINE_PHASE_MISMATCH",
            UnresolvedEvents { .. } => "ENGINE_UNRESOLVED_EVENTS",
            UnknownSong(_) => "ENGINE_UNKNOWN_SONG",
            UnknownArtist(_) => "ENGINE_UNKNOWN_ARTIST",
            UnknownEvent(_) => "ENGINE_UNKNOWN_EVENT",
            InvalidOption { .. } => "ENGINE_INVALID_OPTION",
            AlreadyResolved(_) => "ENGINE_ALREADY_RESOLVED",
            AlreadyReleased(_) => "ENGINE_ALREADY_RELEASED",
            InsufficientFunds { .. } => "ENGINE_INSUFFICIENT_FUNDS",
            InvalidInput(_) => "ENGINE_INVALID_INPUT",
            AlbumValidation(_) => "ENGINE_ALBUM_VALIDATION",
            InvariantViolation(_) => "ENGINE_INVARIANT_VIOLATION",
        }
    }
}
