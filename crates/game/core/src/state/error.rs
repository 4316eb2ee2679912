//! State management errors.
//!
//! Errors raised while assembling an initial state from content or while
//! encoding a state for its digest.

use crate::error::{ErrorSeverity, GameError};
use crate::state::ArtistId;

/// Errors that occur while building a [`crate::GameState`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    #[error("AI rapper id {0} is reserved for the player")]
    ReservedRapperId(ArtistId),

    #[error("AI rapper id {0} appears more than once")]
    DuplicateRapperId(ArtistId),

    #[error("event template '{0}' appears more than once")]
    DuplicateEventTemplate(String),

    #[error("event template '{0}' has no options")]
    EventWithoutOptions(String),
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use InitializationError::*;
        match self {
            ReservedRapperId(_) => "INIT_RESERVED_RAPPER_ID",
            DuplicateRapperId(_) => "INIT_DUPLICATE_RAPPER_ID",
            DuplicateEventTemplate(_) => "INIT_DUPLICATE_EVENT_TEMPLATE",
            EventWithoutOptions(_) => "INIT_EVENT_WITHOUT_OPTIONS",
        }
    }
}

/// Errors raised while encoding state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("failed to encode state: {0}")]
    Encoding(String),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "STATE_ENCODING"
    }
}
