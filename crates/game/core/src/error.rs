//! Severity classification shared by rapsim-core errors.
//!
//! Domain errors (`EngineError`, `InitializationError`, `StateError`) live
//! next to the code that raises them. The runtime uses [`GameError`] to pick
//! a log level for a rejected command and to print a stable code to players.
//!
//! The simulation functions themselves (growth, distribution, ranking) are
//! infallible and degrade to safe defaults; errors only come out of player
//! commands that violate a precondition.

/// How a caller should treat an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The player can do something else first and retry.
    ///
    /// Examples: unresolved events block the week, not enough wealth to record
    Recoverable,

    /// Invalid input; retrying unchanged fails again.
    ///
    /// Examples: unknown song id, option index out of range
    Validation,

    /// The state or a collaborator is inconsistent.
    Internal,

    /// The session cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// True for errors caused by a bug or a broken collaborator rather than
    /// by the player.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all rapsim errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, e.g. `ENGINE_UNKNOWN_SONG`.
    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;
    use crate::state::{InitializationError, SongId, StateError};

    #[test]
    fn player_mistakes_are_not_internal() {
        let unresolved = EngineError::UnresolvedEvents { count: 1 };
        assert_eq!(unresolved.severity(), ErrorSeverity::Recoverable);
        assert_eq!(unresolved.error_code(), "ENGINE_UNRESOLVED_EVENTS");

        let unknown = EngineError::UnknownSong(SongId(4));
        assert_eq!(unknown.severity(), ErrorSeverity::Validation);
        assert!(!unknown.severity().is_internal());
        assert_eq!(unknown.error_code(), "ENGINE_UNKNOWN_SONG");
    }

    #[test]
    fn broken_state_is_internal() {
        let violation = EngineError::InvariantViolation("distribution drifted");
        assert!(violation.severity().is_internal());
        assert_eq!(violation.error_code(), "ENGINE_INVARIANT_VIOLATION");

        let encoding = StateError::Encoding("eof".into());
        assert_eq!(encoding.severity().as_str(), "internal");
        assert_eq!(encoding.error_code(), "STATE_ENCODING");

        let init = InitializationError::EventWithoutOptions("x".into());
        assert_eq!(init.error_code(), "INIT_EVENT_WITHOUT_OPTIONS");
    }
}
