//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, the engine, and repositories so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use rapsim_core::{EngineError, ErrorSeverity, GameError, InitializationError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to initialize game state")]
    InitialState(#[source] InitializationError),

    #[error("{command} produced an unexpected outcome")]
    UnexpectedOutcome { command: &'static str },
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Engine(error) => error.severity(),
            Self::Repository(error) => error.severity(),
            Self::InitialState(error) => error.severity(),
            Self::UnexpectedOutcome { .. } => ErrorSeverity::Internal,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) | Self::WorkerJoin(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Engine(error) => error.error_code(),
            Self::Repository(error) => error.error_code(),
            Self::InitialState(error) => error.error_code(),
            Self::UnexpectedOutcome { .. } => "RUNTIME_UNEXPECTED_OUTCOME",
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapsim_core::SongId;

    #[test]
    fn engine_codes_pass_through() {
        let error = RuntimeError::from(EngineError::UnknownSong(SongId(9)));
        assert_eq!(error.error_code(), "ENGINE_UNKNOWN_SONG");
        assert_eq!(error.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn repository_and_channel_failures_are_internal() {
        let offline = RuntimeError::from(RepositoryError::Unavailable("offline".into()));
        assert_eq!(offline.error_code(), "REPOSITORY_UNAVAILABLE");
        assert!(!offline.severity().is_internal());

        let corrupted = RuntimeError::from(RepositoryError::CorruptedData("digest".into()));
        assert!(corrupted.severity().is_internal());

        assert_eq!(
            RuntimeError::CommandChannelClosed.severity(),
            ErrorSeverity::Fatal
        );
    }
}
