//! Domain error types

use thiserror::Error;

/// Domain-level errors raised by the exercise state machine and lookups.
///
/// Unrecognized vision types, fonts and backgrounds are not errors: they
/// fall back to defaults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No exercise with this identifier exists.
    #[error("unknown exercise: {0}")]
    UnknownExercise(String),

    /// `start` was called while a run was in progress.
    #[error("exercise session already running: {0}")]
    SessionAlreadyRunning(String),

    /// `finish` was called before the session ended.
    #[error("exercise session has not ended: {0}")]
    SessionNotEnded(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
