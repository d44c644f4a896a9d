//! Application error types

use clearsight_domain::DomainError;
use thiserror::Error;

use crate::ports::{HighScoreError, SettingsStoreError, TabError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain rule was violated.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A settings or high-score storage operation failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A tab could not be reached.
    #[error("tab error: {0}")]
    Tab(String),
}

impl From<SettingsStoreError> for ApplicationError {
    fn from(error: SettingsStoreError) -> Self {
        Self::Storage(error.to_string())
    }
}

impl From<HighScoreError> for ApplicationError {
    fn from(error: HighScoreError) -> Self {
        Self::Storage(error.to_string())
    }
}

impl From<TabError> for ApplicationError {
    fn from(error: TabError) -> Self {
        Self::Tab(error.to_string())
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
