//! High-score store port.

use std::collections::BTreeMap;

use clearsight_domain::HighScoreRecord;

/// Error type for high-score storage.
#[derive(Debug, thiserror::Error)]
pub enum HighScoreError {
    /// The stored scores could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backing storage failed.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Per-exercise high scores, keyed by exercise id.
pub trait HighScoreStore: Send + Sync {
    /// Returns the stored best for an exercise.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(
        &self,
        exercise_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<HighScoreRecord>, HighScoreError>> + Send;

    /// Stores a new best for an exercise.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn put(
        &self,
        exercise_id: &str,
        record: HighScoreRecord,
    ) -> impl std::future::Future<Output = Result<(), HighScoreError>> + Send;

    /// Returns every stored best, ordered by exercise id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn all(
        &self,
    ) -> impl std::future::Future<
        Output = Result<BTreeMap<String, HighScoreRecord>, HighScoreError>,
    > + Send;
}
