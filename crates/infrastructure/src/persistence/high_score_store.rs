//! High-score persistence.
//!
//! Stores one best per exercise in `high_scores.json`, keyed by exercise id.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clearsight_application::ports::{FileSystem, FileSystemError, HighScoreError, HighScoreStore};
use clearsight_domain::HighScoreRecord;
use tokio::sync::Mutex;
use tracing::debug;

use super::TokioFileSystem;
use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// File name of the high-score table.
pub const HIGH_SCORES_FILE: &str = "high_scores.json";

type ScoreTable = BTreeMap<String, HighScoreRecord>;

/// JSON-file implementation of [`HighScoreStore`].
///
/// Writes are serialized so that concurrent `put`s for different exercises
/// do not overwrite each other.
#[derive(Debug)]
pub struct FileHighScoreStore<F = TokioFileSystem> {
    fs: F,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileHighScoreStore {
    /// Creates a store for `high_scores.json` under `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self::with_file_system(TokioFileSystem::new(), data_dir)
    }
}

impl<F: FileSystem> FileHighScoreStore<F> {
    /// Creates a store over a custom file system.
    #[must_use]
    pub fn with_file_system(fs: F, data_dir: &Path) -> Self {
        Self {
            fs,
            path: data_dir.join(HIGH_SCORES_FILE),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the path where scores are stored.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_table(&self) -> Result<ScoreTable, HighScoreError> {
        match self.fs.read_file(&self.path).await {
            Ok(bytes) => {
                from_json_bytes(&bytes).map_err(|e| HighScoreError::Serialization(e.to_string()))
            }
            Err(FileSystemError::NotFound(_)) => {
                debug!(path = %self.path.display(), "no high scores yet");
                Ok(ScoreTable::new())
            }
            Err(e) => Err(HighScoreError::Unavailable(e.to_string())),
        }
    }
}

impl<F: FileSystem> HighScoreStore for FileHighScoreStore<F> {
    async fn get(&self, exercise_id: &str) -> Result<Option<HighScoreRecord>, HighScoreError> {
        Ok(self.read_table().await?.remove(exercise_id))
    }

    async fn put(&self, exercise_id: &str, record: HighScoreRecord) -> Result<(), HighScoreError> {
        let _guard = self.write_lock.lock().await;
        let mut table = self.read_table().await?;
        table.insert(exercise_id.to_string(), record);

        let content =
            to_json_stable_bytes(&table).map_err(|e| HighScoreError::Serialization(e.to_string()))?;
        self.fs
            .write_file(&self.path, &content)
            .await
            .map_err(|e| HighScoreError::Unavailable(e.to_string()))
    }

    async fn all(&self) -> Result<ScoreTable, HighScoreError> {
        self.read_table().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn record(score: u64) -> HighScoreRecord {
        HighScoreRecord {
            score,
            achieved_at: Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_empty_store_has_no_scores() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileHighScoreStore::new(dir.path());

        assert_eq!(store.get("color-match").await.expect("read"), None);
        assert!(store.all().await.expect("read").is_empty());
    }

    #[tokio::test]
    async fn test_put_keeps_other_exercises() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileHighScoreStore::new(dir.path());

        store.put("saccade-jump", record(450)).await.expect("saved");
        store.put("color-match", record(1_210)).await.expect("saved");
        store.put("saccade-jump", record(600)).await.expect("saved");

        let all = store.all().await.expect("read");
        assert_eq!(
            all.keys().map(String::as_str).collect::<Vec<_>>(),
            ["color-match", "saccade-jump"]
        );
        assert_eq!(store.get("saccade-jump").await.expect("read"), Some(record(600)));
    }

    #[tokio::test]
    async fn test_timestamps_are_rfc3339() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileHighScoreStore::new(dir.path());

        store.put("focus-tracker", record(300)).await.expect("saved");

        let raw = std::fs::read_to_string(store.path()).expect("file written");
        assert!(raw.contains("\"achieved_at\": \"2026-05-04T09:30:00Z\""));
    }
}
