//! File-backed stores.
//!
//! Both stores live in the Clearsight data directory and write stable,
//! pretty-printed JSON (see [`crate::serialization`]).

mod file_system;
mod high_score_store;
mod settings_store;

pub use file_system::TokioFileSystem;
pub use high_score_store::{FileHighScoreStore, HIGH_SCORES_FILE};
pub use settings_store::{FileSettingsStore, SETTINGS_FILE};
