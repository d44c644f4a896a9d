//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the transform engine and the
//! outside world: the page being edited, client-local storage, the clock
//! and the browser's tabs. Adapters live in the infrastructure crate.

mod clock;
mod document;
mod file_system;
mod high_score_store;
mod settings_store;
mod tab_messenger;

pub use clock::Clock;
pub use document::Document;
pub use file_system::{FileSystem, FileSystemError};
pub use high_score_store::{HighScoreError, HighScoreStore};
pub use settings_store::{SettingsStore, SettingsStoreError};
pub use tab_messenger::{TabError, TabId, TabMessenger};
