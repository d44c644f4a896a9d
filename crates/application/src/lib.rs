//! Clearsight Application - Feature engines, ports and use cases
//!
//! This crate defines the application layer with:
//! - Port traits (the page, storage, clock and browser tabs)
//! - Page features as apply/revert pairs
//! - Use case orchestration for the web app and the extension

pub mod error;
pub mod features;
pub mod ports;
pub mod shell;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use features::{BionicReader, DyslexiaStyler, FilterTarget, ReadingRuler, VisionFilter};
pub use ports::{
    Clock, Document, FileSystem, FileSystemError, HighScoreError, HighScoreStore, SettingsStore,
    SettingsStoreError, TabError, TabId, TabMessenger,
};
pub use shell::AccessibilityShell;
pub use use_cases::{
    BackgroundService, BroadcastReport, ClickResult, ContentScript, ExerciseRunner, SyncReport,
    broadcast,
};
