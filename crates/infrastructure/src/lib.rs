//! Clearsight Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus runtime configuration.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod serialization;

pub use self::config::{CONFIG_FILE, ClearsightConfig, ConfigError, ENV_PREFIX};
pub use adapters::SystemClock;
pub use persistence::{
    FileHighScoreStore, FileSettingsStore, HIGH_SCORES_FILE, SETTINGS_FILE, TokioFileSystem,
};
pub use serialization::{
    SerializationError, from_json, from_json_bytes, to_json_stable, to_json_stable_bytes,
};
