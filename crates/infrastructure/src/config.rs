//! Runtime configuration.
//!
//! Layers, lowest precedence first:
//! 1. built-in defaults
//! 2. `clearsight.toml` in the data directory, or an explicit file
//! 3. `CLEARSIGHT_*` environment variables

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clearsight_application::features::DEFAULT_RULER_HEIGHT_PX;
use clearsight_domain::MissPolicy;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "clearsight.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "CLEARSIGHT";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or a value has the wrong type.
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was read but is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for the `clearsight` binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClearsightConfig {
    /// Where settings and high scores are stored.
    pub data_dir: PathBuf,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Height of the reading ruler band.
    pub ruler_height_px: u32,
    /// What a miss does to the exercise combo.
    pub miss_policy: MissPolicy,
}

impl ClearsightConfig {
    /// Returns the platform data directory:
    /// - Linux: ~/.config/clearsight
    /// - macOS: ~/Library/Application Support/clearsight
    /// - Windows: %APPDATA%/clearsight
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clearsight")
    }

    /// Loads the configuration from all layers.
    ///
    /// `file` replaces the default `clearsight.toml` location. A missing
    /// file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value is invalid.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(file, None)
    }

    /// Same as [`load`](Self::load) but reads variables from `env`
    /// instead of the process environment when given.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value is invalid.
    pub fn load_with_env(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let data_dir = Self::default_data_dir();
        let file = file.map_or_else(|| data_dir.join(CONFIG_FILE), Path::to_path_buf);

        let loaded: Self = Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().into_owned())?
            .set_default("log_level", "info")?
            .set_default("ruler_height_px", i64::from(DEFAULT_RULER_HEIGHT_PX))?
            .set_default("miss_policy", "reset_combo")?
            .add_source(
                File::new(&file.to_string_lossy(), FileFormat::Toml).required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.ruler_height_px == 0 {
            return Err(ConfigError::Invalid("ruler_height_px must be positive".into()));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level must not be empty".into()));
        }
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_apply_without_file_or_env() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join(CONFIG_FILE);

        let config = ClearsightConfig::load_with_env(Some(&missing), env(&[])).expect("loaded");

        assert_eq!(config.log_level, "info");
        assert_eq!(config.ruler_height_px, DEFAULT_RULER_HEIGHT_PX);
        assert_eq!(config.miss_policy, MissPolicy::ResetCombo);
        assert_eq!(config.data_dir, ClearsightConfig::default_data_dir());
    }

    #[test]
    fn test_file_overrides_defaults_and_env_overrides_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "log_level = \"debug\"\nruler_height_px = 60\nmiss_policy = \"ignore\"\n",
        )
        .expect("seeded");

        let config = ClearsightConfig::load_with_env(
            Some(&path),
            env(&[("CLEARSIGHT_RULER_HEIGHT_PX", "24"), ("CLEARSIGHT_DATA_DIR", "/tmp/cs")]),
        )
        .expect("loaded");

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.miss_policy, MissPolicy::Ignore);
        assert_eq!(config.ruler_height_px, 24);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cs"));
    }

    #[test]
    fn test_zero_ruler_height_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join(CONFIG_FILE);

        let result = ClearsightConfig::load_with_env(
            Some(&missing),
            env(&[("CLEARSIGHT_RULER_HEIGHT_PX", "0")]),
        );

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
