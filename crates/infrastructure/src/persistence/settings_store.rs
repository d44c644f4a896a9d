//! Settings persistence.
//!
//! Stores the settings bag as `settings.json` in the data directory.

use std::path::{Path, PathBuf};

use clearsight_application::ports::{FileSystem, FileSystemError, SettingsStore, SettingsStoreError};
use clearsight_domain::PersistedSettings;
use tracing::debug;

use super::TokioFileSystem;
use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// File name of the settings bag.
pub const SETTINGS_FILE: &str = "settings.json";

/// JSON-file implementation of [`SettingsStore`].
#[derive(Debug, Clone)]
pub struct FileSettingsStore<F = TokioFileSystem> {
    fs: F,
    path: PathBuf,
}

impl FileSettingsStore {
    /// Creates a store for `settings.json` under `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self::with_file_system(TokioFileSystem::new(), data_dir)
    }
}

impl<F: FileSystem> FileSettingsStore<F> {
    /// Creates a store over a custom file system.
    #[must_use]
    pub fn with_file_system(fs: F, data_dir: &Path) -> Self {
        Self {
            fs,
            path: data_dir.join(SETTINGS_FILE),
        }
    }

    /// Returns the path where settings are stored.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<F: FileSystem> SettingsStore for FileSettingsStore<F> {
    async fn load(&self) -> Result<PersistedSettings, SettingsStoreError> {
        match self.fs.read_file(&self.path).await {
            Ok(bytes) => from_json_bytes(&bytes)
                .map_err(|e| SettingsStoreError::Serialization(e.to_string())),
            Err(FileSystemError::NotFound(_)) => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                Ok(PersistedSettings::default())
            }
            Err(e) => Err(SettingsStoreError::Unavailable(e.to_string())),
        }
    }

    async fn save(&self, settings: &PersistedSettings) -> Result<(), SettingsStoreError> {
        let content = to_json_stable_bytes(settings)
            .map_err(|e| SettingsStoreError::Serialization(e.to_string()))?;
        self.fs
            .write_file(&self.path, &content)
            .await
            .map_err(|e| SettingsStoreError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clearsight_domain::{BackgroundColor, ColorVisionType, FontFamily};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileSettingsStore::new(dir.path());

        let settings = store.load().await.expect("defaults");

        assert_eq!(settings, PersistedSettings::default());
    }

    #[tokio::test]
    async fn test_saved_settings_load_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileSettingsStore::new(dir.path());
        let mut settings = PersistedSettings {
            vision_type: ColorVisionType::Protanopia,
            correction: true,
            ..PersistedSettings::default()
        };
        settings.dyslexia_settings.is_enabled = true;
        settings.dyslexia_settings.font_family = FontFamily::Lexend;
        settings.dyslexia_settings.background_color = BackgroundColor::Peach;

        store.save(&settings).await.expect("saved");

        assert_eq!(store.load().await.expect("loaded"), settings);
        let raw = std::fs::read_to_string(store.path()).expect("file written");
        assert!(raw.contains("\"visionType\": \"protanopia\""));
        assert!(raw.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_unknown_values_fall_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileSettingsStore::new(dir.path());
        std::fs::write(
            store.path(),
            r#"{"visionType":"infrared","dyslexiaSettings":{"fontFamily":"wingdings"}}"#,
        )
        .expect("seeded");

        let settings = store.load().await.expect("loaded");

        assert_eq!(settings.vision_type, ColorVisionType::None);
        assert_eq!(settings.dyslexia_settings.font_family, FontFamily::OpenDyslexic);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileSettingsStore::new(dir.path());
        std::fs::write(store.path(), "not json").expect("seeded");

        let result = store.load().await;

        assert!(matches!(result, Err(SettingsStoreError::Serialization(_))));
    }
}
