//! Settings store port.

use clearsight_domain::PersistedSettings;

/// Error type for settings storage.
#[derive(Debug, thiserror::Error)]
pub enum SettingsStoreError {
    /// The stored bag could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backing storage failed.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Client-local key-value storage for [`PersistedSettings`].
///
/// Read on page or tab load, written on every user change.
pub trait SettingsStore: Send + Sync {
    /// Loads the settings. Missing storage yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data exists but cannot be read.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<PersistedSettings, SettingsStoreError>> + Send;

    /// Writes the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    fn save(
        &self,
        settings: &PersistedSettings,
    ) -> impl std::future::Future<Output = Result<(), SettingsStoreError>> + Send;
}
