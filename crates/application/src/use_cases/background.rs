//! Extension background context.

use std::sync::Arc;

use clearsight_domain::{ExtensionMessage, PersistedSettings};
use tracing::{debug, info, warn};

use super::broadcast::{BroadcastReport, broadcast};
use crate::ApplicationResult;
use crate::ports::{SettingsStore, TabId, TabMessenger};

/// Result of pushing settings to every tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Delivery of the filter message.
    pub filter: BroadcastReport,
    /// Delivery of the dyslexia message.
    pub dyslexia: BroadcastReport,
}

/// Keeps every tab in line with the stored settings.
pub struct BackgroundService<S, M: ?Sized> {
    store: S,
    messenger: Arc<M>,
}

impl<S, M> BackgroundService<S, M>
where
    S: SettingsStore,
    M: TabMessenger + ?Sized + 'static,
{
    /// Creates the service.
    pub const fn new(store: S, messenger: Arc<M>) -> Self {
        Self { store, messenger }
    }

    async fn current_settings(&self) -> PersistedSettings {
        self.store.load().await.unwrap_or_else(|error| {
            warn!(%error, "settings unreadable, broadcasting defaults");
            PersistedSettings::default()
        })
    }

    fn messages(settings: &PersistedSettings) -> [ExtensionMessage; 2] {
        [
            ExtensionMessage::filter_for(&settings.vision()),
            ExtensionMessage::dyslexia_for(&settings.dyslexia_settings),
        ]
    }

    /// Broadcasts the stored settings to all tabs.
    pub async fn broadcast_settings(&self) -> SyncReport {
        let settings = self.current_settings().await;
        let [filter, dyslexia] = Self::messages(&settings);
        SyncReport {
            filter: broadcast(Arc::clone(&self.messenger), filter).await,
            dyslexia: broadcast(Arc::clone(&self.messenger), dyslexia).await,
        }
    }

    /// Persists new settings, then broadcasts them.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be saved; nothing is
    /// broadcast in that case.
    pub async fn update_settings(
        &self,
        settings: &PersistedSettings,
    ) -> ApplicationResult<SyncReport> {
        self.store.save(settings).await?;
        info!(vision = %settings.vision_type, "settings saved");
        Ok(self.broadcast_settings().await)
    }

    /// Sends the stored settings to one freshly loaded tab.
    ///
    /// Returns false if the tab refused; the failure is not reported
    /// further.
    pub async fn sync_tab(&self, tab: TabId) -> bool {
        let settings = self.current_settings().await;
        for message in Self::messages(&settings) {
            if let Err(error) = self.messenger.send(tab, &message).await {
                debug!(%tab, %error, "tab sync skipped");
                return false;
            }
        }
        true
    }
}
