//! Browser tab messaging port.

use std::fmt;

use async_trait::async_trait;
use clearsight_domain::ExtensionMessage;

/// Browser tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

/// Why a message could not reach a tab.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TabError {
    /// The page cannot be modified (browser-internal or store pages).
    #[error("{0} is a restricted page")]
    Restricted(TabId),

    /// The tab closed or has no content script.
    #[error("{0} is closed or has no receiver")]
    Closed(TabId),

    /// Any other delivery failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Sends messages from the background context to tabs.
#[async_trait]
pub trait TabMessenger: Send + Sync {
    /// Lists the currently open tabs.
    async fn tabs(&self) -> Result<Vec<TabId>, TabError>;

    /// Delivers a message to one tab's content script.
    async fn send(&self, tab: TabId, message: &ExtensionMessage) -> Result<(), TabError>;
}
