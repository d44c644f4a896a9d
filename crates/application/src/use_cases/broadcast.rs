//! Fire-and-forget delivery of one message to every open tab.

use std::sync::Arc;

use clearsight_domain::ExtensionMessage;
use tracing::debug;

use crate::ports::{TabId, TabMessenger};

/// Per-tab delivery results, in tab order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Tabs that accepted the message.
    pub delivered: Vec<TabId>,
    /// Tabs that could not be reached, with the reason.
    pub skipped: Vec<(TabId, String)>,
}

impl BroadcastReport {
    /// Total tabs attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.skipped.len()
    }
}

/// Sends `message` to every open tab, one task per tab.
///
/// A tab that rejects the message (restricted page, closed tab, panic in
/// the transport) is recorded as skipped; it never affects delivery to the
/// others. Failing to list tabs yields an empty report.
pub async fn broadcast<M>(messenger: Arc<M>, message: ExtensionMessage) -> BroadcastReport
where
    M: TabMessenger + ?Sized + 'static,
{
    let tabs = match messenger.tabs().await {
        Ok(tabs) => tabs,
        Err(error) => {
            debug!(%error, "could not list tabs");
            return BroadcastReport::default();
        }
    };

    let message = Arc::new(message);
    let tasks: Vec<_> = tabs
        .into_iter()
        .map(|tab| {
            let messenger = Arc::clone(&messenger);
            let message = Arc::clone(&message);
            let task = tokio::spawn(async move { messenger.send(tab, &message).await });
            (tab, task)
        })
        .collect();

    let mut report = BroadcastReport::default();
    for (tab, task) in tasks {
        match task.await {
            Ok(Ok(())) => report.delivered.push(tab),
            Ok(Err(error)) => {
                debug!(%tab, %error, action = message.action(), "tab skipped");
                report.skipped.push((tab, error.to_string()));
            }
            Err(join_error) => {
                debug!(%tab, %join_error, "tab delivery task failed");
                report.skipped.push((tab, join_error.to_string()));
            }
        }
    }
    report
}
