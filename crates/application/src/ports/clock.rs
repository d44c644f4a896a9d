//! Clock port

use chrono::{DateTime, Utc};

/// Wall-clock source used to timestamp high scores.
///
/// Tests substitute a fixed clock so stored records are predictable.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
