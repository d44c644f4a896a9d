//! Adapters for application ports that need no storage.

mod system_clock;

pub use system_clock::SystemClock;
