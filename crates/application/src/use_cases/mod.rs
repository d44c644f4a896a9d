//! Application use cases (feature orchestration).

mod background;
mod broadcast;
mod content_script;
mod exercise_runner;

pub use background::{BackgroundService, SyncReport};
pub use broadcast::{BroadcastReport, broadcast};
pub use content_script::ContentScript;
pub use exercise_runner::{ClickResult, ExerciseRunner};
