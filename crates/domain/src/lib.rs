//! Clearsight Domain - Core accessibility types
//!
//! This crate defines the value types and pure transforms behind the
//! Clearsight web app and browser extension.
//! All types here are pure Rust with no I/O dependencies.

pub mod bionic;
pub mod dyslexia;
pub mod error;
pub mod exercise;
pub mod message;
pub mod page;
pub mod settings;
pub mod state;
pub mod vision;

pub use bionic::{BionicText, BionicWord, emphasize, transform};
pub use dyslexia::{BackgroundColor, DyslexiaSettings, DyslexiaStyle, FontFamily, MODE_CLASS};
pub use error::{DomainError, DomainResult};
pub use exercise::{
    Arena, ExerciseKind, ExerciseSession, HighScoreRecord, MissPolicy, SessionOutcome,
    SessionState, Target, points_for,
};
pub use message::{ExtensionMessage, NO_FILTER};
pub use page::{ElementId, EventKind, Inline, Page, SubscriptionId};
pub use settings::PersistedSettings;
pub use state::AppState;
pub use vision::{ColorVisionType, VisionPreference, css_filter};
