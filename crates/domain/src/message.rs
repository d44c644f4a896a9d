//! Messages sent from the extension background context to content scripts.

use serde::{Deserialize, Serialize};

use crate::dyslexia::DyslexiaSettings;
use crate::vision::VisionPreference;

/// CSS value meaning "no filter" on the wire.
pub const NO_FILTER: &str = "none";

/// Background-to-content message, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ExtensionMessage {
    /// Apply a page-wide CSS filter. `none` or empty clears it.
    ApplyFilter {
        /// CSS filter expression.
        filter: String,
    },

    /// Apply dyslexia presentation settings.
    ApplyDyslexiaStyles {
        /// Settings to apply.
        settings: DyslexiaSettings,
    },

    /// Remove every dyslexia style from the page.
    RemoveDyslexiaStyles {
        /// Ignored; some senders attach the current settings.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        settings: Option<DyslexiaSettings>,
    },

    /// Any other action. Receivers ignore it.
    #[serde(other)]
    Unknown,
}

impl ExtensionMessage {
    /// Builds the filter message for a vision preference.
    #[must_use]
    pub fn filter_for(preference: &VisionPreference) -> Self {
        Self::ApplyFilter {
            filter: preference.filter().unwrap_or(NO_FILTER).to_string(),
        }
    }

    /// Builds the apply or remove message for dyslexia settings.
    #[must_use]
    pub fn dyslexia_for(settings: &DyslexiaSettings) -> Self {
        if settings.is_enabled {
            Self::ApplyDyslexiaStyles {
                settings: settings.clone(),
            }
        } else {
            Self::RemoveDyslexiaStyles { settings: None }
        }
    }

    /// The wire name of the action.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::ApplyFilter { .. } => "applyFilter",
            Self::ApplyDyslexiaStyles { .. } => "applyDyslexiaStyles",
            Self::RemoveDyslexiaStyles { .. } => "removeDyslexiaStyles",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a wire message.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or lacks an `action`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes to the wire format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
