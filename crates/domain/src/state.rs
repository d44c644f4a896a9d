//! Application state shared by every page.

use crate::dyslexia::DyslexiaSettings;
use crate::settings::PersistedSettings;
use crate::vision::VisionPreference;

/// The vision and dyslexia preferences currently in effect.
///
/// Owned by the top-level shell and handed to the features that read or
/// mutate it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    /// Color-vision preference.
    pub vision: VisionPreference,
    /// Dyslexia presentation settings.
    pub dyslexia: DyslexiaSettings,
}

impl AppState {
    /// Converts to the persisted representation.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedSettings {
        PersistedSettings {
            vision_type: self.vision.color_vision_type,
            correction: self.vision.correction_enabled,
            dyslexia_settings: self.dyslexia.clone(),
        }
    }
}

impl From<PersistedSettings> for AppState {
    fn from(settings: PersistedSettings) -> Self {
        Self {
            vision: settings.vision(),
            dyslexia: settings.dyslexia_settings,
        }
    }
}
