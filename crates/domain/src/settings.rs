//! Persisted settings bag.
//!
//! The same three keys are read on page or tab load and written on every
//! change: `visionType`, `correction` and `dyslexiaSettings`.

use serde::{Deserialize, Serialize};

use crate::dyslexia::DyslexiaSettings;
use crate::vision::{ColorVisionType, VisionPreference};

/// Settings as stored in client-local storage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSettings {
    /// Selected color-vision type.
    #[serde(default)]
    pub vision_type: ColorVisionType,

    /// Correction mode instead of simulation.
    #[serde(default)]
    pub correction: bool,

    /// Dyslexia presentation settings.
    #[serde(default)]
    pub dyslexia_settings: DyslexiaSettings,
}

impl PersistedSettings {
    /// The vision preference encoded by these settings.
    #[must_use]
    pub const fn vision(&self) -> VisionPreference {
        VisionPreference::new(self.vision_type, self.correction)
    }

    /// Replaces the vision fields.
    pub const fn set_vision(&mut self, preference: VisionPreference) {
        self.vision_type = preference.color_vision_type;
        self.correction = preference.correction_enabled;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::dyslexia::FontFamily;

    #[test]
    fn test_empty_bag_uses_defaults() {
        let settings: PersistedSettings = serde_json::from_str("{}").expect("valid json");
        assert_eq!(settings, PersistedSettings::default());
        assert!(!settings.vision().is_active());
    }

    #[test]
    fn test_uses_storage_keys() {
        let mut settings = PersistedSettings::default();
        settings.set_vision(VisionPreference::new(ColorVisionType::Deuteranopia, true));
        settings.dyslexia_settings.font_family = FontFamily::Verdana;

        let json = serde_json::to_value(&settings).expect("serializable");
        assert_eq!(json["visionType"], "deuteranopia");
        assert_eq!(json["correction"], true);
        assert_eq!(json["dyslexiaSettings"]["fontFamily"], "verdana");
    }
}
