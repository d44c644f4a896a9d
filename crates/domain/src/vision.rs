//! Color-vision preference and CSS filter selection.
//!
//! Two disjoint lookup tables are kept: one approximates how a deficiency
//! looks (simulation), the other pushes colors the opposite way to help a
//! viewer with that deficiency tell them apart (correction).

use serde::{Deserialize, Serialize};

/// Color-vision deficiency selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorVisionType {
    /// Reduced sensitivity to red light.
    Protanopia,
    /// Reduced sensitivity to green light.
    Deuteranopia,
    /// Reduced sensitivity to blue light.
    Tritanopia,
    /// Total color blindness.
    Achromatopsia,
    /// No adjustment.
    #[default]
    None,
}

impl ColorVisionType {
    /// All deficiency types that have a filter, in display order.
    pub const DEFICIENCIES: [Self; 4] = [
        Self::Protanopia,
        Self::Deuteranopia,
        Self::Tritanopia,
        Self::Achromatopsia,
    ];

    /// Parses a stored or user-supplied key.
    ///
    /// Unrecognized keys yield [`ColorVisionType::None`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "protanopia" => Self::Protanopia,
            "deuteranopia" => Self::Deuteranopia,
            "tritanopia" => Self::Tritanopia,
            "achromatopsia" => Self::Achromatopsia,
            _ => Self::None,
        }
    }

    /// Returns the persisted key for this type.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
            Self::Achromatopsia => "achromatopsia",
            Self::None => "none",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Protanopia => "Protanopia (red-blind)",
            Self::Deuteranopia => "Deuteranopia (green-blind)",
            Self::Tritanopia => "Tritanopia (blue-blind)",
            Self::Achromatopsia => "Achromatopsia (no color)",
            Self::None => "Normal vision",
        }
    }
}

impl From<String> for ColorVisionType {
    fn from(value: String) -> Self {
        Self::from_key(&value)
    }
}

impl From<ColorVisionType> for String {
    fn from(value: ColorVisionType) -> Self {
        value.key().to_string()
    }
}

impl std::fmt::Display for ColorVisionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

const fn simulation(kind: ColorVisionType) -> Option<&'static str> {
    match kind {
        ColorVisionType::Protanopia => {
            Some("grayscale(0.3) sepia(0.4) saturate(0.6) hue-rotate(-30deg)")
        }
        ColorVisionType::Deuteranopia => {
            Some("grayscale(0.3) sepia(0.4) saturate(0.5) hue-rotate(20deg)")
        }
        ColorVisionType::Tritanopia => {
            Some("grayscale(0.3) sepia(0.2) saturate(0.7) hue-rotate(180deg)")
        }
        ColorVisionType::Achromatopsia => Some("grayscale(1)"),
        ColorVisionType::None => None,
    }
}

const fn correction(kind: ColorVisionType) -> Option<&'static str> {
    match kind {
        ColorVisionType::Protanopia => Some("saturate(1.5) hue-rotate(30deg) contrast(1.1)"),
        ColorVisionType::Deuteranopia => Some("saturate(1.6) hue-rotate(-20deg) contrast(1.1)"),
        ColorVisionType::Tritanopia => Some("saturate(1.4) hue-rotate(-180deg) contrast(1.05)"),
        ColorVisionType::Achromatopsia => Some("contrast(1.4) brightness(1.1)"),
        ColorVisionType::None => None,
    }
}

/// Selects the CSS `filter` expression for a vision type.
///
/// Returns `None` when no filter should be applied.
#[must_use]
pub const fn css_filter(kind: ColorVisionType, correction_enabled: bool) -> Option<&'static str> {
    if correction_enabled {
        correction(kind)
    } else {
        simulation(kind)
    }
}

/// The user's color-vision preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionPreference {
    /// Selected deficiency type.
    #[serde(default)]
    pub color_vision_type: ColorVisionType,
    /// Whether to correct rather than simulate. Ignored for `None`.
    #[serde(default)]
    pub correction_enabled: bool,
}

impl VisionPreference {
    /// Creates a preference.
    #[must_use]
    pub const fn new(color_vision_type: ColorVisionType, correction_enabled: bool) -> Self {
        Self {
            color_vision_type,
            correction_enabled,
        }
    }

    /// The filter for this preference, if any.
    #[must_use]
    pub const fn filter(&self) -> Option<&'static str> {
        css_filter(self.color_vision_type, self.correction_enabled)
    }

    /// Returns true if a filter would be applied.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.color_vision_type, ColorVisionType::None)
    }
}
