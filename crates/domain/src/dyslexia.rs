//! Dyslexia-friendly presentation settings.
//!
//! [`DyslexiaSettings`] is the stored record; [`DyslexiaStyle`] is what it
//! maps to once resolved into classes, a font stack, a background color and
//! concrete CSS property values.

use serde::{Deserialize, Serialize};

/// Class added to the target element whenever dyslexia mode is active.
pub const MODE_CLASS: &str = "clearsight-dyslexia";

/// Font family choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontFamily {
    /// `OpenDyslexic`, weighted letter bottoms (default).
    #[default]
    OpenDyslexic,
    /// Lexend, widened letterforms.
    Lexend,
    /// Atkinson Hyperlegible.
    Atkinson,
    /// Comic Sans.
    ComicSans,
    /// Arial.
    Arial,
    /// Verdana.
    Verdana,
}

impl FontFamily {
    /// All choices, in display order.
    pub const ALL: [Self; 6] = [
        Self::OpenDyslexic,
        Self::Lexend,
        Self::Atkinson,
        Self::ComicSans,
        Self::Arial,
        Self::Verdana,
    ];

    /// Parses a stored key, falling back to the default font.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "lexend" => Self::Lexend,
            "atkinson" => Self::Atkinson,
            "comic-sans" | "comicsans" => Self::ComicSans,
            "arial" => Self::Arial,
            "verdana" => Self::Verdana,
            _ => Self::OpenDyslexic,
        }
    }

    /// Stored key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::OpenDyslexic => "opendyslexic",
            Self::Lexend => "lexend",
            Self::Atkinson => "atkinson",
            Self::ComicSans => "comic-sans",
            Self::Arial => "arial",
            Self::Verdana => "verdana",
        }
    }

    /// CSS class selecting this font.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::OpenDyslexic => "clearsight-font-opendyslexic",
            Self::Lexend => "clearsight-font-lexend",
            Self::Atkinson => "clearsight-font-atkinson",
            Self::ComicSans => "clearsight-font-comic-sans",
            Self::Arial => "clearsight-font-arial",
            Self::Verdana => "clearsight-font-verdana",
        }
    }

    /// CSS `font-family` value.
    #[must_use]
    pub const fn font_stack(self) -> &'static str {
        match self {
            Self::OpenDyslexic => "'OpenDyslexic', 'Comic Sans MS', sans-serif",
            Self::Lexend => "'Lexend', 'Helvetica Neue', sans-serif",
            Self::Atkinson => "'Atkinson Hyperlegible', 'Arial', sans-serif",
            Self::ComicSans => "'Comic Sans MS', 'Comic Neue', cursive",
            Self::Arial => "Arial, 'Helvetica Neue', sans-serif",
            Self::Verdana => "Verdana, Geneva, sans-serif",
        }
    }
}

impl From<String> for FontFamily {
    fn from(value: String) -> Self {
        Self::from_key(&value)
    }
}

impl From<FontFamily> for String {
    fn from(value: FontFamily) -> Self {
        value.key().to_string()
    }
}

/// Page background tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BackgroundColor {
    /// Plain white. Also the fallback for unknown keys.
    White,
    /// Warm cream (default).
    #[default]
    Cream,
    /// Pale blue.
    LightBlue,
    /// Pale green.
    LightGreen,
    /// Pale yellow.
    LightYellow,
    /// Pale gray.
    LightGray,
    /// Peach.
    Peach,
}

impl BackgroundColor {
    /// All choices, in display order.
    pub const ALL: [Self; 7] = [
        Self::White,
        Self::Cream,
        Self::LightBlue,
        Self::LightGreen,
        Self::LightYellow,
        Self::LightGray,
        Self::Peach,
    ];

    /// Parses a stored key. Unknown keys map to white.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "cream" => Self::Cream,
            "light-blue" | "lightblue" => Self::LightBlue,
            "light-green" | "lightgreen" => Self::LightGreen,
            "light-yellow" | "lightyellow" => Self::LightYellow,
            "light-gray" | "lightgray" | "light-grey" => Self::LightGray,
            "peach" => Self::Peach,
            _ => Self::White,
        }
    }

    /// Stored key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Cream => "cream",
            Self::LightBlue => "light-blue",
            Self::LightGreen => "light-green",
            Self::LightYellow => "light-yellow",
            Self::LightGray => "light-gray",
            Self::Peach => "peach",
        }
    }

    /// Literal CSS color.
    #[must_use]
    pub const fn css_color(self) -> &'static str {
        match self {
            Self::White => "#ffffff",
            Self::Cream => "#fdf6e3",
            Self::LightBlue => "#e6f3ff",
            Self::LightGreen => "#e8f5e9",
            Self::LightYellow => "#fffde7",
            Self::LightGray => "#f5f5f5",
            Self::Peach => "#ffeadb",
        }
    }
}

impl From<String> for BackgroundColor {
    fn from(value: String) -> Self {
        Self::from_key(&value)
    }
}

impl From<BackgroundColor> for String {
    fn from(value: BackgroundColor) -> Self {
        value.key().to_string()
    }
}

/// Dyslexia presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DyslexiaSettings {
    /// Master switch.
    #[serde(default)]
    pub is_enabled: bool,

    /// Font family.
    #[serde(default)]
    pub font_family: FontFamily,

    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Line height multiplier.
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,

    /// Letter spacing in em.
    #[serde(default = "default_letter_spacing")]
    pub letter_spacing: f32,

    /// Word spacing in em.
    #[serde(default = "default_word_spacing")]
    pub word_spacing: f32,

    /// Background tint.
    #[serde(default)]
    pub background_color: BackgroundColor,

    /// Maximum column width in pixels.
    #[serde(default = "default_column_width")]
    pub column_width: u32,

    /// Bold leading letters of each word.
    #[serde(default)]
    pub bionic_reading: bool,

    /// Show the pointer-following reading ruler.
    #[serde(default)]
    pub reading_ruler: bool,
}

const fn default_font_size() -> f32 {
    18.0
}

const fn default_line_spacing() -> f32 {
    1.5
}

const fn default_letter_spacing() -> f32 {
    0.12
}

const fn default_word_spacing() -> f32 {
    0.16
}

const fn default_column_width() -> u32 {
    700
}

impl Default for DyslexiaSettings {
    fn default() -> Self {
        Self {
            is_enabled: false,
            font_family: FontFamily::default(),
            font_size: default_font_size(),
            line_spacing: default_line_spacing(),
            letter_spacing: default_letter_spacing(),
            word_spacing: default_word_spacing(),
            background_color: BackgroundColor::default(),
            column_width: default_column_width(),
            bionic_reading: false,
            reading_ruler: false,
        }
    }
}

impl DyslexiaSettings {
    /// Returns a copy with every numeric field inside the range the settings
    /// panel offers.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            font_size: self.font_size.clamp(12.0, 32.0),
            line_spacing: self.line_spacing.clamp(1.0, 3.0),
            letter_spacing: self.letter_spacing.clamp(0.0, 0.5),
            word_spacing: self.word_spacing.clamp(0.0, 1.0),
            column_width: self.column_width.clamp(400, 1200),
            ..self.clone()
        }
    }

    /// Resolves the settings into concrete presentation values.
    #[must_use]
    pub fn style(&self) -> DyslexiaStyle {
        DyslexiaStyle {
            mode_class: MODE_CLASS,
            font_class: self.font_family.class_name(),
            font_stack: self.font_family.font_stack(),
            background: self.background_color.css_color(),
            properties: vec![
                ("font-size", format!("{}px", self.font_size)),
                ("line-height", format!("{}", self.line_spacing)),
                ("letter-spacing", format!("{}em", self.letter_spacing)),
                ("word-spacing", format!("{}em", self.word_spacing)),
                ("max-width", format!("{}px", self.column_width)),
            ],
        }
    }
}

/// Concrete presentation values derived from [`DyslexiaSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DyslexiaStyle {
    /// Class marking dyslexia mode as active.
    pub mode_class: &'static str,
    /// Class selecting the font.
    pub font_class: &'static str,
    /// Font stack bound to `font_class`.
    pub font_stack: &'static str,
    /// Background color value.
    pub background: &'static str,
    /// Inline style properties, in application order.
    pub properties: Vec<(&'static str, String)>,
}

impl DyslexiaStyle {
    /// Stylesheet rule binding the font class to its stack.
    #[must_use]
    pub fn font_rule(&self) -> String {
        format!(
            ".{} {{ font-family: {} !important; }}",
            self.font_class, self.font_stack
        )
    }

    /// All declarations, including font and background, as CSS text.
    #[must_use]
    pub fn declarations(&self) -> String {
        let mut css = format!(
            "font-family: {};\nbackground-color: {};\n",
            self.font_stack, self.background
        );
        for (property, value) in &self.properties {
            css.push_str(property);
            css.push_str(": ");
            css.push_str(value);
            css.push_str(";\n");
        }
        css
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_settings() {
        let settings = DyslexiaSettings::default();
        assert!(!settings.is_enabled);
        assert_eq!(settings.font_family, FontFamily::OpenDyslexic);
        assert_eq!(settings.background_color, BackgroundColor::Cream);
        assert_eq!(settings.column_width, 700);
    }

    #[test]
    fn test_unknown_background_is_white() {
        assert_eq!(BackgroundColor::from_key("neon"), BackgroundColor::White);
        assert_eq!(BackgroundColor::from_key("neon").css_color(), "#ffffff");
    }

    #[test]
    fn test_unknown_font_is_default() {
        assert_eq!(FontFamily::from_key("wingdings"), FontFamily::default());
    }

    #[test]
    fn test_style_maps_numeric_fields() {
        let settings = DyslexiaSettings {
            font_size: 20.0,
            line_spacing: 2.0,
            letter_spacing: 0.1,
            word_spacing: 0.3,
            column_width: 640,
            font_family: FontFamily::Lexend,
            background_color: BackgroundColor::LightBlue,
            ..DyslexiaSettings::default()
        };
        let style = settings.style();
        assert_eq!(style.font_class, "clearsight-font-lexend");
        assert_eq!(style.background, "#e6f3ff");
        assert_eq!(
            style.properties,
            vec![
                ("font-size", "20px".to_string()),
                ("line-height", "2".to_string()),
                ("letter-spacing", "0.1em".to_string()),
                ("word-spacing", "0.3em".to_string()),
                ("max-width", "640px".to_string()),
            ]
        );
        assert!(style.font_rule().starts_with(".clearsight-font-lexend {"));
    }

    #[test]
    fn test_clamped_limits_ranges() {
        let settings = DyslexiaSettings {
            font_size: 80.0,
            column_width: 10,
            ..DyslexiaSettings::default()
        }
        .clamped();
        assert!((settings.font_size - 32.0).abs() < f32::EPSILON);
        assert_eq!(settings.column_width, 400);
    }

    #[test]
    fn test_deserializes_camel_case_with_fallbacks() {
        let json = r#"{"isEnabled":true,"fontFamily":"papyrus","backgroundColor":"ultraviolet","bionicReading":true}"#;
        let settings: DyslexiaSettings = serde_json::from_str(json).expect("valid json");
        assert!(settings.is_enabled);
        assert!(settings.bionic_reading);
        assert_eq!(settings.font_family, FontFamily::OpenDyslexic);
        assert_eq!(settings.background_color, BackgroundColor::White);
        assert!((settings.font_size - 18.0).abs() < f32::EPSILON);
    }
}
