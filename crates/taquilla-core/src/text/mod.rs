//! Text measurement and glyph outlines.
//!
//! The engine never touches font files directly. Layout code measures text
//! through [`TextMeasurer`] and rendering code asks a [`GlyphSource`] for
//! vector outlines, so tests can substitute deterministic fakes and the app
//! can plug in whatever fonts it registered.
//!
//! [`FontLibrary`] is the bundled implementation, backed by `ab_glyph`.

mod fit;
mod font_library;

pub use fit::{calculate_optimal_font_size, FIT_MARGIN, MAX_FONT_SIZE, MIN_FONT_SIZE};
pub use font_library::{FontError, FontLibrary};

use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use tiny_skia::Path;

/// Font weight requested by a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    UltraLight,
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Black,
}

impl FontWeight {
    /// CSS-style numeric weight (100-900).
    pub fn numeric(self) -> u16 {
        match self {
            FontWeight::UltraLight => 100,
            FontWeight::Thin => 200,
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
            FontWeight::Heavy => 800,
            FontWeight::Black => 900,
        }
    }
}

/// Which font to use: an optional custom face plus the weight to fall back on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FontSpec {
    /// Registered custom font id (e.g. "Ari-W9500Display").
    pub custom_font_id: Option<String>,
    /// Weight used when the custom font is missing.
    pub weight: FontWeight,
}

impl FontSpec {
    pub fn new(custom_font_id: Option<String>, weight: FontWeight) -> Self {
        Self {
            custom_font_id,
            weight,
        }
    }

    /// System font at the given weight.
    pub fn system(weight: FontWeight) -> Self {
        Self::new(None, weight)
    }

    /// Custom font by id, falling back to the regular system weight.
    pub fn custom(id: impl Into<String>) -> Self {
        Self::new(Some(id.into()), FontWeight::Regular)
    }
}

/// Measures rendered text extents.
///
/// Implementations must be deterministic: identical text, font and size
/// always produce identical measurements.
pub trait TextMeasurer {
    /// Width and line height of `text` rendered at `size` pixels.
    fn measure(&self, text: &str, font: &FontSpec, size: f32) -> Size;

    /// Advance width of every character of `text`, measured individually.
    fn char_widths(&self, text: &str, font: &FontSpec, size: f32) -> Vec<f32> {
        let mut buf = [0u8; 4];
        text.chars()
            .map(|ch| self.measure(ch.encode_utf8(&mut buf), font, size).width)
            .collect()
    }
}

/// Provides vector outlines for text runs.
pub trait GlyphSource: TextMeasurer {
    /// Outline of `text` laid out on one line.
    ///
    /// The run starts at `(0, 0)`, the top-left corner of its line box, with
    /// the baseline at the font ascent. Returns `None` when nothing visible
    /// can be produced (no font, whitespace only).
    fn text_path(&self, text: &str, font: &FontSpec, size: f32) -> Option<Path>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::BoxGlyphs;

    #[test]
    fn test_font_weight_numeric_is_ordered() {
        let weights = [
            FontWeight::UltraLight,
            FontWeight::Thin,
            FontWeight::Light,
            FontWeight::Regular,
            FontWeight::Medium,
            FontWeight::Semibold,
            FontWeight::Bold,
            FontWeight::Heavy,
            FontWeight::Black,
        ];
        for pair in weights.windows(2) {
            assert!(pair[0].numeric() < pair[1].numeric());
        }
    }

    #[test]
    fn test_font_spec_constructors() {
        let custom = FontSpec::custom("Returns");
        assert_eq!(custom.custom_font_id.as_deref(), Some("Returns"));
        assert_eq!(custom.weight, FontWeight::Regular);

        let system = FontSpec::system(FontWeight::Semibold);
        assert!(system.custom_font_id.is_none());
    }

    #[test]
    fn test_default_char_widths_measures_each_char() {
        let glyphs = BoxGlyphs::fixed(20.0);
        let widths = glyphs.char_widths("AB", &FontSpec::default(), 24.0);
        assert_eq!(widths, vec![20.0, 20.0]);
    }

    #[test]
    fn test_font_weight_serde_names() {
        let json = serde_json::to_string(&FontWeight::Semibold).unwrap();
        assert_eq!(json, "\"semibold\"");
        let back: FontWeight = serde_json::from_str("\"ultra_light\"").unwrap();
        assert_eq!(back, FontWeight::UltraLight);
    }
}
