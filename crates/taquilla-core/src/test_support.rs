//! Deterministic test doubles shared by unit tests.

use crate::geometry::Size;
use crate::text::{FontSpec, GlyphSource, TextMeasurer};
use tiny_skia::{Path, PathBuilder, Rect as SkRect};

/// Glyph source that renders every character as a filled box.
///
/// Widths are either fixed per character or proportional to the font size.
/// Line height is always `1.2 * size`.
#[derive(Debug, Clone, Copy)]
pub struct BoxGlyphs {
    width: Advance,
}

#[derive(Debug, Clone, Copy)]
enum Advance {
    Fixed(f32),
    Proportional(f32),
}

impl BoxGlyphs {
    /// Every character is `width` pixels wide at any size.
    pub fn fixed(width: f32) -> Self {
        Self {
            width: Advance::Fixed(width),
        }
    }

    /// Every character is `ratio * size` pixels wide.
    pub fn proportional(ratio: f32) -> Self {
        Self {
            width: Advance::Proportional(ratio),
        }
    }

    fn advance(&self, size: f32) -> f32 {
        match self.width {
            Advance::Fixed(w) => w,
            Advance::Proportional(ratio) => ratio * size,
        }
    }
}

impl TextMeasurer for BoxGlyphs {
    fn measure(&self, text: &str, _font: &FontSpec, size: f32) -> Size {
        Size::new(text.chars().count() as f32 * self.advance(size), size * 1.2)
    }
}

impl GlyphSource for BoxGlyphs {
    fn text_path(&self, text: &str, _font: &FontSpec, size: f32) -> Option<Path> {
        let advance = self.advance(size);
        let mut pb = PathBuilder::new();

        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            if let Some(rect) = SkRect::from_xywh(i as f32 * advance, 0.0, advance, size * 1.2) {
                pb.push_rect(rect);
            }
        }

        pb.finish()
    }
}

/// Initialise `env_logger` once for tests that exercise fallback logging.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
