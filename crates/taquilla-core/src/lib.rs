//! Taquilla Core - compositing and curved-text layout engine
//!
//! This crate flattens a photo and the overlays a user placed on it (straight
//! text, text following a hand-drawn path, stickers, weather/location badges)
//! into a single raster at export resolution. It also lays out and renders
//! multi-photo collages from a static template catalog.
//!
//! # Coordinate Spaces
//!
//! Elements are authored in *display space* (relative to the on-screen preview
//! of the photo). The compositor maps them to *output space* with a single
//! uniform factor:
//!
//! ```text
//! scale = min(output.width / display.width, output.height / display.height)
//! ```
//!
//! # Layer Order
//!
//! 1. Base image (filtered, downscaled to the export limit)
//! 2. Straight text, in list order
//! 3. Curved text, in list order
//! 4. Stickers, by ascending z-index
//! 5. Weather badge, then location badge

pub mod canvas;
pub mod collage;
pub mod compose;
pub mod config;
pub mod curved;
pub mod export;
pub mod filter;
pub mod geometry;
pub mod overlay;
pub mod session;
pub mod shadow;
pub mod sticker;
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

pub use collage::{CollageComposer, CollageTemplate, FractionalFrame, JitterPolicy};
pub use compose::{CompositeRequest, Compositor, ExportTarget, RenderError};
pub use config::EngineConfig;
pub use curved::{layout_curved_text, CurvedLayout, GlyphPlacement, LayoutMode};
pub use filter::{FilterApplier, FilterRegistry};
pub use geometry::{Point, Polyline, Rect, Size};
pub use overlay::{LocationOverlay, WeatherOverlay, WeatherType};
pub use session::{
    CurvedTextElement, EditingSession, ElementId, SessionSnapshot, StickerElement, TextElement,
};
pub use shadow::ShadowSpec;
pub use sticker::{StickerLoader, StickerProvider, StickerRef};
pub use text::{FontLibrary, FontSpec, FontWeight, GlyphSource, TextMeasurer};

use serde::{Deserialize, Serialize};

/// Straight RGBA color with channels in the range 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const CYAN: Rgba = Rgba::new(0.0, 1.0, 1.0, 1.0);
    pub const MAGENTA: Rgba = Rgba::new(1.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color with a replaced alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Same color with its alpha multiplied by `factor`.
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: self.a * factor,
            ..self
        }
    }

    /// Check if the color would leave the canvas untouched.
    pub fn is_invisible(&self) -> bool {
        self.a <= 0.0
    }

    /// Convert to a tiny-skia color, clamping every channel into range.
    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
        .unwrap_or(tiny_skia::Color::BLACK)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}
