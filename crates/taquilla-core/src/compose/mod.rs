//! Scale-aware compositing of a session into one output raster.
//!
//! The compositor takes a [`SessionSnapshot`] authored in display space, maps
//! it to the output resolution with one uniform factor and draws every layer
//! in a fixed order:
//!
//! 1. Filtered base image, resized to the output size
//! 2. Straight text, in list order
//! 3. Curved text, in list order
//! 4. Stickers, by ascending z-index (stable)
//! 5. Weather badge, then location badge
//!
//! Rendering is best-effort per layer. A failing filter keeps the unfiltered
//! photo; a sticker without pixels or a glyph run without outlines is skipped
//! and logged. Only an unusable base image, a canvas that cannot be allocated
//! or a cancellation before the start abort the whole composite.
//!
//! # Examples
//!
//! ```ignore
//! let compositor = Compositor::new(&filters, &fonts, &stickers);
//! let request = CompositeRequest::new(&photo, &session.snapshot())
//!     .with_target(ExportTarget::Share);
//! let output = compositor.render(&request)?;
//! ```

mod badge;
mod curved;
mod sticker;
mod text;

pub use badge::{BadgeLine, LocationBadgeLayout, WeatherBadgeLayout};
pub use text::ScaledTextLayout;

use crate::canvas::Canvas;
use crate::config::EngineConfig;
use crate::filter::{FilterRegistry, NONE_FILTER};
use crate::geometry::{fit_within, Size};
use crate::session::SessionSnapshot;
use crate::sticker::StickerLoader;
use crate::text::GlyphSource;
use image::{imageops, RgbaImage};
use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Errors that abort a composite.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The base image has no pixels
    #[error("Base image is empty")]
    InvalidBase,

    /// The output raster could not be allocated
    #[error("Cannot allocate a {width}x{height} canvas")]
    CanvasAllocation { width: u32, height: u32 },

    /// The request was cancelled before rendering started
    #[error("Composite cancelled")]
    Cancelled,
}

/// Where the output is headed, which decides the longest allowed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportTarget {
    /// Saved to the photo library.
    #[default]
    Library,
    /// Handed to the share sheet.
    Share,
}

impl ExportTarget {
    /// Longest output edge for this target.
    pub fn max_edge(self, config: &EngineConfig) -> u32 {
        match self {
            ExportTarget::Library => config.library_max_edge,
            ExportTarget::Share => config.share_max_edge,
        }
    }
}

/// Input of one composite.
#[derive(Debug, Clone, Copy)]
pub struct CompositeRequest<'a> {
    pub base: &'a RgbaImage,
    pub snapshot: &'a SessionSnapshot,
    pub target: ExportTarget,
    /// Requested output size; the base image size when `None`. Always clamped
    /// to the target's max edge.
    pub output_size: Option<(u32, u32)>,
    /// Checked once before rendering starts.
    pub cancel: Option<&'a AtomicBool>,
}

impl<'a> CompositeRequest<'a> {
    pub fn new(base: &'a RgbaImage, snapshot: &'a SessionSnapshot) -> Self {
        Self {
            base,
            snapshot,
            target: ExportTarget::default(),
            output_size: None,
            cancel: None,
        }
    }

    pub fn with_target(mut self, target: ExportTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_output_size(mut self, width: u32, height: u32) -> Self {
        self.output_size = Some((width, height));
        self
    }

    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Display-to-output factor: `min(output.w / display.w, output.h / display.h)`.
///
/// `display` must not be degenerate; see [`resolve_display_size`].
pub fn export_scale(display: Size, output: Size) -> f32 {
    (output.width / display.width).min(output.height / display.height)
}

/// The authored display size, or the configured fallback when it is missing
/// or degenerate.
pub fn resolve_display_size(display: Option<Size>, config: &EngineConfig) -> Size {
    match display {
        Some(size) if !size.is_degenerate() => size,
        _ => {
            log::debug!(
                "Display size missing or degenerate, using {}x{}",
                config.fallback_display_size.width,
                config.fallback_display_size.height
            );
            config.fallback_display_size
        }
    }
}

/// Output dimensions, downscaled to fit `max_edge`.
///
/// A requested size is a bounding box: the base aspect ratio is kept and the
/// largest size inside the box wins. Without a request the base size is used.
pub fn output_dimensions(base: &RgbaImage, requested: Option<(u32, u32)>, max_edge: u32) -> (u32, u32) {
    let (base_width, base_height) = base.dimensions();
    let Some((box_width, box_height)) = requested else {
        return fit_within(base_width, base_height, max_edge);
    };
    if base_width == 0 || base_height == 0 || box_width == 0 || box_height == 0 {
        return (0, 0);
    }

    let scale = (box_width as f64 / base_width as f64).min(box_height as f64 / base_height as f64);
    let width = ((base_width as f64 * scale).round() as u32).clamp(1, box_width);
    let height = ((base_height as f64 * scale).round() as u32).clamp(1, box_height);
    fit_within(width, height, max_edge)
}

/// Flattens session snapshots into output images.
pub struct Compositor<'a> {
    config: EngineConfig,
    filters: &'a FilterRegistry,
    glyphs: &'a dyn GlyphSource,
    stickers: &'a dyn StickerLoader,
}

impl std::fmt::Debug for Compositor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("config", &self.config)
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

impl<'a> Compositor<'a> {
    pub fn new(
        filters: &'a FilterRegistry,
        glyphs: &'a dyn GlyphSource,
        stickers: &'a dyn StickerLoader,
    ) -> Self {
        Self {
            config: EngineConfig::default(),
            filters,
            glyphs,
            stickers,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render every layer of `request.snapshot` over the base image.
    pub fn render(&self, request: &CompositeRequest<'_>) -> Result<RgbaImage, RenderError> {
        if request.is_cancelled() {
            return Err(RenderError::Cancelled);
        }

        let base = request.base;
        if base.width() == 0 || base.height() == 0 {
            return Err(RenderError::InvalidBase);
        }

        let (width, height) = output_dimensions(
            base,
            request.output_size,
            request.target.max_edge(&self.config),
        );
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidBase);
        }

        let snapshot = request.snapshot;
        let filtered = self.filtered_base(base, &snapshot.filter_id);
        let sized: Cow<'_, RgbaImage> = if filtered.dimensions() == (width, height) {
            filtered
        } else {
            Cow::Owned(imageops::resize(
                filtered.as_ref(),
                width,
                height,
                imageops::FilterType::Lanczos3,
            ))
        };

        let mut canvas =
            Canvas::from_image(&sized).ok_or(RenderError::CanvasAllocation { width, height })?;

        let display = resolve_display_size(snapshot.display_size, &self.config);
        let scale = export_scale(display, Size::from_pixels(width, height));
        log::debug!(
            "Compositing {}x{} at scale {:.3}: {} text, {} curved, {} stickers",
            width,
            height,
            scale,
            snapshot.texts.len(),
            snapshot.curved_texts.len(),
            snapshot.stickers.len()
        );

        for element in &snapshot.texts {
            self.draw_text(&mut canvas, element, scale);
        }

        for element in &snapshot.curved_texts {
            self.draw_curved_text(&mut canvas, element, scale);
        }

        let mut stickers: Vec<_> = snapshot.stickers.iter().collect();
        stickers.sort_by_key(|s| s.z_index);
        for element in stickers {
            self.draw_sticker(&mut canvas, element, scale);
        }

        if let Some(weather) = &snapshot.weather {
            self.draw_weather(&mut canvas, weather, scale);
        }
        if let Some(location) = &snapshot.location {
            self.draw_location(&mut canvas, location, scale);
        }

        Ok(canvas.into_image())
    }

    fn filtered_base<'b>(&self, base: &'b RgbaImage, filter_id: &str) -> Cow<'b, RgbaImage> {
        if filter_id.is_empty() || filter_id == NONE_FILTER {
            Cow::Borrowed(base)
        } else {
            Cow::Owned(self.filters.apply(base, filter_id))
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::Point;
    use crate::session::TextElement;
    use crate::test_support::BoxGlyphs;
    use proptest::prelude::*;

    proptest! {
        /// Property: rendering at display size leaves geometry untouched.
        #[test]
        fn prop_identity_scale_keeps_geometry(
            w in 50.0f32..2000.0,
            h in 50.0f32..2000.0,
            x in 0.0f32..500.0,
            y in 0.0f32..500.0,
            font_size in 8.0f32..80.0,
        ) {
            let size = Size::new(w, h);
            let scale = export_scale(size, size);
            prop_assert_eq!(scale, 1.0);

            let element = TextElement {
                font_size,
                ..TextElement::new("Taquilla", Point::new(x, y))
            };
            let padding = EngineConfig::default().text_padding;
            let layout = ScaledTextLayout::compute(&element, scale, padding, &BoxGlyphs::proportional(0.5));

            prop_assert!((layout.center.x - x).abs() < 1e-4);
            prop_assert!((layout.center.y - y).abs() < 1e-4);
            prop_assert!((layout.font_size - font_size).abs() < 1e-4);
            prop_assert!((layout.background.width - layout.text_rect.width - 2.0 * padding.width).abs() < 1e-3);
            prop_assert!((layout.corner_radius - element.corner_radius).abs() < 1e-4);
        }

        /// Property: the scale never lets either axis overflow the output.
        #[test]
        fn prop_scale_fits_both_axes(
            dw in 10.0f32..1000.0,
            dh in 10.0f32..1000.0,
            ow in 10.0f32..4000.0,
            oh in 10.0f32..4000.0,
        ) {
            let scale = export_scale(Size::new(dw, dh), Size::new(ow, oh));
            prop_assert!(dw * scale <= ow * 1.0001);
            prop_assert!(dh * scale <= oh * 1.0001);
        }
    }
}
