//! Registered fonts backed by `ab_glyph`.

use super::{FontSpec, FontWeight, GlyphSource, TextMeasurer};
use crate::geometry::Size;
use ab_glyph::{Font, FontArc, GlyphId, OutlineCurve, PxScale, ScaleFont};
use std::collections::HashMap;
use thiserror::Error;
use tiny_skia::{Path, PathBuilder};

/// Average advance, in ems, assumed when no font is registered at all.
const FALLBACK_ADVANCE_EM: f32 = 0.5;

/// Line height, in ems, assumed when no font is registered at all.
const FALLBACK_LINE_HEIGHT_EM: f32 = 1.2;

/// Errors that can occur while registering fonts.
#[derive(Debug, Error)]
pub enum FontError {
    /// The bytes are not a TrueType/OpenType font
    #[error("Font '{0}' could not be parsed")]
    InvalidFont(String),

    /// A fallback or default names a font that was never registered
    #[error("Font '{0}' is not registered")]
    UnknownFont(String),
}

/// Collection of fonts addressed by id.
///
/// Lookup order for a [`FontSpec`]:
///
/// 1. The custom font id, if registered
/// 2. The font mapped to the requested weight
/// 3. The default font (the first one registered unless overridden)
#[derive(Clone, Default)]
pub struct FontLibrary {
    fonts: HashMap<String, FontArc>,
    default_id: Option<String>,
    weight_fallbacks: HashMap<FontWeight, String>,
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&String> = self.fonts.keys().collect();
        ids.sort();
        f.debug_struct("FontLibrary")
            .field("fonts", &ids)
            .field("default_id", &self.default_id)
            .field("weight_fallbacks", &self.weight_fallbacks)
            .finish()
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register a font under `id`, replacing any previous font with
    /// the same id.
    pub fn register(&mut self, id: impl Into<String>, bytes: Vec<u8>) -> Result<(), FontError> {
        let id = id.into();
        let font = FontArc::try_from_vec(bytes).map_err(|_| FontError::InvalidFont(id.clone()))?;

        if self.default_id.is_none() {
            self.default_id = Some(id.clone());
        }
        log::debug!("Registered font '{}'", id);
        self.fonts.insert(id, font);
        Ok(())
    }

    /// Use a registered font when nothing more specific matches.
    pub fn set_default(&mut self, id: &str) -> Result<(), FontError> {
        if !self.fonts.contains_key(id) {
            return Err(FontError::UnknownFont(id.to_string()));
        }
        self.default_id = Some(id.to_string());
        Ok(())
    }

    /// Map a weight to a registered font.
    pub fn set_weight_fallback(&mut self, weight: FontWeight, id: &str) -> Result<(), FontError> {
        if !self.fonts.contains_key(id) {
            return Err(FontError::UnknownFont(id.to_string()));
        }
        self.weight_fallbacks.insert(weight, id.to_string());
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.fonts.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Pick the font that renders `spec`.
    pub fn resolve(&self, spec: &FontSpec) -> Option<&FontArc> {
        spec.custom_font_id
            .as_deref()
            .and_then(|id| self.fonts.get(id))
            .or_else(|| {
                self.weight_fallbacks
                    .get(&spec.weight)
                    .and_then(|id| self.fonts.get(id))
            })
            .or_else(|| self.default_id.as_deref().and_then(|id| self.fonts.get(id)))
    }
}

impl TextMeasurer for FontLibrary {
    fn measure(&self, text: &str, font: &FontSpec, size: f32) -> Size {
        let Some(face) = self.resolve(font) else {
            let count = text.chars().count() as f32;
            return Size::new(
                count * size * FALLBACK_ADVANCE_EM,
                size * FALLBACK_LINE_HEIGHT_EM,
            );
        };

        let scaled = face.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }

        Size::new(width, scaled.height())
    }

    fn char_widths(&self, text: &str, font: &FontSpec, size: f32) -> Vec<f32> {
        let Some(face) = self.resolve(font) else {
            return vec![size * FALLBACK_ADVANCE_EM; text.chars().count()];
        };

        let scaled = face.as_scaled(PxScale::from(size));
        text.chars()
            .map(|ch| scaled.h_advance(scaled.glyph_id(ch)))
            .collect()
    }
}

impl GlyphSource for FontLibrary {
    fn text_path(&self, text: &str, font: &FontSpec, size: f32) -> Option<Path> {
        let face = self.resolve(font)?;
        let scaled = face.as_scaled(PxScale::from(size));
        let (h_factor, v_factor) = (scaled.h_scale_factor(), scaled.v_scale_factor());
        let ascent = scaled.ascent();

        let mut pb = PathBuilder::new();
        let mut cursor_x = 0.0f32;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                cursor_x += scaled.kern(prev, id);
            }

            if let Some(outline) = face.outline(id) {
                // Font units are y-up with the origin on the baseline
                let map = |p: ab_glyph::Point| (cursor_x + p.x * h_factor, ascent - p.y * v_factor);
                append_outline(&mut pb, &outline.curves, map);
            }

            cursor_x += scaled.h_advance(id);
            previous = Some(id);
        }

        pb.finish()
    }
}

/// Append glyph outline curves to a path, starting a new contour whenever a
/// curve does not continue from the previous one.
fn append_outline(
    pb: &mut PathBuilder,
    curves: &[OutlineCurve],
    map: impl Fn(ab_glyph::Point) -> (f32, f32),
) {
    let mut last_end: Option<(f32, f32)> = None;

    for curve in curves {
        let start = match curve {
            OutlineCurve::Line(p0, _) | OutlineCurve::Quad(p0, _, _) | OutlineCurve::Cubic(p0, ..) => {
                map(*p0)
            }
        };

        if last_end != Some(start) {
            if last_end.is_some() {
                pb.close();
            }
            pb.move_to(start.0, start.1);
        }

        let end = match curve {
            OutlineCurve::Line(_, p1) => {
                let (x, y) = map(*p1);
                pb.line_to(x, y);
                (x, y)
            }
            OutlineCurve::Quad(_, c, p1) => {
                let (cx, cy) = map(*c);
                let (x, y) = map(*p1);
                pb.quad_to(cx, cy, x, y);
                (x, y)
            }
            OutlineCurve::Cubic(_, c1, c2, p1) => {
                let (c1x, c1y) = map(*c1);
                let (c2x, c2y) = map(*c2);
                let (x, y) = map(*p1);
                pb.cubic_to(c1x, c1y, c2x, c2y, x, y);
                (x, y)
            }
        };
        last_end = Some(end);
    }

    if last_end.is_some() {
        pb.close();
    }
}
