//! Text laid out along a freehand path.
//!
//! Every character is centered on a point of the path and rotated to the
//! path's direction there, so letters follow the curve instead of staying
//! upright.
//!
//! # Placement Modes
//!
//! - **Real width** (`W < 0.9 * L`): characters keep their measured advances
//!   and the run is centered on the path, starting at `(L - W) / 2`.
//! - **Uniform** (`W >= 0.9 * L`): the path is divided into `N` equal slots and
//!   character `i` sits at `spacing * i + spacing / 2`.
//!
//! `W` is the measured width of the whole string, `L` the arc length of the
//! path and `N` the character count.

use crate::geometry::{arc_length, point_at_distance, Point};
use crate::text::{FontSpec, TextMeasurer};
use serde::Serialize;

/// Fraction of the path the text may occupy before switching to uniform
/// spacing.
pub const REAL_WIDTH_THRESHOLD: f32 = 0.9;

/// How characters were distributed along the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    RealWidth,
    Uniform,
}

/// One character positioned on the path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlyphPlacement {
    pub ch: char,
    /// Arc length from the start of the path to the character's center.
    pub distance: f32,
    /// Center of the character.
    pub position: Point,
    /// Rotation in radians (tangent direction of the path).
    pub angle: f32,
    /// Measured advance of the character.
    pub width: f32,
}

/// Result of laying out a string on a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvedLayout {
    pub mode: LayoutMode,
    pub path_length: f32,
    /// Arc length before the first character (0 in uniform mode).
    pub start_offset: f32,
    /// Line height of the run, used to center glyphs vertically.
    pub line_height: f32,
    pub placements: Vec<GlyphPlacement>,
}

impl CurvedLayout {
    fn empty(path_length: f32) -> Self {
        Self {
            mode: LayoutMode::RealWidth,
            path_length,
            start_offset: 0.0,
            line_height: 0.0,
            placements: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Shift every placement by `offset`.
    pub fn translated(mut self, offset: Point) -> Self {
        for placement in &mut self.placements {
            placement.position = placement.position.translated(offset);
        }
        self
    }
}

/// Place each character of `text` along `path`.
///
/// `font_size` is the final size in the path's coordinate space; callers
/// rendering at export resolution pass the already-scaled path and size.
///
/// Degenerate input (empty text, fewer than two points, zero arc length)
/// produces a layout without placements.
pub fn layout_curved_text(
    path: &[Point],
    text: &str,
    font: &FontSpec,
    font_size: f32,
    measurer: &dyn TextMeasurer,
) -> CurvedLayout {
    let path_length = arc_length(path);
    if text.is_empty() || path_length <= 0.0 {
        return CurvedLayout::empty(path_length);
    }

    let measured = measurer.measure(text, font, font_size);
    let widths = measurer.char_widths(text, font, font_size);
    let chars: Vec<char> = text.chars().collect();

    let (mode, start_offset, distances) = if measured.width < path_length * REAL_WIDTH_THRESHOLD
    {
        // Center the run the cursor actually walks
        let run_width: f32 = widths.iter().sum();
        let start = (path_length - run_width) / 2.0;
        let mut cursor = start;
        let distances: Vec<f32> = widths
            .iter()
            .map(|w| {
                let center = cursor + w / 2.0;
                cursor += w;
                center
            })
            .collect();
        (LayoutMode::RealWidth, start, distances)
    } else {
        let spacing = path_length / chars.len() as f32;
        let distances = (0..chars.len())
            .map(|i| spacing * i as f32 + spacing / 2.0)
            .collect();
        (LayoutMode::Uniform, 0.0, distances)
    };

    let placements = chars
        .iter()
        .zip(widths.iter())
        .zip(distances)
        .filter_map(|((&ch, &width), distance)| {
            point_at_distance(path, distance).map(|sample| GlyphPlacement {
                ch,
                distance,
                position: sample.point,
                angle: sample.angle,
                width,
            })
        })
        .collect();

    CurvedLayout {
        mode,
        path_length,
        start_offset,
        line_height: measured.height,
        placements,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_support::BoxGlyphs;
    use proptest::prelude::*;

    fn polyline_strategy() -> impl Strategy<Value = Vec<Point>> {
        prop::collection::vec((-400.0f32..400.0, -400.0f32..400.0), 2..12)
            .prop_map(|coords| coords.into_iter().map(|(x, y)| Point::new(x, y)).collect())
    }

    proptest! {
        /// Property: in real-width mode the run is centered on the path.
        #[test]
        fn prop_real_width_run_is_centered(
            path in polyline_strategy(),
            text in "[A-Za-z]{1,12}",
            advance in 1.0f32..40.0,
        ) {
            let glyphs = BoxGlyphs::fixed(advance);
            let layout = layout_curved_text(&path, &text, &FontSpec::default(), 24.0, &glyphs);
            prop_assume!(layout.mode == LayoutMode::RealWidth && !layout.is_empty());

            let total: f32 = layout.placements.iter().map(|p| p.width).sum();
            let tolerance = 1e-3 * layout.path_length.max(1.0);

            prop_assert!((layout.start_offset - (layout.path_length - total) / 2.0).abs() <= tolerance);
            let trailing = layout.path_length - (layout.start_offset + total);
            prop_assert!((trailing - layout.start_offset).abs() <= tolerance);
        }

        /// Property: every character gets a placement and distances increase.
        #[test]
        fn prop_one_placement_per_char(
            path in polyline_strategy(),
            text in "[A-Za-z ]{1,24}",
            advance in 1.0f32..40.0,
        ) {
            let glyphs = BoxGlyphs::fixed(advance);
            let layout = layout_curved_text(&path, &text, &FontSpec::default(), 24.0, &glyphs);
            prop_assume!(layout.path_length > 0.0);

            prop_assert_eq!(layout.placements.len(), text.chars().count());
            for pair in layout.placements.windows(2) {
                prop_assert!(pair[0].distance < pair[1].distance);
            }
            for placement in &layout.placements {
                prop_assert!(placement.position.x.is_finite() && placement.position.y.is_finite());
                prop_assert!(placement.angle.is_finite());
            }
        }
    }
}
