//! Stacked shadows with an approximated blur.
//!
//! Shadows are drawn in list order, each one being the content's silhouette
//! filled with the shadow color and translated by the shadow offset. The
//! primary content is drawn last, on top of all shadow layers.
//!
//! A true Gaussian blur of vector content is replaced by a few low-alpha
//! copies of the silhouette around the shadow position: at most
//! [`MAX_BLUR_PASSES`] rings of four cardinal offsets per shadow.

use crate::canvas::Canvas;
use crate::geometry::Point;
use crate::Rgba;
use serde::{Deserialize, Serialize};
use tiny_skia::{Path, Transform};

/// Upper bound on blur rings drawn for one shadow.
pub const MAX_BLUR_PASSES: usize = 3;

/// Total alpha shared by the passes of a blurred shadow.
const BLUR_ALPHA_BUDGET: f32 = 0.3;

/// One shadow layer: color, blur radius (0 = hard) and offset, in logical
/// units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowSpec {
    pub color: Rgba,
    #[serde(default)]
    pub blur_radius: f32,
    #[serde(default)]
    pub offset: Point,
}

impl ShadowSpec {
    /// Hard-edged shadow.
    pub const fn hard(color: Rgba, dx: f32, dy: f32) -> Self {
        Self {
            color,
            blur_radius: 0.0,
            offset: Point::new(dx, dy),
        }
    }

    /// Soft shadow with the given blur radius.
    pub const fn soft(color: Rgba, blur_radius: f32, dx: f32, dy: f32) -> Self {
        Self {
            color,
            blur_radius,
            offset: Point::new(dx, dy),
        }
    }

    pub fn is_hard(&self) -> bool {
        self.blur_radius <= 0.0
    }
}

/// A single draw of a shadow silhouette, relative to the shadow position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowPass {
    pub dx: f32,
    pub dy: f32,
    /// Multiplier applied to the shadow color's alpha.
    pub alpha: f32,
}

/// Passes needed to draw one shadow at export `scale`.
///
/// Blurred shadows draw `n = min(floor(blur * scale / 2), 3)` rings; ring
/// `i` places four copies at distance `i * 0.5 * scale`, each with alpha
/// `0.3 / n`. When `n` is zero the shadow is hard and draws once at full
/// alpha.
pub fn blur_passes(blur_radius: f32, scale: f32) -> Vec<ShadowPass> {
    let steps = (blur_radius * scale / 2.0).floor();
    if steps.is_nan() || steps < 1.0 {
        return vec![ShadowPass {
            dx: 0.0,
            dy: 0.0,
            alpha: 1.0,
        }];
    }

    let rings = (steps as usize).min(MAX_BLUR_PASSES);
    let alpha = BLUR_ALPHA_BUDGET / rings as f32;

    (1..=rings)
        .flat_map(|i| {
            let r = i as f32 * 0.5 * scale;
            [(r, 0.0), (-r, 0.0), (0.0, r), (0.0, -r)]
                .into_iter()
                .map(move |(dx, dy)| ShadowPass { dx, dy, alpha })
        })
        .collect()
}

/// Collage photo fringe: black far, cyan, magenta, black near.
pub fn fringe_preset() -> Vec<ShadowSpec> {
    vec![
        ShadowSpec::hard(Rgba::BLACK, 18.0, 18.0),
        ShadowSpec::hard(Rgba::CYAN, 12.0, 12.0),
        ShadowSpec::hard(Rgba::MAGENTA, 6.0, 6.0),
        ShadowSpec::hard(Rgba::BLACK, 2.0, 2.0),
    ]
}

/// Offset color-separation look used by the retro text style.
pub fn retro_text_preset() -> Vec<ShadowSpec> {
    vec![
        ShadowSpec::hard(Rgba::BLACK, 6.0, 6.0),
        ShadowSpec::hard(Rgba::CYAN, 4.0, 4.0),
        ShadowSpec::hard(Rgba::MAGENTA, 2.0, 2.0),
    ]
}

/// Draw every shadow of `shadows` for the silhouette `path`.
///
/// `transform` places the content on the canvas; shadow offsets are multiplied
/// by `scale` and applied in canvas space, so rotated content still casts its
/// shadow down and to the right.
pub fn draw_shadow_layers(
    canvas: &mut Canvas,
    path: &Path,
    shadows: &[ShadowSpec],
    scale: f32,
    transform: Transform,
) {
    for shadow in shadows {
        if shadow.color.is_invisible() {
            continue;
        }
        let base = transform.post_translate(shadow.offset.x * scale, shadow.offset.y * scale);
        for pass in blur_passes(shadow.blur_radius, scale) {
            canvas.fill_path(
                path,
                shadow.color.fade(pass.alpha),
                base.post_translate(pass.dx, pass.dy),
            );
        }
    }
}

/// Draw the shadow stack, then the content itself in `fill` on top.
pub fn draw_with_shadows(
    canvas: &mut Canvas,
    path: &Path,
    shadows: &[ShadowSpec],
    scale: f32,
    transform: Transform,
    fill: Rgba,
) {
    draw_shadow_layers(canvas, path, shadows, scale, transform);
    canvas.fill_path(path, fill, transform);
}
