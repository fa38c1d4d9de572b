//! Frame placement: fraction to pixels, jitter, overlap.

use super::CollageTemplate;
use crate::config::CollageConfig;
use crate::geometry::Rect;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How per-frame jitter and overlap are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JitterPolicy {
    /// No jitter; every frame uses the minimum overlap scale.
    #[default]
    None,
    /// Pseudo-random values, reproducible for the same seed.
    Seeded(u64),
}

/// Cosmetic variation applied to one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRenderParams {
    /// Horizontal shift as a fraction of the content width.
    pub offset_x: f32,
    /// Vertical shift as a fraction of the content height.
    pub offset_y: f32,
    /// Growth factor about the frame center.
    pub overlap_scale: f32,
}

impl FrameRenderParams {
    pub const NEUTRAL: FrameRenderParams = FrameRenderParams {
        offset_x: 0.0,
        offset_y: 0.0,
        overlap_scale: 1.0,
    };

    /// Parameters for `count` frames.
    ///
    /// Jitter is drawn from `-max_jitter..=max_jitter` and overlap from
    /// `min_overlap_scale..=max_overlap_scale`.
    pub fn generate(count: usize, policy: JitterPolicy, config: &CollageConfig) -> Vec<Self> {
        let min_overlap = config.min_overlap_scale;
        let max_overlap = config.max_overlap_scale.max(min_overlap);
        let jitter = config.max_jitter.max(0.0);

        match policy {
            JitterPolicy::None => vec![
                Self {
                    overlap_scale: min_overlap,
                    ..Self::NEUTRAL
                };
                count
            ],
            JitterPolicy::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                (0..count)
                    .map(|_| Self {
                        offset_x: rng.gen_range(-jitter..=jitter),
                        offset_y: rng.gen_range(-jitter..=jitter),
                        overlap_scale: rng.gen_range(min_overlap..=max_overlap),
                    })
                    .collect()
            }
        }
    }
}

/// Pixel rects of one frame at every step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayout {
    /// Fraction mapped into the content area.
    pub base: Rect,
    /// `base` shifted by the jitter.
    pub offset: Rect,
    /// `offset` grown about its center; the photo is drawn here.
    pub rect: Rect,
}

/// Content area of the collage canvas: the canvas inset by the padding.
pub fn content_rect(config: &CollageConfig) -> Rect {
    Rect::new(
        config.padding,
        config.padding,
        config.canvas_width as f32 - config.padding * 2.0,
        config.canvas_height as f32 - config.padding * 2.0,
    )
}

/// Lay out every frame of `template` inside `content`.
///
/// Frames without an entry in `params` use [`FrameRenderParams::NEUTRAL`].
pub fn layout_frames(
    template: &CollageTemplate,
    content: Rect,
    params: &[FrameRenderParams],
) -> Vec<FrameLayout> {
    template
        .frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            let p = params.get(i).copied().unwrap_or(FrameRenderParams::NEUTRAL);
            let base = frame.to_rect(content);
            let offset = base.offset_by(p.offset_x * content.width, p.offset_y * content.height);
            FrameLayout {
                base,
                offset,
                rect: offset.scaled_about_center(p.overlap_scale),
            }
        })
        .collect()
}


// ============================================================================
// Property-Based Tests
// ============================================================================
