//! Multi-photo collages.
//!
//! A [`CollageTemplate`] is a fixed list of frames expressed as fractions of
//! the collage content area. Composing a collage maps every frame to pixels,
//! nudges it by a small jitter, grows it about its center so neighbours
//! overlap, and draws the assigned photo aspect-filled inside it on top of a
//! color-fringe shadow. Frames without a photo get a placeholder.
//!
//! # Pipeline
//!
//! ```text
//! fraction --(content rect)--> base --(jitter)--> offset --(overlap)--> rect
//! ```

mod catalog;
mod layout;
mod render;

pub use catalog::{all_templates, templates_for};
pub use layout::{content_rect, layout_frames, FrameLayout, FrameRenderParams, JitterPolicy};
pub use render::CollageComposer;

use crate::geometry::Rect;
use serde::Serialize;

/// Frame rect relative to the content area, every component in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FractionalFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FractionalFrame {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check that every component lies in `0.0..=1.0`.
    pub fn is_normalized(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }

    /// Absolute rect inside `content`.
    pub fn to_rect(&self, content: Rect) -> Rect {
        Rect::new(
            content.x + self.x * content.width,
            content.y + self.y * content.height,
            self.width * content.width,
            self.height * content.height,
        )
    }
}

/// Named arrangement of photos.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollageTemplate {
    pub name: &'static str,
    pub photo_count: usize,
    pub frames: &'static [FractionalFrame],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rect_maps_into_content() {
        let content = Rect::new(80.0, 80.0, 920.0, 1280.0);
        let rect = FractionalFrame::new(0.5, 0.25, 0.5, 0.5).to_rect(content);
        assert_eq!(rect, Rect::new(540.0, 400.0, 460.0, 640.0));
    }

    #[test]
    fn test_is_normalized() {
        assert!(FractionalFrame::new(0.0, 0.0, 1.0, 1.0).is_normalized());
        assert!(!FractionalFrame::new(-0.1, 0.0, 0.5, 0.5).is_normalized());
        assert!(!FractionalFrame::new(0.0, 0.0, 1.2, 0.5).is_normalized());
    }
}
