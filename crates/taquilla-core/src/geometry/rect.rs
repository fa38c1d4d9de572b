//! Axis-aligned rectangles, aspect-fill placement and fit-within sizing.

use super::{Point, Size};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered_at(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn min_x(&self) -> f32 {
        self.x
    }

    pub fn min_y(&self) -> f32 {
        self.y
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn mid_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Translate the rectangle without changing its size.
    pub fn offset_by(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow or shrink the rectangle by `factor` keeping its center fixed.
    pub fn scaled_about_center(&self, factor: f32) -> Self {
        Self::centered_at(self.center(), self.size().scaled(factor))
    }

    /// Grow the rectangle by `dx` on the left and right and `dy` on the top
    /// and bottom.
    pub fn outset(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.x - dx,
            self.y - dy,
            self.width + dx * 2.0,
            self.height + dy * 2.0,
        )
    }

    /// Check whether `other` lies entirely inside this rectangle, allowing
    /// `epsilon` of floating point slack on every edge.
    pub fn contains_rect(&self, other: &Rect, epsilon: f32) -> bool {
        other.min_x() >= self.min_x() - epsilon
            && other.min_y() >= self.min_y() - epsilon
            && other.max_x() <= self.max_x() + epsilon
            && other.max_y() <= self.max_y() + epsilon
    }

    /// Compute where an image must be drawn to cover this rectangle.
    ///
    /// Aspect-fill: the image keeps its aspect ratio and is scaled so that it
    /// fully covers the frame, with the excess cropped symmetrically.
    ///
    /// - Image relatively wider than the frame: match the frame height and
    ///   shift left by half the overflow.
    /// - Otherwise: match the frame width and shift up by half the overflow.
    ///
    /// Degenerate image sizes return the frame itself.
    pub fn aspect_fill(&self, image: Size) -> Rect {
        if image.is_degenerate() || self.height <= 0.0 {
            return *self;
        }

        let image_aspect = image.aspect_ratio();
        let frame_aspect = self.width / self.height;

        if image_aspect > frame_aspect {
            let scaled_width = self.height * image_aspect;
            Rect::new(
                self.x - (scaled_width - self.width) / 2.0,
                self.y,
                scaled_width,
                self.height,
            )
        } else {
            let scaled_height = self.width / image_aspect;
            Rect::new(
                self.x,
                self.y - (scaled_height - self.height) / 2.0,
                self.width,
                scaled_height,
            )
        }
    }

    /// Largest rect with the image's aspect ratio that fits inside this one,
    /// centered. Degenerate image sizes return the frame itself.
    pub fn aspect_fit(&self, image: Size) -> Rect {
        if image.is_degenerate() || self.height <= 0.0 {
            return *self;
        }

        let factor = (self.width / image.width).min(self.height / image.height);
        Rect::centered_at(self.center(), image.scaled(factor))
    }

    /// Convert to a tiny-skia rectangle (`None` for empty or non-finite rects).
    pub fn to_skia(&self) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_xywh(self.x, self.y, self.width, self.height)
    }
}

/// Calculate dimensions that fit within `max_edge` while preserving aspect
/// ratio.
///
/// Downscale only: sizes already within the limit are returned unchanged.
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        // Landscape or square: constrain by width
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.max_x(), 110.0);
        assert_eq!(r.max_y(), 70.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_scaled_about_center_keeps_center() {
        let r = Rect::new(0.0, 0.0, 100.0, 200.0);
        let grown = r.scaled_about_center(1.1);
        assert!((grown.width - 110.0).abs() < 1e-4);
        assert!((grown.height - 220.0).abs() < 1e-4);
        assert!((grown.mid_x() - r.mid_x()).abs() < 1e-4);
        assert!((grown.mid_y() - r.mid_y()).abs() < 1e-4);
    }

    #[test]
    fn test_outset() {
        let r = Rect::new(10.0, 10.0, 20.0, 10.0).outset(12.0, 6.0);
        assert_eq!(r, Rect::new(-2.0, 4.0, 44.0, 22.0));
    }

    #[test]
    fn test_aspect_fill_wider_image() {
        // 2:1 image into a square frame -> crop left/right
        let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
        let draw = frame.aspect_fill(Size::new(400.0, 200.0));
        assert_eq!(draw, Rect::new(-50.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_aspect_fill_taller_image() {
        // 1:2 image into a square frame -> crop top/bottom
        let frame = Rect::new(10.0, 10.0, 100.0, 100.0);
        let draw = frame.aspect_fill(Size::new(200.0, 400.0));
        assert_eq!(draw, Rect::new(10.0, -40.0, 100.0, 200.0));
    }

    #[test]
    fn test_aspect_fill_same_aspect_is_identity() {
        let frame = Rect::new(5.0, 5.0, 300.0, 400.0);
        let draw = frame.aspect_fill(Size::new(1080.0, 1440.0));
        assert!((draw.width - 300.0).abs() < 1e-3);
        assert!((draw.height - 400.0).abs() < 1e-3);
        assert!((draw.x - 5.0).abs() < 1e-3);
        assert!((draw.y - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_aspect_fill_degenerate_image() {
        let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(frame.aspect_fill(Size::ZERO), frame);
    }

    #[test]
    fn test_aspect_fit_letterboxes() {
        let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
        let draw = frame.aspect_fit(Size::new(400.0, 200.0));
        assert_eq!(draw, Rect::new(0.0, 25.0, 100.0, 50.0));

        assert_eq!(frame.aspect_fit(Size::new(50.0, 50.0)), frame);
    }

    #[test]
    fn test_fit_within_landscape() {
        assert_eq!(fit_within(6000, 4000, 2048), (2048, 1365));
    }

    #[test]
    fn test_fit_within_portrait() {
        assert_eq!(fit_within(3000, 4000, 1920), (1440, 1920));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        assert_eq!(fit_within(1080, 1440, 2048), (1080, 1440));
    }

    #[test]
    fn test_fit_within_zero_input() {
        assert_eq!(fit_within(0, 0, 2048), (0, 0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
