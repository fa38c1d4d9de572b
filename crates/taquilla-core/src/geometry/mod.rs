//! Geometry primitives and polyline utilities.
//!
//! Every operation here works in a single coordinate space. Callers that mix
//! display space and output space must scale explicitly with [`Point::scaled`].
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - `x` grows to the right, `y` grows downwards
//! - Angles are radians, measured with `atan2(dy, dx)`

mod path;
mod rect;

pub use path::{arc_length, build_smooth_path, point_at_distance, simplify, PathSample};
pub use rect::{fit_within, Rect};

use serde::{Deserialize, Serialize};

/// A point (or offset vector) in a 2D coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Multiply both coordinates by `factor`.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Translate by an offset.
    #[inline]
    pub fn translated(self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }
}

/// Ordered sequence of points drawn by the user.
pub type Polyline = Vec<Point>;

/// Width and height in a 2D coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size of a raster in pixels.
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    /// True when either dimension is zero, negative or not finite.
    ///
    /// Dividing by a degenerate size would push NaN or infinity through the
    /// export scale factor.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Width divided by height (0 for degenerate sizes).
    pub fn aspect_ratio(&self) -> f32 {
        if self.is_degenerate() {
            0.0
        } else {
            self.width / self.height
        }
    }

    /// Multiply both dimensions by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}
