//! Raster target for compositing, backed by a tiny-skia pixmap.
//!
//! `image::RgbaImage` stores straight alpha while tiny-skia works on
//! premultiplied pixels, so conversion happens once on the way in
//! ([`Canvas::from_image`]) and once on the way out ([`Canvas::into_image`]).

use crate::geometry::Rect;
use crate::Rgba;
use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, Mask, Paint, Path, PathBuilder, Pixmap, PixmapPaint,
    Transform,
};

/// Control point distance for approximating a quarter circle with a cubic.
const BEZIER_K: f32 = 0.552_284_8;

/// Output raster being composited.
pub struct Canvas {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Canvas {
    /// Transparent canvas. `None` for zero or oversized dimensions.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    /// Canvas holding a copy of `image`.
    pub fn from_image(image: &RgbaImage) -> Option<Self> {
        Some(Self {
            pixmap: image_to_pixmap(image)?,
        })
    }

    /// Convert the composited pixels back to straight alpha.
    pub fn into_image(self) -> RgbaImage {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(width, height, data).unwrap_or_else(|| RgbaImage::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA value of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Replace every pixel with `color`.
    pub fn fill(&mut self, color: Rgba) {
        self.pixmap.fill(color.to_skia());
    }

    /// Fill `path` after applying `transform`.
    pub fn fill_path(&mut self, path: &Path, color: Rgba, transform: Transform) {
        if color.is_invisible() {
            return;
        }
        let paint = solid_paint(color);
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, transform, None);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba, transform: Transform) {
        if let Some(path) = rect.to_skia().map(PathBuilder::from_rect) {
            self.fill_path(&path, color, transform);
        }
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Rgba, transform: Transform) {
        if let Some(path) = rounded_rect_path(rect, radius) {
            self.fill_path(&path, color, transform);
        }
    }

    /// Draw `image` stretched into `dest`, rotated by `rotation_degrees` about
    /// the center of `dest`, optionally clipped to `clip`.
    pub fn draw_image(
        &mut self,
        image: &RgbaImage,
        dest: Rect,
        rotation_degrees: f32,
        clip: Option<Rect>,
    ) {
        if image.width() == 0 || image.height() == 0 || dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let Some(source) = image_to_pixmap(image) else {
            return;
        };

        let center = dest.center();
        let transform = Transform::from_scale(
            dest.width / image.width() as f32,
            dest.height / image.height() as f32,
        )
        .post_translate(dest.x, dest.y)
        .post_concat(Transform::from_rotate_at(
            rotation_degrees,
            center.x,
            center.y,
        ));

        let mask = match clip {
            Some(rect) => match self.clip_mask(rect) {
                Some(mask) => Some(mask),
                // Clip rect entirely degenerate: nothing visible
                None => return,
            },
            None => None,
        };

        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, mask.as_ref());
    }

    fn clip_mask(&self, rect: Rect) -> Option<Mask> {
        let path = PathBuilder::from_rect(rect.to_skia()?);
        let mut mask = Mask::new(self.width(), self.height())?;
        mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
        Some(mask)
    }
}

fn solid_paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

fn image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Rectangle with quarter-circle corners. The radius is clamped to half the
/// shorter side; a non-positive radius gives square corners.
pub fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    if r <= 0.0 {
        return rect.to_skia().map(PathBuilder::from_rect);
    }

    let (left, top, right, bottom) = (rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y());
    let k = r * BEZIER_K;

    let mut pb = PathBuilder::new();
    pb.move_to(left + r, top);
    pb.line_to(right - r, top);
    pb.cubic_to(right - r + k, top, right, top + r - k, right, top + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(left + r, bottom);
    pb.cubic_to(left + r - k, bottom, left, bottom - r + k, left, bottom - r);
    pb.line_to(left, top + r);
    pb.cubic_to(left, top + r - k, left + r - k, top, left + r, top);
    pb.close();
    pb.finish()
}
