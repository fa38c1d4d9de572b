//! Collage rasterization.

use super::layout::{content_rect, layout_frames, FrameRenderParams, JitterPolicy};
use super::CollageTemplate;
use crate::canvas::Canvas;
use crate::compose::RenderError;
use crate::config::CollageConfig;
use crate::geometry::{Rect, Size};
use crate::shadow::{draw_shadow_layers, fringe_preset, ShadowSpec};
use image::RgbaImage;
use tiny_skia::{PathBuilder, Transform};

/// Plus-sign bar thickness relative to the icon side.
const PLUS_THICKNESS: f32 = 0.16;

/// Draws templates filled with photos onto a fixed-size canvas.
#[derive(Debug, Clone)]
pub struct CollageComposer {
    config: CollageConfig,
    fringe: Vec<ShadowSpec>,
}

impl Default for CollageComposer {
    fn default() -> Self {
        Self::new(CollageConfig::default())
    }
}

impl CollageComposer {
    pub fn new(config: CollageConfig) -> Self {
        Self {
            config,
            fringe: fringe_preset(),
        }
    }

    pub fn config(&self) -> &CollageConfig {
        &self.config
    }

    /// Render `template` with `photos[i]` in frame `i`.
    ///
    /// Missing entries and `None` entries get a placeholder; extra photos are
    /// ignored.
    pub fn compose(
        &self,
        template: &CollageTemplate,
        photos: &[Option<RgbaImage>],
        policy: JitterPolicy,
    ) -> Result<RgbaImage, RenderError> {
        let (width, height) = (self.config.canvas_width, self.config.canvas_height);
        let mut canvas =
            Canvas::new(width, height).ok_or(RenderError::CanvasAllocation { width, height })?;
        canvas.fill(self.config.background);

        let params = FrameRenderParams::generate(template.frames.len(), policy, &self.config);
        let frames = layout_frames(template, content_rect(&self.config), &params);
        log::debug!(
            "Composing collage '{}' with {} frames ({:?})",
            template.name,
            frames.len(),
            policy
        );

        for (index, frame) in frames.iter().enumerate() {
            match photos.get(index).and_then(Option::as_ref) {
                Some(photo) if photo.width() > 0 && photo.height() > 0 => {
                    self.draw_photo(&mut canvas, photo, frame.rect)
                }
                _ => self.draw_placeholder(&mut canvas, frame.rect),
            }
        }

        Ok(canvas.into_image())
    }

    fn draw_photo(&self, canvas: &mut Canvas, photo: &RgbaImage, rect: Rect) {
        if let Some(path) = rect.to_skia().map(PathBuilder::from_rect) {
            draw_shadow_layers(canvas, &path, &self.fringe, 1.0, Transform::identity());
        }
        let dest = rect.aspect_fill(Size::from_pixels(photo.width(), photo.height()));
        canvas.draw_image(photo, dest, 0.0, Some(rect));
    }

    fn draw_placeholder(&self, canvas: &mut Canvas, rect: Rect) {
        canvas.fill_rect(rect, self.config.placeholder_color, Transform::identity());

        let side = rect.width.min(rect.height) * self.config.placeholder_icon_ratio;
        let thickness = side * PLUS_THICKNESS;
        let center = rect.center();
        let color = self.config.placeholder_icon_color;
        canvas.fill_rounded_rect(
            Rect::centered_at(center, Size::new(side, thickness)),
            thickness / 2.0,
            color,
            Transform::identity(),
        );
        canvas.fill_rounded_rect(
            Rect::centered_at(center, Size::new(thickness, side)),
            thickness / 2.0,
            color,
            Transform::identity(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collage::templates_for;
    use image::Rgba as Px;

    fn small_config() -> CollageConfig {
        CollageConfig {
            canvas_width: 240,
            canvas_height: 320,
            padding: 20.0,
            ..CollageConfig::default()
        }
    }

    #[test]
    fn test_default_canvas_size_and_background() {
        let composer = CollageComposer::default();
        let template = &templates_for(2)[0];
        let output = composer.compose(template, &[], JitterPolicy::None).unwrap();
        assert_eq!(output.dimensions(), (1080, 1440));
        // 0.20 * 255 = 51, 0.22 * 255 = 56
        assert_eq!(output.get_pixel(5, 5).0, [51, 51, 56, 255]);
    }

    #[test]
    fn test_photo_fills_its_frame() {
        let composer = CollageComposer::new(small_config());
        let template = &templates_for(2)[0];
        let red = RgbaImage::from_pixel(30, 10, Px([255, 0, 0, 255]));
        let blue = RgbaImage::from_pixel(10, 30, Px([0, 0, 255, 255]));
        let output = composer
            .compose(template, &[Some(red), Some(blue)], JitterPolicy::None)
            .unwrap();

        // Content 200x280 at (20, 20); frames split at x = 120
        assert_eq!(output.get_pixel(30, 30).0, [255, 0, 0, 255]);
        assert_eq!(output.get_pixel(110, 290).0, [255, 0, 0, 255]);
        assert_eq!(output.get_pixel(130, 30).0, [0, 0, 255, 255]);
        assert_eq!(output.get_pixel(210, 290).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_fringe_shadow_below_right() {
        let composer = CollageComposer::new(small_config());
        let template = &templates_for(2)[1];
        let photo = RgbaImage::from_pixel(4, 4, Px([255, 255, 255, 255]));
        let output = composer
            .compose(template, &[None, Some(photo)], JitterPolicy::None)
            .unwrap();

        // Second frame spans (20, 160)..(220, 300); its black far shadow
        // reaches 18px past the right edge
        assert_eq!(output.get_pixel(235, 250).0, [0, 0, 0, 255]);
        // Cyan ring between 6 and 12 px past the edge
        assert_eq!(output.get_pixel(228, 250).0, [0, 255, 255, 255]);
    }

    #[test]
    fn test_missing_photo_gets_placeholder() {
        let composer = CollageComposer::new(small_config());
        let template = &templates_for(2)[0];
        let output = composer.compose(template, &[None], JitterPolicy::None).unwrap();

        let background = output.get_pixel(5, 5).0;
        let frame_fill = output.get_pixel(30, 30).0;
        let icon = output.get_pixel(70, 160).0;
        assert_ne!(frame_fill, background);
        assert!(icon[0] > frame_fill[0], "plus icon should be lighter than the fill");
    }

    #[test]
    fn test_seeded_collage_is_reproducible() {
        let composer = CollageComposer::new(small_config());
        let template = &templates_for(3)[0];
        let photos = vec![Some(RgbaImage::from_pixel(8, 8, Px([200, 100, 0, 255]))); 3];
        let a = composer.compose(template, &photos, JitterPolicy::Seeded(9)).unwrap();
        let b = composer.compose(template, &photos, JitterPolicy::Seeded(9)).unwrap();
        assert_eq!(a, b);
    }
}
