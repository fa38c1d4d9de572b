//! Sticker layer.

use super::Compositor;
use crate::canvas::Canvas;
use crate::geometry::{Rect, Size};
use crate::session::StickerElement;

/// Square box a sticker occupies in output space, before rotation.
pub(super) fn sticker_frame(element: &StickerElement, base_size: f32, scale: f32) -> Rect {
    let side = base_size * element.effective_scale() * scale;
    Rect::centered_at(element.position.scaled(scale), Size::new(side, side))
}

impl Compositor<'_> {
    pub(super) fn draw_sticker(&self, canvas: &mut Canvas, element: &StickerElement, scale: f32) {
        let Some(image) = self.stickers.load(&element.sticker) else {
            log::warn!("Sticker {:?} unavailable, skipping", element.sticker);
            return;
        };

        let frame = sticker_frame(element, self.config.sticker_base_size, scale);
        let dest = frame.aspect_fit(Size::from_pixels(image.width(), image.height()));
        canvas.draw_image(&image, dest, element.rotation_degrees, None);
    }
}
