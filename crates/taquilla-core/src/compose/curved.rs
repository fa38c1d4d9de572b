//! Curved text layer.

use super::Compositor;
use crate::canvas::Canvas;
use crate::curved::{layout_curved_text, CurvedLayout};
use crate::geometry::Point;
use crate::session::CurvedTextElement;
use tiny_skia::Transform;

/// Lay out `element` in output space: path and offset scaled by `scale`, font
/// size by `element.scale * scale`.
pub(super) fn scaled_curved_layout(
    element: &CurvedTextElement,
    scale: f32,
    compositor: &Compositor<'_>,
) -> (CurvedLayout, f32) {
    let path: Vec<Point> = element.path.iter().map(|p| p.scaled(scale)).collect();
    let font_size = element.font_size * element.effective_scale() * scale;
    let layout = layout_curved_text(&path, &element.text, &element.font, font_size, compositor.glyphs)
        .translated(element.offset.scaled(scale));
    (layout, font_size)
}

impl Compositor<'_> {
    pub(super) fn draw_curved_text(
        &self,
        canvas: &mut Canvas,
        element: &CurvedTextElement,
        scale: f32,
    ) {
        let (layout, font_size) = scaled_curved_layout(element, scale, self);
        if layout.is_empty() {
            log::debug!("Curved text '{}' has nothing to place", element.text);
            return;
        }

        let mut buf = [0u8; 4];
        for placement in &layout.placements {
            let glyph = placement.ch.encode_utf8(&mut buf);
            // Spaces have no outline
            let Some(path) = self.glyphs.text_path(glyph, &element.font, font_size) else {
                continue;
            };

            let transform = Transform::from_translate(
                -placement.width / 2.0,
                -layout.line_height / 2.0,
            )
            .post_concat(Transform::from_rotate(placement.angle.to_degrees()))
            .post_translate(placement.position.x, placement.position.y);

            canvas.fill_path(&path, element.color, transform);
        }
    }
}
