//! Straight text layer.

use super::Compositor;
use crate::canvas::Canvas;
use crate::geometry::{Point, Rect, Size};
use crate::session::TextElement;
use crate::shadow::draw_with_shadows;
use crate::text::TextMeasurer;
use crate::Rgba;
use tiny_skia::Transform;

/// Output-space geometry of one straight text element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledTextLayout {
    /// `font_size * element.scale * scale`
    pub font_size: f32,
    /// Element position in output space.
    pub center: Point,
    /// Measured text box, centered on `center`.
    pub text_rect: Rect,
    /// Text box grown by the scaled padding on every side.
    pub background: Rect,
    pub corner_radius: f32,
}

impl ScaledTextLayout {
    /// Map `element` to output space at `scale`. `padding` is the horizontal
    /// and vertical background padding in display units.
    pub fn compute(
        element: &TextElement,
        scale: f32,
        padding: Size,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let font_size = element.font_size * element.effective_scale() * scale;
        let center = element.position.scaled(scale);
        let measured = measurer.measure(&element.text, &element.font, font_size);
        let text_rect = Rect::centered_at(center, measured);
        let background =
            text_rect.outset(padding.width * scale, padding.height * scale);

        Self {
            font_size,
            center,
            text_rect,
            background,
            corner_radius: element.corner_radius * scale,
        }
    }
}

impl Compositor<'_> {
    pub(super) fn draw_text(&self, canvas: &mut Canvas, element: &TextElement, scale: f32) {
        if element.text.is_empty() {
            return;
        }

        let layout =
            ScaledTextLayout::compute(element, scale, self.config.text_padding, self.glyphs);

        if element.background_opacity > 0.0 {
            let fill = Rgba::BLACK.with_alpha(element.background_opacity.min(1.0));
            canvas.fill_rounded_rect(
                layout.background,
                layout.corner_radius,
                fill,
                Transform::identity(),
            );
        }

        let Some(path) = self
            .glyphs
            .text_path(&element.text, &element.font, layout.font_size)
        else {
            log::warn!("No outlines for text '{}', skipping glyphs", element.text);
            return;
        };

        let transform = Transform::from_translate(layout.text_rect.x, layout.text_rect.y);
        draw_with_shadows(
            canvas,
            &path,
            &element.shadows,
            scale,
            transform,
            element.color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::BoxGlyphs;

    #[test]
    fn test_layout_scales_font_and_padding() {
        let mut element = TextElement::new("ABCD", Point::new(10.0, 20.0));
        element.font_size = 20.0;
        element.set_scale(1.5);

        let layout = ScaledTextLayout::compute(
            &element,
            2.0,
            Size::new(12.0, 6.0),
            &BoxGlyphs::proportional(0.5),
        );

        assert_eq!(layout.font_size, 60.0);
        assert_eq!(layout.center, Point::new(20.0, 40.0));
        // 4 chars * 30 wide, 72 tall
        assert_eq!(layout.text_rect.size(), Size::new(120.0, 72.0));
        assert_eq!(layout.background.size(), Size::new(168.0, 96.0));
        assert_eq!(layout.background.center(), layout.center);
        assert_eq!(layout.corner_radius, 16.0);
    }

    #[test]
    fn test_layout_uses_clamped_scale() {
        let mut element = TextElement::new("A", Point::ZERO);
        element.scale = 10.0;
        let layout =
            ScaledTextLayout::compute(&element, 1.0, Size::ZERO, &BoxGlyphs::fixed(10.0));
        assert_eq!(layout.font_size, element.font_size * 4.0);
    }
}
