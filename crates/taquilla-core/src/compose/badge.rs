//! Weather and location badges.
//!
//! Both badges hug the bottom-right corner of the output. All metrics come
//! from [`BadgeConfig`] in display units and are multiplied by the export
//! scale. Text lines cast the badge drop shadow; the weather icon does not.
//!
//! ```text
//! Weather                          Location
//! +------+  +-------+              NEIGHBORHOOD
//! | icon |  | 28°C  |              12, marzo, 2025
//! +------+  +-------+              Santiago, Chile
//!     PROVIDENCIA
//! ```

use super::Compositor;
use crate::canvas::Canvas;
use crate::config::BadgeConfig;
use crate::geometry::{Rect, Size};
use crate::overlay::{LocationOverlay, WeatherOverlay};
use crate::shadow::draw_with_shadows;
use crate::sticker::StickerRef;
use crate::text::{FontSpec, FontWeight, TextMeasurer};
use crate::Rgba;
use tiny_skia::Transform;

/// One line of badge text placed in output space.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeLine {
    pub text: String,
    pub font: FontSpec,
    pub font_size: f32,
    pub color: Rgba,
    /// Measured box; the text is drawn from its top-left corner.
    pub rect: Rect,
}

impl BadgeLine {
    fn measured(
        text: String,
        font: FontSpec,
        font_size: f32,
        color: Rgba,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let size = measurer.measure(&text, &font, font_size);
        Self {
            text,
            font,
            font_size,
            color,
            rect: Rect::new(0.0, 0.0, size.width, size.height),
        }
    }

    fn placed_at(mut self, x: f32, y: f32) -> Self {
        self.rect.x = x;
        self.rect.y = y;
        self
    }
}

fn display_font(config: &BadgeConfig) -> FontSpec {
    FontSpec::custom(config.display_font.clone())
}

fn bold_font(config: &BadgeConfig) -> FontSpec {
    FontSpec::new(Some(config.bold_font.clone()), FontWeight::Bold)
}

/// Icon and temperature side by side, the uppercased location centered
/// beneath them.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherBadgeLayout {
    pub icon: Rect,
    pub temperature: BadgeLine,
    pub caption: BadgeLine,
}

impl WeatherBadgeLayout {
    pub fn compute(
        overlay: &WeatherOverlay,
        canvas: Size,
        scale: f32,
        config: &BadgeConfig,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let font = display_font(config);
        let icon_size = config.icon_size * scale;
        let h_spacing = config.horizontal_spacing * scale;
        let v_spacing = config.vertical_spacing * scale;
        let padding = config.padding * scale;

        let temperature = BadgeLine::measured(
            overlay.temperature.clone(),
            font.clone(),
            config.temperature_font_size * scale,
            Rgba::WHITE,
            measurer,
        );
        let caption = BadgeLine::measured(
            overlay.location.to_uppercase(),
            font,
            config.caption_font_size * scale,
            Rgba::WHITE,
            measurer,
        );

        let row_width = icon_size + h_spacing + temperature.rect.width;
        let max_width = row_width.max(caption.rect.width);
        let total_height = icon_size + v_spacing + caption.rect.height;

        let base_x = canvas.width - max_width - padding;
        let base_y = canvas.height - total_height - padding;

        let icon = Rect::new(
            base_x + (max_width - row_width) / 2.0,
            base_y,
            icon_size,
            icon_size,
        );
        let temperature_y = base_y + (icon_size - temperature.rect.height) / 2.0;
        let caption_x = base_x + (max_width - caption.rect.width) / 2.0;
        let caption_y = base_y + icon_size + v_spacing;

        Self {
            icon,
            temperature: temperature.placed_at(icon.max_x() + h_spacing, temperature_y),
            caption: caption.placed_at(caption_x, caption_y),
        }
    }
}

/// Three left-aligned lines: neighborhood, date, "city, country".
#[derive(Debug, Clone, PartialEq)]
pub struct LocationBadgeLayout {
    pub lines: [BadgeLine; 3],
}

impl LocationBadgeLayout {
    pub fn compute(
        overlay: &LocationOverlay,
        canvas: Size,
        scale: f32,
        config: &BadgeConfig,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let detail_size = config.detail_font_size * scale;
        let spacing = config.location_line_spacing * scale;
        let inset = (config.padding + config.location_inset) * scale;

        let lines = [
            BadgeLine::measured(
                overlay.neighborhood.to_uppercase(),
                bold_font(config),
                config.neighborhood_font_size * scale,
                Rgba::WHITE,
                measurer,
            ),
            BadgeLine::measured(
                overlay.date.clone(),
                display_font(config),
                detail_size,
                config.detail_color,
                measurer,
            ),
            BadgeLine::measured(
                overlay.city_line(),
                display_font(config),
                detail_size,
                config.detail_color,
                measurer,
            ),
        ];

        let max_width = lines.iter().map(|l| l.rect.width).fold(0.0, f32::max);
        let total_height = lines.iter().map(|l| l.rect.height).sum::<f32>() + spacing * 2.0;

        let base_x = canvas.width - max_width - inset;
        let mut y = canvas.height - total_height - inset;

        Self {
            lines: lines.map(|line| {
                let height = line.rect.height;
                let placed = line.placed_at(base_x, y);
                y += height + spacing;
                placed
            }),
        }
    }
}

impl Compositor<'_> {
    pub(super) fn draw_weather(&self, canvas: &mut Canvas, overlay: &WeatherOverlay, scale: f32) {
        let size = Size::from_pixels(canvas.width(), canvas.height());
        let layout = WeatherBadgeLayout::compute(overlay, size, scale, &self.config.badge, self.glyphs);

        let icon_ref = StickerRef::local(overlay.weather_type.icon_name());
        match self.stickers.load(&icon_ref) {
            Some(icon) => {
                let dest = layout.icon.aspect_fit(Size::from_pixels(icon.width(), icon.height()));
                canvas.draw_image(&icon, dest, 0.0, None);
            }
            None => log::warn!("Weather icon {:?} unavailable, drawing text only", icon_ref),
        }

        self.draw_badge_line(canvas, &layout.temperature, scale);
        self.draw_badge_line(canvas, &layout.caption, scale);
    }

    pub(super) fn draw_location(&self, canvas: &mut Canvas, overlay: &LocationOverlay, scale: f32) {
        let size = Size::from_pixels(canvas.width(), canvas.height());
        let layout =
            LocationBadgeLayout::compute(overlay, size, scale, &self.config.badge, self.glyphs);
        for line in &layout.lines {
            self.draw_badge_line(canvas, line, scale);
        }
    }

    fn draw_badge_line(&self, canvas: &mut Canvas, line: &BadgeLine, scale: f32) {
        let Some(path) = self.glyphs.text_path(&line.text, &line.font, line.font_size) else {
            log::warn!("No outlines for badge line '{}'", line.text);
            return;
        };
        draw_with_shadows(
            canvas,
            &path,
            std::slice::from_ref(&self.config.badge.shadow),
            scale,
            Transform::from_translate(line.rect.x, line.rect.y),
            line.color,
        );
    }
}
