//! Engine configuration.
//!
//! Every tunable constant of the compositor and the collage builder lives in
//! [`EngineConfig`]. Defaults reproduce the app's look; JSON overrides only
//! need the fields they change:
//!
//! ```ignore
//! let config = EngineConfig::from_json(r#"{"share_max_edge": 1080}"#)?;
//! assert_eq!(config.library_max_edge, 2048);
//! ```

use crate::geometry::Size;
use crate::shadow::ShadowSpec;
use crate::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document is malformed or has wrongly typed fields
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its usable range
    #[error("Invalid configuration value for {field}: {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}

/// Top-level engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest output edge when saving to the photo library.
    pub library_max_edge: u32,
    /// Longest output edge when exporting for sharing.
    pub share_max_edge: u32,
    /// Display size assumed when the preview was never laid out.
    pub fallback_display_size: Size,
    /// Background padding around straight text (horizontal, vertical).
    pub text_padding: Size,
    /// Side of a sticker at scale 1, in display units.
    pub sticker_base_size: f32,
    /// Minimum point spacing kept when simplifying a drawn path.
    pub path_simplify_tolerance: f32,
    pub badge: BadgeConfig,
    pub collage: CollageConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            library_max_edge: 2048,
            share_max_edge: 1920,
            fallback_display_size: Size::new(390.0, 506.0),
            text_padding: Size::new(12.0, 6.0),
            sticker_base_size: 80.0,
            path_simplify_tolerance: 5.0,
            badge: BadgeConfig::default(),
            collage: CollageConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON document over the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value can be used without producing degenerate
    /// output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.library_max_edge == 0 {
            return Err(out_of_range("library_max_edge", "must be positive"));
        }
        if self.share_max_edge == 0 {
            return Err(out_of_range("share_max_edge", "must be positive"));
        }
        if self.fallback_display_size.is_degenerate() {
            return Err(out_of_range(
                "fallback_display_size",
                "must be finite and positive",
            ));
        }
        if self.sticker_base_size.is_nan() || self.sticker_base_size <= 0.0 {
            return Err(out_of_range("sticker_base_size", "must be positive"));
        }
        if self.path_simplify_tolerance < 0.0 {
            return Err(out_of_range("path_simplify_tolerance", "must not be negative"));
        }
        self.collage.validate()
    }
}

fn out_of_range(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::OutOfRange { field, reason }
}

/// Metrics of the weather and location badges, in display units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    /// Distance from the canvas edges.
    pub padding: f32,
    /// Extra inset of the location badge.
    pub location_inset: f32,
    pub icon_size: f32,
    /// Face of the temperature, captions and location details.
    pub display_font: String,
    /// Face of the neighborhood line.
    pub bold_font: String,
    pub temperature_font_size: f32,
    pub caption_font_size: f32,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub neighborhood_font_size: f32,
    pub detail_font_size: f32,
    pub detail_color: Rgba,
    pub location_line_spacing: f32,
    pub shadow: ShadowSpec,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            location_inset: 16.0,
            icon_size: 48.0,
            display_font: "Ari-W9500Display".to_string(),
            bold_font: "Ari-W9500Bold".to_string(),
            temperature_font_size: 40.0,
            caption_font_size: 12.0,
            horizontal_spacing: 12.0,
            vertical_spacing: 8.0,
            neighborhood_font_size: 22.0,
            detail_font_size: 14.0,
            detail_color: Rgba::WHITE.with_alpha(0.9),
            location_line_spacing: 6.0,
            shadow: ShadowSpec::soft(Rgba::BLACK.with_alpha(0.5), 8.0, 0.0, 4.0),
        }
    }
}

/// Collage canvas and cosmetic variation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollageConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Margin between the canvas edge and the content area.
    pub padding: f32,
    pub background: Rgba,
    /// Largest jitter, as a fraction of the content size, in either direction.
    pub max_jitter: f32,
    pub min_overlap_scale: f32,
    pub max_overlap_scale: f32,
    pub placeholder_color: Rgba,
    pub placeholder_icon_color: Rgba,
    /// Placeholder icon side as a fraction of the frame's shorter side.
    pub placeholder_icon_ratio: f32,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1080,
            canvas_height: 1440,
            padding: 80.0,
            background: Rgba::rgb(0.20, 0.20, 0.22),
            max_jitter: 0.01,
            min_overlap_scale: 1.0,
            max_overlap_scale: 1.04,
            placeholder_color: Rgba::rgb(0.5, 0.5, 0.5).with_alpha(0.2),
            placeholder_icon_color: Rgba::WHITE.with_alpha(0.6),
            placeholder_icon_ratio: 0.15,
        }
    }
}

impl CollageConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(out_of_range("collage.canvas", "must be positive"));
        }
        let content_w = self.canvas_width as f32 - 2.0 * self.padding;
        let content_h = self.canvas_height as f32 - 2.0 * self.padding;
        if self.padding < 0.0 || content_w <= 0.0 || content_h <= 0.0 {
            return Err(out_of_range(
                "collage.padding",
                "must leave a non-empty content area",
            ));
        }
        if self.max_jitter < 0.0 {
            return Err(out_of_range("collage.max_jitter", "must not be negative"));
        }
        if self.min_overlap_scale.is_nan()
            || self.min_overlap_scale <= 0.0
            || self.min_overlap_scale > self.max_overlap_scale
        {
            return Err(out_of_range(
                "collage.overlap_scale",
                "min must be positive and not exceed max",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(
            r#"{"share_max_edge": 1080, "collage": {"padding": 40.0}}"#,
        )
        .unwrap();

        assert_eq!(config.share_max_edge, 1080);
        assert_eq!(config.library_max_edge, 2048);
        assert_eq!(config.collage.padding, 40.0);
        assert_eq!(config.collage.canvas_width, 1080);
        assert_eq!(config.badge, BadgeConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_zero_export_edge() {
        let err = EngineConfig::from_json(r#"{"library_max_edge": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "library_max_edge",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_degenerate_fallback_size() {
        let err = EngineConfig::from_json(
            r#"{"fallback_display_size": {"width": 0.0, "height": 100.0}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("fallback_display_size"));
    }

    #[test]
    fn test_rejects_inverted_overlap_range() {
        let mut config = EngineConfig::default();
        config.collage.min_overlap_scale = 1.1;
        config.collage.max_overlap_scale = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_padding_larger_than_canvas() {
        let mut config = EngineConfig::default();
        config.collage.padding = 600.0;
        assert!(config.validate().is_err());
    }
}
