//! Color filters applied to the base photo before compositing.
//!
//! Filters are looked up by id in a [`FilterRegistry`]. New looks are added by
//! registering another [`FilterApplier`]; the compositor only ever calls
//! [`FilterRegistry::apply`], which never fails.
//!
//! ## Built-in Filters
//! | Id | Effect |
//! |---|---|
//! | `none` | Unchanged copy |
//! | `sepia` | Sepia tone at intensity 0.8 |
//! | `vivid` | Saturation 1.5, contrast 1.1 |
//! | `80s` | Bloom, saturation 1.6, contrast 1.3, hue rotated 0.3 rad |
//!
//! `.cube` 3D LUTs are registered with [`FilterRegistry::register_cube`].

mod builtin;
mod cube;

pub use builtin::{Bloom, ColorControls, FilterChain, HueAdjust, Identity, SepiaTone};
pub use cube::{CubeLut, LutError};

use image::RgbaImage;
use std::collections::HashMap;
use thiserror::Error;

/// Id of the filter that leaves the photo untouched.
pub const NONE_FILTER: &str = "none";

/// Errors that can occur while applying a filter.
#[derive(Debug, Error)]
pub enum FilterError {
    /// No filter is registered under the id
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// The image has no pixels
    #[error("Cannot filter an empty image")]
    EmptyImage,

    /// A LUT filter could not be built
    #[error("LUT error: {0}")]
    Lut(#[from] LutError),
}

/// A color transform over a whole image.
pub trait FilterApplier: Send + Sync {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage, FilterError>;
}

impl<F> FilterApplier for F
where
    F: Fn(&RgbaImage) -> Result<RgbaImage, FilterError> + Send + Sync,
{
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage, FilterError> {
        self(image)
    }
}

/// Filters addressed by id.
#[derive(Default)]
pub struct FilterRegistry {
    filters: HashMap<String, Box<dyn FilterApplier>>,
}

impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

impl FilterRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the app's built-in looks.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(NONE_FILTER, Identity);
        registry.register("sepia", SepiaTone::new(0.8));
        registry.register("vivid", ColorControls::new(1.5, 1.1));
        registry.register(
            "80s",
            FilterChain::new()
                .then(Bloom::new(5.0, 0.5))
                .then(ColorControls::new(1.6, 1.3))
                .then(HueAdjust::new(0.3)),
        );
        registry
    }

    /// Add or replace a filter.
    pub fn register(&mut self, id: impl Into<String>, filter: impl FilterApplier + 'static) {
        self.filters.insert(id.into(), Box::new(filter));
    }

    /// Parse a `.cube` document and register it as a filter.
    pub fn register_cube(&mut self, id: impl Into<String>, cube: &str) -> Result<(), LutError> {
        let lut = CubeLut::parse(cube)?;
        self.register(id, lut);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.filters.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Apply the filter `id`, reporting failures.
    pub fn try_apply(&self, image: &RgbaImage, id: &str) -> Result<RgbaImage, FilterError> {
        let filter = self
            .filters
            .get(id)
            .ok_or_else(|| FilterError::UnknownFilter(id.to_string()))?;
        if image.width() == 0 || image.height() == 0 {
            return Err(FilterError::EmptyImage);
        }
        filter.apply(image)
    }

    /// Apply the filter `id`, falling back to an unchanged copy on failure.
    pub fn apply(&self, image: &RgbaImage, id: &str) -> RgbaImage {
        match self.try_apply(image, id) {
            Ok(filtered) => filtered,
            Err(e) => {
                log::warn!("Filter '{}' failed, using unfiltered image: {}", id, e);
                image.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::init_logger;
    use image::Rgba;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(4, 4, |x, y| Rgba([(x * 60) as u8, (y * 60) as u8, 128, 255]))
    }

    #[test]
    fn test_builtins_registered() {
        let registry = FilterRegistry::with_builtins();
        assert_eq!(registry.ids(), vec!["80s", "none", "sepia", "vivid"]);
    }

    #[test]
    fn test_none_is_identity() {
        let registry = FilterRegistry::with_builtins();
        let image = sample();
        assert_eq!(registry.apply(&image, NONE_FILTER), image);
    }

    #[test]
    fn test_builtins_change_pixels_and_keep_size() {
        let registry = FilterRegistry::with_builtins();
        let image = sample();
        for id in ["sepia", "vivid", "80s"] {
            let filtered = registry.try_apply(&image, id).unwrap();
            assert_eq!(filtered.dimensions(), image.dimensions());
            assert_ne!(filtered, image, "filter {} left the image unchanged", id);
        }
    }

    #[test]
    fn test_unknown_filter_falls_back() {
        init_logger();
        let registry = FilterRegistry::with_builtins();
        let image = sample();

        assert!(matches!(
            registry.try_apply(&image, "gritty"),
            Err(FilterError::UnknownFilter(_))
        ));
        assert_eq!(registry.apply(&image, "gritty"), image);
    }

    #[test]
    fn test_failing_filter_falls_back() {
        init_logger();
        let mut registry = FilterRegistry::new();
        registry.register("broken", |_: &RgbaImage| -> Result<RgbaImage, FilterError> {
            Err(FilterError::EmptyImage)
        });

        let image = sample();
        assert_eq!(registry.apply(&image, "broken"), image);
    }

    #[test]
    fn test_register_cube() {
        let mut registry = FilterRegistry::new();
        let identity = "LUT_3D_SIZE 2\n0 0 0\n1 0 0\n0 1 0\n1 1 0\n0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
        registry.register_cube("kodak", identity).unwrap();
        assert!(registry.contains("kodak"));

        assert!(registry.register_cube("lut2", "# empty\n").is_err());
        assert!(!registry.contains("lut2"));
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let registry = FilterRegistry::with_builtins();
        assert!(matches!(
            registry.try_apply(&RgbaImage::new(0, 0), "sepia"),
            Err(FilterError::EmptyImage)
        ));
    }
}
