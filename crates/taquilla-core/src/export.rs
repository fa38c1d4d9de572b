//! Handing finished images to the outside world.
//!
//! The engine never talks to a photo library or share sheet itself. Callers
//! implement [`OutputSink`]; [`deliver`] reports the outcome as a flag and
//! logs the reason on failure. There are no retries.

use crate::config::EngineConfig;
use crate::geometry::fit_within;
use image::{imageops, RgbaImage};
use std::borrow::Cow;
use thiserror::Error;

/// Errors reported by an output sink.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The user refused access to the destination
    #[error("Permission denied")]
    PermissionDenied,

    /// The destination cannot be reached right now
    #[error("Destination unavailable: {0}")]
    Unavailable(String),

    /// The destination rejected the image
    #[error("Delivery failed: {0}")]
    Failed(String),
}

/// Destination of composited images (photo library, share sheet, ...).
pub trait OutputSink {
    fn deliver(&mut self, image: &RgbaImage) -> Result<(), DeliveryError>;
}

impl<F> OutputSink for F
where
    F: FnMut(&RgbaImage) -> Result<(), DeliveryError>,
{
    fn deliver(&mut self, image: &RgbaImage) -> Result<(), DeliveryError> {
        self(image)
    }
}

/// Sink that keeps every delivered image in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    images: Vec<RgbaImage>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[RgbaImage] {
        &self.images
    }

    pub fn into_images(self) -> Vec<RgbaImage> {
        self.images
    }
}

impl OutputSink for MemorySink {
    fn deliver(&mut self, image: &RgbaImage) -> Result<(), DeliveryError> {
        self.images.push(image.clone());
        Ok(())
    }
}

/// Deliver `image` to `sink`, returning whether it succeeded.
pub fn deliver(sink: &mut dyn OutputSink, image: &RgbaImage) -> bool {
    match sink.deliver(image) {
        Ok(()) => {
            log::debug!("Delivered {}x{} image", image.width(), image.height());
            true
        }
        Err(e) => {
            log::warn!("Image delivery failed: {}", e);
            false
        }
    }
}

/// Downscale `image` to the share edge limit; smaller images are borrowed.
pub fn prepare_for_sharing<'a>(image: &'a RgbaImage, config: &EngineConfig) -> Cow<'a, RgbaImage> {
    let (width, height) = fit_within(image.width(), image.height(), config.share_max_edge);
    if (width, height) == image.dimensions() || width == 0 || height == 0 {
        return Cow::Borrowed(image);
    }
    Cow::Owned(imageops::resize(
        image,
        width,
        height,
        imageops::FilterType::Lanczos3,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::init_logger;

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        assert!(deliver(&mut sink, &RgbaImage::new(2, 3)));
        assert!(deliver(&mut sink, &RgbaImage::new(4, 1)));
        let sizes: Vec<_> = sink.images().iter().map(|i| i.dimensions()).collect();
        assert_eq!(sizes, vec![(2, 3), (4, 1)]);
    }

    #[test]
    fn test_failure_is_reported_not_retried() {
        init_logger();
        let mut attempts = 0;
        let mut sink = |_: &RgbaImage| -> Result<(), DeliveryError> {
            attempts += 1;
            Err(DeliveryError::PermissionDenied)
        };
        assert!(!deliver(&mut sink, &RgbaImage::new(1, 1)));
        assert_eq!(attempts, 1);
    }

    #[test]
    fn test_prepare_for_sharing() {
        let mut config = EngineConfig::default();
        config.share_max_edge = 50;

        let large = RgbaImage::new(200, 100);
        let shared = prepare_for_sharing(&large, &config);
        assert_eq!(shared.dimensions(), (50, 25));

        let small = RgbaImage::new(40, 30);
        assert!(matches!(prepare_for_sharing(&small, &config), Cow::Borrowed(_)));
    }
}
