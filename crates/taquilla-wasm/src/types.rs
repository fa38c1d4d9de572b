//! WASM-compatible wrapper types for image data.
//!
//! Images cross the JavaScript boundary as straight (non-premultiplied) RGBA,
//! 4 bytes per pixel in row-major order, which is what `ImageData` expects.

use image::RgbaImage;
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it into a
/// `Uint8Array`; call `free()` to release a large image early, otherwise the
/// wasm-bindgen finalizer cleans up.
#[wasm_bindgen]
pub struct JsRgbaImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRgbaImage {
    /// Create an image from dimensions and RGBA pixel data.
    ///
    /// # Errors
    /// Returns an error if `pixels.length != width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRgbaImage, JsValue> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(JsValue::from_str(&format!(
                "Expected {} bytes for a {}x{} RGBA image, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(JsRgbaImage {
            width,
            height,
            pixels,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// RGBA pixel data as a `Uint8Array` (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsRgbaImage {
    pub(crate) fn from_image(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        }
    }

    /// Copy into a core image, or `None` when the buffer length does not
    /// match the dimensions.
    fn core_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Copy into a core image. The length was checked on construction, so
    /// this only fails for wrappers built without the constructor.
    pub(crate) fn to_image(&self) -> Result<RgbaImage, JsValue> {
        self.core_image()
            .ok_or_else(|| JsValue::from_str("Pixel buffer does not match image dimensions"))
    }
}
