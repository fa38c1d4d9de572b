//! Compositing WASM bindings.
//!
//! The host registers fonts, stickers and color cubes once, then renders any
//! number of session snapshots against them.
//!
//! # Example
//!
//! ```typescript
//! const fonts = new JsFontLibrary();
//! fonts.register("Ari-W9500Display", displayBytes);
//!
//! const stickers = new JsStickerSet();
//! stickers.insert_local("3", sunIcon);
//!
//! const filters = new JsFilterRegistry();
//! const output = render_composite(base, snapshot, fonts, stickers, filters, false, null);
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(output.pixels()), output.width), 0, 0);
//! ```

use crate::types::JsRgbaImage;
use taquilla_core::export::prepare_for_sharing;
use taquilla_core::sticker::ResolvedStickers;
use taquilla_core::{
    CompositeRequest, Compositor, EngineConfig, ExportTarget, FilterRegistry, FontLibrary,
    FontWeight, SessionSnapshot, StickerRef,
};
use wasm_bindgen::prelude::*;

/// Fonts available to text layers.
#[wasm_bindgen]
pub struct JsFontLibrary {
    inner: FontLibrary,
}

#[wasm_bindgen]
impl JsFontLibrary {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsFontLibrary {
        JsFontLibrary {
            inner: FontLibrary::new(),
        }
    }

    /// Register TrueType/OpenType bytes under `id`.
    pub fn register(&mut self, id: &str, bytes: Vec<u8>) -> Result<(), JsValue> {
        self.inner
            .register(id, bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_default(&mut self, id: &str) -> Result<(), JsValue> {
        self.inner
            .set_default(id)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Use `id` for text asking for the numeric CSS `weight` (100-900).
    pub fn set_weight_fallback(&mut self, weight: u16, id: &str) -> Result<(), JsValue> {
        self.inner
            .set_weight_fallback(weight_from_numeric(weight), id)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    pub fn free(self) {}
}

impl Default for JsFontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl JsFontLibrary {
    pub(crate) fn inner(&self) -> &FontLibrary {
        &self.inner
    }
}

/// Sticker and badge icon pixels, resolved ahead of rendering.
#[wasm_bindgen]
pub struct JsStickerSet {
    inner: ResolvedStickers,
}

#[wasm_bindgen]
impl JsStickerSet {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsStickerSet {
        JsStickerSet {
            inner: ResolvedStickers::new(),
        }
    }

    /// Add a bundled asset by name (weather icons use "1", "2" and "3").
    pub fn insert_local(&mut self, name: &str, image: &JsRgbaImage) -> Result<(), JsValue> {
        self.inner.insert(StickerRef::local(name), image.to_image()?);
        Ok(())
    }

    /// Add a downloaded remote sticker by URL.
    pub fn insert_remote(&mut self, url: &str, image: &JsRgbaImage) -> Result<(), JsValue> {
        self.inner.insert(StickerRef::remote(url), image.to_image()?);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    pub fn free(self) {}
}

impl Default for JsStickerSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Named color filters. Starts with the built-in set.
#[wasm_bindgen]
pub struct JsFilterRegistry {
    inner: FilterRegistry,
}

#[wasm_bindgen]
impl JsFilterRegistry {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsFilterRegistry {
        JsFilterRegistry {
            inner: FilterRegistry::with_builtins(),
        }
    }

    /// Register an Adobe `.cube` 3D LUT under `id`.
    pub fn register_cube(&mut self, id: &str, cube: &str) -> Result<(), JsValue> {
        self.inner
            .register_cube(id, cube)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Registered filter ids, sorted.
    pub fn ids(&self) -> js_sys::Array {
        self.inner
            .ids()
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }

    pub fn free(self) {}
}

impl Default for JsFilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten `snapshot` over `base`.
///
/// # Arguments
/// * `snapshot` - A serialized `SessionSnapshot` (texts, curved texts,
///   stickers, overlays, filter id, display size)
/// * `share` - Clamp to the share edge limit instead of the library one
/// * `config_json` - Optional `EngineConfig` overrides as JSON
///
/// # Errors
/// Returns an error if the snapshot or config cannot be read, or the base
/// image is empty.
#[wasm_bindgen]
pub fn render_composite(
    base: &JsRgbaImage,
    snapshot: JsValue,
    fonts: &JsFontLibrary,
    stickers: &JsStickerSet,
    filters: &JsFilterRegistry,
    share: bool,
    config_json: Option<String>,
) -> Result<JsRgbaImage, JsValue> {
    let snapshot: SessionSnapshot = serde_wasm_bindgen::from_value(snapshot)
        .map_err(|e| JsValue::from_str(&format!("Invalid snapshot: {}", e)))?;
    let config = parse_config(config_json.as_deref())?;
    let base = base.to_image()?;

    let output = render_snapshot(&base, &snapshot, fonts, stickers, filters, share, config)?;
    Ok(JsRgbaImage::from_image(output))
}

/// Downscale an image to the share edge limit.
#[wasm_bindgen]
pub fn prepare_share_image(
    image: &JsRgbaImage,
    config_json: Option<String>,
) -> Result<JsRgbaImage, JsValue> {
    let config = parse_config(config_json.as_deref())?;
    let image = image.to_image()?;
    let shared = prepare_for_sharing(&image, &config).into_owned();
    Ok(JsRgbaImage::from_image(shared))
}

fn render_snapshot(
    base: &image::RgbaImage,
    snapshot: &SessionSnapshot,
    fonts: &JsFontLibrary,
    stickers: &JsStickerSet,
    filters: &JsFilterRegistry,
    share: bool,
    config: EngineConfig,
) -> Result<image::RgbaImage, JsValue> {
    let target = if share {
        ExportTarget::Share
    } else {
        ExportTarget::Library
    };
    let compositor =
        Compositor::new(&filters.inner, fonts.inner(), &stickers.inner).with_config(config);
    let request = CompositeRequest::new(base, snapshot).with_target(target);

    compositor
        .render(&request)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_config(json: Option<&str>) -> Result<EngineConfig, JsValue> {
    match json {
        Some(json) => EngineConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok(EngineConfig::default()),
    }
}

/// Round a CSS weight to the nearest named weight.
pub(crate) fn weight_from_numeric(weight: u16) -> FontWeight {
    match (weight.clamp(100, 900) + 50) / 100 {
        1 => FontWeight::UltraLight,
        2 => FontWeight::Thin,
        3 => FontWeight::Light,
        4 => FontWeight::Regular,
        5 => FontWeight::Medium,
        6 => FontWeight::Semibold,
        7 => FontWeight::Bold,
        8 => FontWeight::Heavy,
        _ => FontWeight::Black,
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn gray_image() -> JsRgbaImage {
        JsRgbaImage::new(4, 4, vec![128u8; 64]).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_render_composite_from_js_snapshot() {
        let snapshot = serde_wasm_bindgen::to_value(&SessionSnapshot::default()).unwrap();
        let output = render_composite(
            &gray_image(),
            snapshot,
            &JsFontLibrary::new(),
            &JsStickerSet::new(),
            &JsFilterRegistry::new(),
            false,
            None,
        )
        .unwrap();
        assert_eq!(output.width(), 4);
        assert_eq!(output.pixels(), vec![128u8; 64]);
    }

    #[wasm_bindgen_test]
    fn test_render_composite_rejects_bad_snapshot() {
        let result = render_composite(
            &gray_image(),
            JsValue::from_str("not a snapshot"),
            &JsFontLibrary::new(),
            &JsStickerSet::new(),
            &JsFilterRegistry::new(),
            false,
            None,
        );
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_render_composite_rejects_bad_config() {
        let snapshot = serde_wasm_bindgen::to_value(&SessionSnapshot::default()).unwrap();
        let result = render_composite(
            &gray_image(),
            snapshot,
            &JsFontLibrary::new(),
            &JsStickerSet::new(),
            &JsFilterRegistry::new(),
            false,
            Some("{".to_string()),
        );
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_font_register_rejects_garbage() {
        let mut fonts = JsFontLibrary::new();
        assert!(fonts.register("broken", vec![1, 2, 3]).is_err());
        assert!(!fonts.contains("broken"));
    }

    #[wasm_bindgen_test]
    fn test_filter_ids_array() {
        let filters = JsFilterRegistry::new();
        assert!(filters.ids().length() > 0);
    }
}
