//! Collage WASM bindings.
//!
//! ```typescript
//! const templates = collage_templates(3);   // [{ name, photo_count, frames }]
//! const builder = new JsCollageBuilder(3, 0);
//! builder.set_photo(0, first);
//! builder.set_photo(2, third);              // frame 1 gets a placeholder
//! const collage = builder.compose(BigInt(42));
//! ```

use crate::types::JsRgbaImage;
use image::RgbaImage;
use taquilla_core::collage::templates_for;
use taquilla_core::{CollageComposer, CollageTemplate, EngineConfig, JitterPolicy};
use wasm_bindgen::prelude::*;

/// Templates for `photo_count` photos as plain objects; empty outside 2-6.
#[wasm_bindgen]
pub fn collage_templates(photo_count: usize) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(templates_for(photo_count))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Collects photos for one template, then renders the collage.
#[wasm_bindgen]
pub struct JsCollageBuilder {
    template: &'static CollageTemplate,
    photos: Vec<Option<RgbaImage>>,
    composer: CollageComposer,
}

#[wasm_bindgen]
impl JsCollageBuilder {
    /// Start a collage from template `template_index` of the `photo_count`
    /// group.
    ///
    /// # Errors
    /// Returns an error if no such template exists, or `config_json` is not
    /// a valid `EngineConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        photo_count: usize,
        template_index: usize,
        config_json: Option<String>,
    ) -> Result<JsCollageBuilder, JsValue> {
        let config = match config_json {
            Some(json) => {
                EngineConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => EngineConfig::default(),
        };
        Self::with_config(photo_count, template_index, config)
    }

    #[wasm_bindgen(getter)]
    pub fn template_name(&self) -> String {
        self.template.name.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn frame_count(&self) -> usize {
        self.template.frames.len()
    }

    /// Assign a photo to frame `index`, replacing any previous one.
    pub fn set_photo(&mut self, index: usize, photo: &JsRgbaImage) -> Result<(), JsValue> {
        let slot = self
            .photos
            .get_mut(index)
            .ok_or_else(|| JsValue::from_str(&format!("Frame {} out of range", index)))?;
        *slot = Some(photo.to_image()?);
        Ok(())
    }

    /// Leave frame `index` empty so it renders as a placeholder.
    pub fn clear_photo(&mut self, index: usize) {
        if let Some(slot) = self.photos.get_mut(index) {
            *slot = None;
        }
    }

    /// Render the collage; pass a seed for jittered, reproducible output.
    pub fn compose(&self, seed: Option<u64>) -> Result<JsRgbaImage, JsValue> {
        let policy = seed.map_or(JitterPolicy::None, JitterPolicy::Seeded);
        self.composer
            .compose(self.template, &self.photos, policy)
            .map(JsRgbaImage::from_image)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn free(self) {}
}

impl JsCollageBuilder {
    fn with_config(
        photo_count: usize,
        template_index: usize,
        config: EngineConfig,
    ) -> Result<JsCollageBuilder, JsValue> {
        let template = templates_for(photo_count).get(template_index).ok_or_else(|| {
            JsValue::from_str(&format!(
                "No template {} for {} photos",
                template_index, photo_count
            ))
        })?;
        Ok(JsCollageBuilder {
            template,
            photos: vec![None; template.frames.len()],
            composer: CollageComposer::new(config.collage),
        })
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_collage_templates_array() {
        let templates = collage_templates(5).unwrap();
        let array = js_sys::Array::from(&templates);
        assert_eq!(array.length(), 3);
    }

    #[wasm_bindgen_test]
    fn test_collage_templates_out_of_range() {
        let templates = collage_templates(9).unwrap();
        assert_eq!(js_sys::Array::from(&templates).length(), 0);
    }

    #[wasm_bindgen_test]
    fn test_unknown_template_is_rejected() {
        assert!(JsCollageBuilder::new(2, 10, None).is_err());
        assert!(JsCollageBuilder::new(7, 0, None).is_err());
    }

    #[wasm_bindgen_test]
    fn test_set_photo_out_of_range() {
        let mut builder = JsCollageBuilder::new(2, 0, None).unwrap();
        let photo = JsRgbaImage::new(1, 1, vec![0, 0, 0, 255]).unwrap();
        assert!(builder.set_photo(0, &photo).is_ok());
        assert!(builder.set_photo(2, &photo).is_err());
    }
}
