//! Taquilla WASM - WebAssembly bindings for the Taquilla compositing engine
//!
//! This crate exposes taquilla-core to JavaScript/TypeScript so a web editor
//! can preview curved text and export composites and collages.
//!
//! # Module Structure
//!
//! - `types` - RGBA image wrapper passed across the boundary
//! - `compose` - Font, sticker and filter registries plus composite export
//! - `collage` - Template catalog and collage rendering
//! - `geometry` - Drawn-path simplification and curved-text layout
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsRgbaImage, JsFontLibrary, JsStickerSet, JsFilterRegistry, render_composite } from '@taquilla/wasm';
//!
//! await init();
//!
//! const base = new JsRgbaImage(width, height, rgbaBytes);
//! const output = render_composite(base, snapshot, fonts, stickers, filters, false, null);
//! ```

use wasm_bindgen::prelude::*;

mod collage;
mod compose;
mod geometry;
mod logger;
mod types;

pub use collage::{collage_templates, JsCollageBuilder};
pub use compose::{
    prepare_share_image, render_composite, JsFilterRegistry, JsFontLibrary, JsStickerSet,
};
pub use geometry::{layout_curved, optimal_font_size, path_length, simplify_path};
pub use types::JsRgbaImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Route engine logs at `level` ("error", "warn", "info", "debug", "trace")
/// to the browser console.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter: log::LevelFilter = level
        .parse()
        .map_err(|_| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    log::set_max_level(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
