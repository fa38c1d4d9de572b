//! Drawn-path and curved-text WASM bindings.
//!
//! Points travel as arrays of `{ x, y }` objects in display coordinates.
//! These calls let the editor preview curved text live, before anything is
//! composited.

use crate::compose::{weight_from_numeric, JsFontLibrary};
use taquilla_core::geometry::{arc_length, simplify};
use taquilla_core::text::calculate_optimal_font_size;
use taquilla_core::{layout_curved_text, CurvedLayout, FontSpec, Point};
use wasm_bindgen::prelude::*;

fn points_from_js(points: JsValue) -> Result<Vec<Point>, JsValue> {
    serde_wasm_bindgen::from_value(points)
        .map_err(|e| JsValue::from_str(&format!("Invalid points: {}", e)))
}

fn font_spec(font_id: Option<String>, weight: u16) -> FontSpec {
    FontSpec::new(font_id, weight_from_numeric(weight))
}

/// Drop points closer than `tolerance` to the last kept one. The first and
/// last points always survive.
#[wasm_bindgen]
pub fn simplify_path(points: JsValue, tolerance: f32) -> Result<JsValue, JsValue> {
    let points = points_from_js(points)?;
    serde_wasm_bindgen::to_value(&simplify(&points, tolerance))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Total length of a polyline.
#[wasm_bindgen]
pub fn path_length(points: JsValue) -> Result<f32, JsValue> {
    Ok(arc_length(&points_from_js(points)?))
}

/// Largest font size (12-60) at which `text` fits along a path of
/// `path_length`.
#[wasm_bindgen]
pub fn optimal_font_size(
    fonts: &JsFontLibrary,
    text: &str,
    font_id: Option<String>,
    weight: u16,
    path_length: f32,
) -> f32 {
    calculate_optimal_font_size(fonts.inner(), text, &font_spec(font_id, weight), path_length)
}

/// Per-character positions and angles of `text` along `points`.
#[wasm_bindgen]
pub fn layout_curved(
    fonts: &JsFontLibrary,
    points: JsValue,
    text: &str,
    font_id: Option<String>,
    weight: u16,
    font_size: f32,
) -> Result<JsValue, JsValue> {
    let points = points_from_js(points)?;
    let layout = curved_layout(fonts, &points, text, font_id, weight, font_size);
    serde_wasm_bindgen::to_value(&layout).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn curved_layout(
    fonts: &JsFontLibrary,
    points: &[Point],
    text: &str,
    font_id: Option<String>,
    weight: u16,
    font_size: f32,
) -> CurvedLayout {
    layout_curved_text(points, text, &font_spec(font_id, weight), font_size, fonts.inner())
}
