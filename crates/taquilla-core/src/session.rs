//! Editing session: the overlay elements placed on one photo.
//!
//! Elements live in an arena addressed by [`ElementId`]. Ids are handed out
//! from a counter that only grows, so an id stays valid (or becomes unknown)
//! no matter what else is added or removed. The compositor never sees the
//! arena; it receives a [`SessionSnapshot`] with plain ordered lists.
//!
//! Geometry stored here is in display space.

use crate::geometry::{arc_length, simplify, Point, Polyline, Size};
use crate::overlay::{LocationOverlay, WeatherOverlay};
use crate::shadow::ShadowSpec;
use crate::sticker::StickerRef;
use crate::text::{calculate_optimal_font_size, FontSpec, TextMeasurer};
use crate::Rgba;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Pinch-zoom limits for straight and curved text.
pub const TEXT_SCALE_RANGE: RangeInclusive<f32> = 0.3..=4.0;

/// Pinch-zoom limits for stickers.
pub const STICKER_SCALE_RANGE: RangeInclusive<f32> = 0.8..=2.5;

/// Point spacing used when simplifying drawn paths.
pub const DEFAULT_SIMPLIFY_TOLERANCE: f32 = 5.0;

/// Default size of newly created straight text.
pub const DEFAULT_TEXT_SIZE: f32 = 32.0;

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(*range.start(), *range.end())
}

/// Stable handle of an element in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(u64);

impl ElementId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Straight text anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextElement {
    pub id: ElementId,
    pub text: String,
    pub position: Point,
    pub font_size: f32,
    pub font: FontSpec,
    pub color: Rgba,
    pub scale: f32,
    /// Drawn in order, first one furthest back.
    pub shadows: Vec<ShadowSpec>,
    pub background_opacity: f32,
    pub corner_radius: f32,
}

impl Default for TextElement {
    fn default() -> Self {
        Self {
            id: ElementId::default(),
            text: String::new(),
            position: Point::ZERO,
            font_size: DEFAULT_TEXT_SIZE,
            font: FontSpec::default(),
            color: Rgba::WHITE,
            scale: 1.0,
            shadows: Vec::new(),
            background_opacity: 0.3,
            corner_radius: 8.0,
        }
    }
}

impl TextElement {
    pub fn new(text: impl Into<String>, position: Point) -> Self {
        Self {
            text: text.into(),
            position,
            ..Self::default()
        }
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = clamp_to(scale, &TEXT_SCALE_RANGE);
    }

    /// Scale limited to [`TEXT_SCALE_RANGE`].
    pub fn effective_scale(&self) -> f32 {
        clamp_to(self.scale, &TEXT_SCALE_RANGE)
    }
}

/// Text following a drawn path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurvedTextElement {
    pub id: ElementId,
    pub text: String,
    pub path: Polyline,
    /// Auto-fitted to the path whenever the text or path changes.
    pub font_size: f32,
    pub font: FontSpec,
    pub color: Rgba,
    pub scale: f32,
    /// Accumulated drag translation.
    pub offset: Point,
}

impl Default for CurvedTextElement {
    fn default() -> Self {
        Self {
            id: ElementId::default(),
            text: String::new(),
            path: Vec::new(),
            font_size: crate::text::MIN_FONT_SIZE as f32,
            font: FontSpec::default(),
            color: Rgba::WHITE,
            scale: 1.0,
            offset: Point::ZERO,
        }
    }
}

impl CurvedTextElement {
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = clamp_to(scale, &TEXT_SCALE_RANGE);
    }

    pub fn effective_scale(&self) -> f32 {
        clamp_to(self.scale, &TEXT_SCALE_RANGE)
    }

    fn refit(&mut self, measurer: &dyn TextMeasurer) {
        self.font_size =
            calculate_optimal_font_size(measurer, &self.text, &self.font, arc_length(&self.path));
    }
}

/// Image sticker centered on `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerElement {
    #[serde(default)]
    pub id: ElementId,
    pub sticker: StickerRef,
    pub position: Point,
    #[serde(default = "unit_scale")]
    pub scale: f32,
    #[serde(default)]
    pub rotation_degrees: f32,
    #[serde(default)]
    pub z_index: i32,
}

fn unit_scale() -> f32 {
    1.0
}

impl StickerElement {
    pub fn new(sticker: StickerRef, position: Point) -> Self {
        Self {
            id: ElementId::default(),
            sticker,
            position,
            scale: 1.0,
            rotation_degrees: 0.0,
            z_index: 0,
        }
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = clamp_to(scale, &STICKER_SCALE_RANGE);
    }

    pub fn effective_scale(&self) -> f32 {
        clamp_to(self.scale, &STICKER_SCALE_RANGE)
    }
}

#[derive(Debug, Clone)]
enum Element {
    Text(TextElement),
    Curved(CurvedTextElement),
    Sticker(StickerElement),
}

/// Everything the compositor needs from a session, by value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    pub filter_id: String,
    pub display_size: Option<Size>,
    pub texts: Vec<TextElement>,
    pub curved_texts: Vec<CurvedTextElement>,
    /// Sorted by ascending z-index.
    pub stickers: Vec<StickerElement>,
    pub weather: Option<WeatherOverlay>,
    pub location: Option<LocationOverlay>,
}

/// Aggregate root of one photo being edited.
#[derive(Debug, Clone)]
pub struct EditingSession {
    base_image: Option<Arc<RgbaImage>>,
    filter_id: String,
    display_size: Option<Size>,
    elements: BTreeMap<ElementId, Element>,
    weather: Option<WeatherOverlay>,
    location: Option<LocationOverlay>,
    next_id: u64,
    next_z: i32,
    simplify_tolerance: f32,
}

impl Default for EditingSession {
    fn default() -> Self {
        Self {
            base_image: None,
            filter_id: crate::filter::NONE_FILTER.to_string(),
            display_size: None,
            elements: BTreeMap::new(),
            weather: None,
            location: None,
            next_id: 1,
            next_z: 0,
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
        }
    }
}

impl EditingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session editing `image`.
    pub fn with_base(image: RgbaImage) -> Self {
        Self {
            base_image: Some(Arc::new(image)),
            ..Self::default()
        }
    }

    pub fn with_simplify_tolerance(mut self, tolerance: f32) -> Self {
        self.simplify_tolerance = tolerance.max(0.0);
        self
    }

    /// Swap the photo and discard every element, overlay and the filter.
    pub fn reset(&mut self, base: Option<RgbaImage>) {
        self.base_image = base.map(Arc::new);
        self.filter_id = crate::filter::NONE_FILTER.to_string();
        self.display_size = None;
        self.elements.clear();
        self.weather = None;
        self.location = None;
        self.next_z = 0;
    }

    pub fn base_image(&self) -> Option<&RgbaImage> {
        self.base_image.as_deref()
    }

    pub fn shared_base_image(&self) -> Option<Arc<RgbaImage>> {
        self.base_image.clone()
    }

    pub fn filter_id(&self) -> &str {
        &self.filter_id
    }

    pub fn set_filter(&mut self, id: impl Into<String>) {
        self.filter_id = id.into();
    }

    pub fn display_size(&self) -> Option<Size> {
        self.display_size
    }

    /// Record the on-screen size of the preview the elements were placed on.
    pub fn set_display_size(&mut self, size: Size) {
        self.display_size = Some(size);
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_text(&mut self, mut element: TextElement) -> ElementId {
        let id = self.allocate_id();
        element.id = id;
        element.set_scale(element.scale);
        self.elements.insert(id, Element::Text(element));
        id
    }

    /// Attach text to a drawn path.
    ///
    /// The path is simplified and the font size fitted to its arc length.
    pub fn add_curved_text(
        &mut self,
        text: impl Into<String>,
        path: &[Point],
        font: FontSpec,
        color: Rgba,
        measurer: &dyn TextMeasurer,
    ) -> ElementId {
        let id = self.allocate_id();
        let mut element = CurvedTextElement {
            id,
            text: text.into(),
            path: simplify(path, self.simplify_tolerance),
            font,
            color,
            ..CurvedTextElement::default()
        };
        element.refit(measurer);
        log::debug!(
            "Curved text {:?}: {} points, font size {}",
            id,
            element.path.len(),
            element.font_size
        );
        self.elements.insert(id, Element::Curved(element));
        id
    }

    /// Place a sticker above every existing sticker.
    pub fn add_sticker(&mut self, sticker: StickerRef, position: Point) -> ElementId {
        let id = self.allocate_id();
        let mut element = StickerElement::new(sticker, position);
        element.id = id;
        element.z_index = self.next_z;
        self.next_z += 1;
        self.elements.insert(id, Element::Sticker(element));
        id
    }

    pub fn text(&self, id: ElementId) -> Option<&TextElement> {
        match self.elements.get(&id) {
            Some(Element::Text(e)) => Some(e),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, id: ElementId) -> Option<&mut TextElement> {
        match self.elements.get_mut(&id) {
            Some(Element::Text(e)) => Some(e),
            _ => None,
        }
    }

    pub fn curved_text(&self, id: ElementId) -> Option<&CurvedTextElement> {
        match self.elements.get(&id) {
            Some(Element::Curved(e)) => Some(e),
            _ => None,
        }
    }

    /// Mutable access for style changes. Text and path edits go through
    /// [`edit_curved_text`](Self::edit_curved_text) and
    /// [`replace_curved_path`](Self::replace_curved_path) so the font is
    /// refitted.
    pub fn curved_text_mut(&mut self, id: ElementId) -> Option<&mut CurvedTextElement> {
        match self.elements.get_mut(&id) {
            Some(Element::Curved(e)) => Some(e),
            _ => None,
        }
    }

    pub fn sticker(&self, id: ElementId) -> Option<&StickerElement> {
        match self.elements.get(&id) {
            Some(Element::Sticker(e)) => Some(e),
            _ => None,
        }
    }

    pub fn sticker_mut(&mut self, id: ElementId) -> Option<&mut StickerElement> {
        match self.elements.get_mut(&id) {
            Some(Element::Sticker(e)) => Some(e),
            _ => None,
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Delete an element. Returns `false` for unknown ids.
    pub fn remove(&mut self, id: ElementId) -> bool {
        self.elements.remove(&id).is_some()
    }

    /// Drag an element by `delta` (display units).
    pub fn move_by(&mut self, id: ElementId, delta: Point) -> bool {
        match self.elements.get_mut(&id) {
            Some(Element::Text(e)) => e.position = e.position.translated(delta),
            Some(Element::Curved(e)) => e.offset = e.offset.translated(delta),
            Some(Element::Sticker(e)) => e.position = e.position.translated(delta),
            None => return false,
        }
        true
    }

    /// Set the resolved pinch scale, clamped to the element's range.
    pub fn set_scale(&mut self, id: ElementId, scale: f32) -> bool {
        match self.elements.get_mut(&id) {
            Some(Element::Text(e)) => e.set_scale(scale),
            Some(Element::Curved(e)) => e.set_scale(scale),
            Some(Element::Sticker(e)) => e.set_scale(scale),
            None => return false,
        }
        true
    }

    /// Set a sticker's rotation. Text elements do not rotate.
    pub fn set_rotation(&mut self, id: ElementId, degrees: f32) -> bool {
        match self.sticker_mut(id) {
            Some(sticker) => {
                sticker.rotation_degrees = degrees;
                true
            }
            None => false,
        }
    }

    /// Raise a sticker above all others.
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        let z = self.next_z;
        match self.sticker_mut(id) {
            Some(sticker) => {
                sticker.z_index = z;
                self.next_z += 1;
                true
            }
            None => false,
        }
    }

    /// Replace the text of a curved element and refit its font.
    pub fn edit_curved_text(
        &mut self,
        id: ElementId,
        text: impl Into<String>,
        measurer: &dyn TextMeasurer,
    ) -> bool {
        match self.curved_text_mut(id) {
            Some(element) => {
                element.text = text.into();
                element.refit(measurer);
                true
            }
            None => false,
        }
    }

    /// Replace the path of a curved element and refit its font.
    pub fn replace_curved_path(
        &mut self,
        id: ElementId,
        path: &[Point],
        measurer: &dyn TextMeasurer,
    ) -> bool {
        let tolerance = self.simplify_tolerance;
        match self.curved_text_mut(id) {
            Some(element) => {
                element.path = simplify(path, tolerance);
                element.refit(measurer);
                true
            }
            None => false,
        }
    }

    pub fn weather(&self) -> Option<&WeatherOverlay> {
        self.weather.as_ref()
    }

    pub fn set_weather(&mut self, weather: Option<WeatherOverlay>) {
        self.weather = weather;
    }

    pub fn location(&self) -> Option<&LocationOverlay> {
        self.location.as_ref()
    }

    pub fn set_location(&mut self, location: Option<LocationOverlay>) {
        self.location = location;
    }

    /// Remove the weather and location badges.
    pub fn clear_overlays(&mut self) {
        self.weather = None;
        self.location = None;
    }

    /// Copy of the current state in render order.
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut snapshot = SessionSnapshot {
            filter_id: self.filter_id.clone(),
            display_size: self.display_size,
            weather: self.weather.clone(),
            location: self.location.clone(),
            ..SessionSnapshot::default()
        };

        for element in self.elements.values() {
            match element {
                Element::Text(e) => snapshot.texts.push(e.clone()),
                Element::Curved(e) => snapshot.curved_texts.push(e.clone()),
                Element::Sticker(e) => snapshot.stickers.push(e.clone()),
            }
        }
        snapshot.stickers.sort_by_key(|s| s.z_index);
        snapshot
    }
}
