//! Sticker catalog and pixel loading.
//!
//! Network access stays outside the engine: a [`StickerProvider`] hands over
//! the catalog and a [`StickerLoader`] hands over decoded pixels. Remote
//! stickers are fetched ahead of a composite and stored in a
//! [`ResolvedStickers`] map, so rendering never blocks on the network.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Where a sticker's pixels come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum StickerRef {
    /// Bundled asset, by name.
    Local(String),
    /// Remote image, by URL.
    Remote(String),
}

impl StickerRef {
    pub fn local(name: impl Into<String>) -> Self {
        StickerRef::Local(name.into())
    }

    pub fn remote(url: impl Into<String>) -> Self {
        StickerRef::Remote(url.into())
    }
}

/// One entry of the remote sticker catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerInfo {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl StickerInfo {
    /// Reference used to place this sticker on a photo.
    pub fn sticker_ref(&self) -> StickerRef {
        StickerRef::remote(self.url.clone())
    }
}

#[derive(Deserialize)]
struct CatalogResponse {
    stickers: Vec<StickerInfo>,
}

/// Parse a catalog document of the form `{"stickers": [...]}`.
///
/// Any malformed document yields an empty catalog.
pub fn parse_catalog(json: &str) -> Vec<StickerInfo> {
    match serde_json::from_str::<CatalogResponse>(json) {
        Ok(response) => {
            log::debug!("Parsed sticker catalog with {} entries", response.stickers.len());
            response.stickers
        }
        Err(e) => {
            log::warn!("Ignoring malformed sticker catalog: {}", e);
            Vec::new()
        }
    }
}

/// Source of the sticker catalog.
pub trait StickerProvider {
    /// Available stickers; empty when the catalog cannot be obtained.
    fn fetch_catalog(&self) -> Vec<StickerInfo>;
}

/// Provider serving a catalog document that was already downloaded.
#[derive(Debug, Clone, Default)]
pub struct JsonStickerProvider {
    document: String,
}

impl JsonStickerProvider {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl StickerProvider for JsonStickerProvider {
    fn fetch_catalog(&self) -> Vec<StickerInfo> {
        parse_catalog(&self.document)
    }
}

/// Source of sticker pixels.
pub trait StickerLoader {
    /// Decoded pixels for `reference`, or `None` to skip the sticker.
    fn load(&self, reference: &StickerRef) -> Option<RgbaImage>;
}

/// In-memory stickers, keyed by reference.
#[derive(Debug, Clone, Default)]
pub struct ResolvedStickers {
    images: HashMap<StickerRef, RgbaImage>,
}

impl ResolvedStickers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: StickerRef, image: RgbaImage) {
        self.images.insert(reference, image);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl StickerLoader for ResolvedStickers {
    fn load(&self, reference: &StickerRef) -> Option<RgbaImage> {
        self.images.get(reference).cloned()
    }
}

/// Loads local stickers from `<root>/<name>.<ext>`.
///
/// Remote references are never resolved here.
#[derive(Debug, Clone)]
pub struct DirectoryStickerLoader {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DirectoryStickerLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
        }
    }

    /// Replace the file extensions tried, in order.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
}

impl StickerLoader for DirectoryStickerLoader {
    fn load(&self, reference: &StickerRef) -> Option<RgbaImage> {
        let StickerRef::Local(name) = reference else {
            return None;
        };

        // Asset names never address files outside the root
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            log::warn!("Rejected sticker asset name '{}'", name);
            return None;
        }

        for ext in &self.extensions {
            let path = self.root.join(format!("{}.{}", name, ext));
            if !path.is_file() {
                continue;
            }
            match image::open(&path) {
                Ok(img) => return Some(img.to_rgba8()),
                Err(e) => {
                    log::warn!("Failed to decode sticker {}: {}", path.display(), e);
                    return None;
                }
            }
        }
        None
    }
}

/// Tries each loader in order until one returns pixels.
#[derive(Default)]
pub struct StickerLoaderChain {
    loaders: Vec<Box<dyn StickerLoader>>,
}

impl StickerLoaderChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, loader: impl StickerLoader + 'static) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }
}

impl StickerLoader for StickerLoaderChain {
    fn load(&self, reference: &StickerRef) -> Option<RgbaImage> {
        self.loaders.iter().find_map(|loader| loader.load(reference))
    }
}
