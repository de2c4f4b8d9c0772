//! Image Asset Loading
//!
//! Scenes describe what they need in an `AssetManifest` during preload.
//! The host awaits `AssetStore::load_manifest` before `create` runs, so
//! scenes never see a half-loaded store.
//!
//! ```text
//! AssetManifest ──▶ fetch (ureq / fs / browser fetch)
//!                    └─▶ decode (image crate, RGBA8)
//!                         └─▶ Texture2D  ──▶ AssetStore[key]
//!                    (any failure) ─▶ placeholder texture
//! ```

mod loader;
mod manifest;
mod placeholder;
mod sheet;

pub use loader::{decode_image, fetch_bytes};
pub use manifest::{resolve_url, AssetEntry, AssetKind, AssetManifest};
pub use placeholder::{placeholder_image, PlaceholderStyle};
pub use sheet::SheetLayout;

use macroquad::logging::{info, warn};
use macroquad::prelude::{FilterMode, Rect, Texture2D};
use std::collections::HashMap;

/// Error type for asset loading
#[derive(Debug, Clone, PartialEq)]
pub enum AssetError {
    /// Local file could not be read
    Io(String),
    /// Remote fetch failed
    Http(String),
    /// Bytes are not a supported image
    Decode(String),
    /// Frame size does not fit the sprite sheet
    BadSheet(String),
    /// Key was never loaded
    NotFound(String),
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::Io(msg) => write!(f, "I/O error: {}", msg),
            AssetError::Http(msg) => write!(f, "HTTP error: {}", msg),
            AssetError::Decode(msg) => write!(f, "decode error: {}", msg),
            AssetError::BadSheet(msg) => write!(f, "bad sprite sheet: {}", msg),
            AssetError::NotFound(key) => write!(f, "asset not loaded: {}", key),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<std::io::Error> for AssetError {
    fn from(e: std::io::Error) -> Self {
        AssetError::Io(e.to_string())
    }
}

impl From<image::ImageError> for AssetError {
    fn from(e: image::ImageError) -> Self {
        AssetError::Decode(e.to_string())
    }
}

/// A texture uploaded to the GPU, plus its sheet layout if it has frames
#[derive(Clone)]
pub struct LoadedTexture {
    pub texture: Texture2D,
    pub width: u32,
    pub height: u32,
    pub sheet: Option<SheetLayout>,
    /// True when the real image failed to load and a stand-in is used
    pub placeholder: bool,
}

impl LoadedTexture {
    /// Source rect for a frame (whole texture for plain images)
    pub fn frame_rect(&self, frame: usize) -> Rect {
        match &self.sheet {
            Some(sheet) => sheet.frame_rect(frame),
            None => Rect::new(0.0, 0.0, self.width as f32, self.height as f32),
        }
    }
}

/// All textures loaded so far, keyed by manifest key
#[derive(Default)]
pub struct AssetStore {
    textures: HashMap<String, LoadedTexture>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and decode every entry not already present.
    ///
    /// Failures are logged and replaced by placeholders, so after this
    /// returns every key in the manifest resolves.
    pub async fn load_manifest(&mut self, manifest: &AssetManifest, base_url: &str) {
        for entry in manifest.entries() {
            if self.textures.contains_key(&entry.key) {
                continue;
            }
            let url = resolve_url(base_url, &entry.url);
            let loaded = match load_entry(entry, &url).await {
                Ok(loaded) => {
                    info!("Loaded '{}' from {} ({}x{})", entry.key, url, loaded.width, loaded.height);
                    loaded
                }
                Err(e) => {
                    warn!("Failed to load '{}' from {}: {}, using placeholder", entry.key, url, e);
                    placeholder_texture(entry)
                }
            };
            self.textures.insert(entry.key.clone(), loaded);
        }
    }

    pub fn get(&self, key: &str) -> Result<&LoadedTexture, AssetError> {
        self.textures
            .get(key)
            .ok_or_else(|| AssetError::NotFound(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }
}

async fn load_entry(entry: &AssetEntry, url: &str) -> Result<LoadedTexture, AssetError> {
    let bytes = fetch_bytes(url).await?;
    let image = decode_image(&bytes)?;
    let sheet = match entry.kind {
        AssetKind::Image => None,
        AssetKind::SpriteSheet { frame_width, frame_height } => {
            Some(SheetLayout::new(image.width(), image.height(), frame_width, frame_height)?)
        }
    };
    Ok(upload(&image, sheet, false))
}

fn placeholder_texture(entry: &AssetEntry) -> LoadedTexture {
    let image = placeholder_image(entry.kind, entry.placeholder_size, entry.style);
    let sheet = match entry.kind {
        AssetKind::Image => None,
        // Placeholder sheets are generated to fit their frame size exactly
        AssetKind::SpriteSheet { frame_width, frame_height } => {
            SheetLayout::new(image.width(), image.height(), frame_width, frame_height).ok()
        }
    };
    upload(&image, sheet, true)
}

fn upload(image: &image::RgbaImage, sheet: Option<SheetLayout>, placeholder: bool) -> LoadedTexture {
    let texture = Texture2D::from_rgba8(image.width() as u16, image.height() as u16, image.as_raw());
    texture.set_filter(FilterMode::Nearest);
    LoadedTexture {
        texture,
        width: image.width(),
        height: image.height(),
        sheet,
        placeholder,
    }
}
