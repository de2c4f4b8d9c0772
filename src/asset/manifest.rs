//! Asset manifests
//!
//! A manifest is the list of images a scene asks for during preload.

use super::PlaceholderStyle;

/// How an image is sliced once loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    SpriteSheet { frame_width: u32, frame_height: u32 },
}

/// One requested image
#[derive(Debug, Clone, PartialEq)]
pub struct AssetEntry {
    pub key: String,
    /// Relative path (joined onto the base URL) or absolute URL
    pub url: String,
    pub kind: AssetKind,
    /// Size of the stand-in texture generated if loading fails
    pub placeholder_size: (u32, u32),
    pub style: PlaceholderStyle,
}

/// Ordered, key-unique list of assets
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    entries: Vec<AssetEntry>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a plain image
    pub fn image(
        mut self,
        key: &str,
        url: &str,
        placeholder_size: (u32, u32),
        style: PlaceholderStyle,
    ) -> Self {
        self.push(AssetEntry {
            key: key.to_string(),
            url: url.to_string(),
            kind: AssetKind::Image,
            placeholder_size,
            style,
        });
        self
    }

    /// Request a sprite sheet of `frames` equally sized frames laid out in a row
    pub fn spritesheet(
        mut self,
        key: &str,
        url: &str,
        frame_width: u32,
        frame_height: u32,
        frames: u32,
        style: PlaceholderStyle,
    ) -> Self {
        self.push(AssetEntry {
            key: key.to_string(),
            url: url.to_string(),
            kind: AssetKind::SpriteSheet { frame_width, frame_height },
            placeholder_size: (frame_width * frames.max(1), frame_height),
            style,
        });
        self
    }

    /// Append entries from another manifest (first occurrence of a key wins)
    pub fn merge(mut self, other: AssetManifest) -> Self {
        for entry in other.entries {
            self.push(entry);
        }
        self
    }

    fn push(&mut self, entry: AssetEntry) {
        if !self.entries.iter().any(|e| e.key == entry.key) {
            self.entries.push(entry);
        }
    }

    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&AssetEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Join a manifest URL onto the configured base.
///
/// Absolute `http://` / `https://` URLs are returned unchanged, as is
/// everything when the base is empty.
pub fn resolve_url(base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") || base.is_empty() {
        return url.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
}
