//! Fetch and decode
//!
//! Native: `http(s)` URLs go through ureq (blocking, only during the
//! loading screen), anything else is read from disk.
//! WASM: everything goes through macroquad's `load_file`, which is a
//! browser `fetch` under the hood.

use super::AssetError;
use image::RgbaImage;

/// Upper bound for a single downloaded image
#[cfg(not(target_arch = "wasm32"))]
const MAX_DOWNLOAD_BYTES: u64 = 16 * 1024 * 1024;

#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, AssetError> {
    fetch_blocking(url)
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_blocking(url: &str) -> Result<Vec<u8>, AssetError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        fetch_http(url)
    } else {
        Ok(std::fs::read(url)?)
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, AssetError> {
    macroquad::file::load_file(url)
        .await
        .map_err(|e| AssetError::Http(e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_http(url: &str) -> Result<Vec<u8>, AssetError> {
    use std::io::Read;

    let response = ureq::get(url).call().map_err(|e| AssetError::Http(e.to_string()))?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_DOWNLOAD_BYTES)
        .read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Largest texture side macroquad can upload
pub const MAX_TEXTURE_SIDE: u32 = u16::MAX as u32;

/// Decode PNG / JPEG / BMP bytes into RGBA8
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, AssetError> {
    if bytes.is_empty() {
        return Err(AssetError::Decode("empty file".to_string()));
    }
    let image = image::load_from_memory(bytes)?;
    let (width, height) = (image.width(), image.height());
    if width > MAX_TEXTURE_SIDE || height > MAX_TEXTURE_SIDE {
        return Err(AssetError::Decode(format!(
            "{}x{} exceeds the {}px texture limit",
            width, height, MAX_TEXTURE_SIDE
        )));
    }
    Ok(image.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let decoded = decode_image(&png_bytes(4, 3)).unwrap();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(*decoded.get_pixel(2, 1), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode_image(b"<html>404</html>"), Err(AssetError::Decode(_))));
        assert!(matches!(decode_image(&[]), Err(AssetError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_oversized_image() {
        let wide = png_bytes(MAX_TEXTURE_SIDE + 1, 1);
        assert!(matches!(decode_image(&wide), Err(AssetError::Decode(_))));

        let edge = decode_image(&png_bytes(MAX_TEXTURE_SIDE, 1)).unwrap();
        assert_eq!(edge.dimensions(), (MAX_TEXTURE_SIDE, 1));
    }

    #[test]
    fn test_fetch_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");
        std::fs::write(&path, png_bytes(2, 2)).unwrap();

        let fetched = fetch_blocking(path.to_str().unwrap()).unwrap();
        assert_eq!(decode_image(&fetched).unwrap().dimensions(), (2, 2));

        let missing = dir.path().join("missing.png");
        assert!(matches!(fetch_blocking(missing.to_str().unwrap()), Err(AssetError::Io(_))));
    }
}
