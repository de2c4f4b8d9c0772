//! Sprite sheet slicing

use super::AssetError;
use macroquad::prelude::Rect;

/// Grid layout of equally sized frames, numbered row-major from the top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
    pub rows: u32,
}

impl SheetLayout {
    pub fn new(image_width: u32, image_height: u32, frame_width: u32, frame_height: u32) -> Result<Self, AssetError> {
        if frame_width == 0 || frame_height == 0 {
            return Err(AssetError::BadSheet("frame size must be non-zero".to_string()));
        }
        let columns = image_width / frame_width;
        let rows = image_height / frame_height;
        if columns == 0 || rows == 0 {
            return Err(AssetError::BadSheet(format!(
                "{}x{} frames do not fit a {}x{} image",
                frame_width, frame_height, image_width, image_height
            )));
        }
        Ok(Self { frame_width, frame_height, columns, rows })
    }

    pub fn frame_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    /// Source rect of a frame; out-of-range indices clamp to the last frame
    pub fn frame_rect(&self, frame: usize) -> Rect {
        let frame = frame.min(self.frame_count() - 1) as u32;
        let col = frame % self.columns;
        let row = frame / self.columns;
        Rect::new(
            (col * self.frame_width) as f32,
            (row * self.frame_height) as f32,
            self.frame_width as f32,
            self.frame_height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row_sheet() {
        let sheet = SheetLayout::new(288, 48, 32, 48).unwrap();
        assert_eq!(sheet.frame_count(), 9);
        assert_eq!(sheet.frame_rect(0), Rect::new(0.0, 0.0, 32.0, 48.0));
        assert_eq!(sheet.frame_rect(5), Rect::new(160.0, 0.0, 32.0, 48.0));
        // Clamped
        assert_eq!(sheet.frame_rect(42), Rect::new(256.0, 0.0, 32.0, 48.0));
    }

    #[test]
    fn test_grid_sheet_is_row_major() {
        let sheet = SheetLayout::new(64, 64, 32, 32).unwrap();
        assert_eq!(sheet.frame_count(), 4);
        assert_eq!(sheet.frame_rect(1), Rect::new(32.0, 0.0, 32.0, 32.0));
        assert_eq!(sheet.frame_rect(2), Rect::new(0.0, 32.0, 32.0, 32.0));
    }

    #[test]
    fn test_partial_frames_are_ignored() {
        // 100 px wide holds three whole 32 px frames
        let sheet = SheetLayout::new(100, 48, 32, 48).unwrap();
        assert_eq!(sheet.columns, 3);
    }

    #[test]
    fn test_frames_larger_than_image() {
        assert!(matches!(SheetLayout::new(16, 16, 32, 48), Err(AssetError::BadSheet(_))));
        assert!(matches!(SheetLayout::new(16, 16, 0, 16), Err(AssetError::BadSheet(_))));
    }
}
