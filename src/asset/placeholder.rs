//! Procedural stand-in textures
//!
//! Generated when an image can't be fetched or decoded, so the demos stay
//! playable offline. Shapes are simple but recognisable: a gradient sky, a
//! striped ledge, a yellow diamond star, a dark round bomb, and a
//! character sheet whose frames show which way the figure is facing.

use super::loader::MAX_TEXTURE_SIDE;
use super::AssetKind;
use image::{Rgba, RgbaImage};

/// What a placeholder should look like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    Sky,
    Ground,
    Star,
    Bomb,
    Character,
}

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Build a placeholder of the given pixel size, each side clamped to 1..=MAX_TEXTURE_SIDE
pub fn placeholder_image(kind: AssetKind, size: (u32, u32), style: PlaceholderStyle) -> RgbaImage {
    let width = size.0.clamp(1, MAX_TEXTURE_SIDE);
    let height = size.1.clamp(1, MAX_TEXTURE_SIDE);

    match style {
        PlaceholderStyle::Sky => RgbaImage::from_fn(width, height, |_, y| {
            let t = y as f32 / height as f32;
            Rgba([
                lerp_u8(40, 140, t),
                lerp_u8(90, 200, t),
                lerp_u8(200, 255, t),
                255,
            ])
        }),
        PlaceholderStyle::Ground => RgbaImage::from_fn(width, height, |x, y| {
            if y < height / 4 {
                Rgba([70, 170, 60, 255])
            } else if (x / 8 + y / 8) % 2 == 0 {
                Rgba([120, 80, 45, 255])
            } else {
                Rgba([100, 65, 35, 255])
            }
        }),
        PlaceholderStyle::Star => RgbaImage::from_fn(width, height, |x, y| {
            // Diamond: |dx|/hw + |dy|/hh <= 1
            let dx = (x as f32 + 0.5 - width as f32 / 2.0).abs() / (width as f32 / 2.0);
            let dy = (y as f32 + 0.5 - height as f32 / 2.0).abs() / (height as f32 / 2.0);
            if dx + dy <= 1.0 {
                Rgba([255, 220, 40, 255])
            } else {
                CLEAR
            }
        }),
        PlaceholderStyle::Bomb => RgbaImage::from_fn(width, height, |x, y| {
            let dx = x as f32 + 0.5 - width as f32 / 2.0;
            let dy = y as f32 + 0.5 - height as f32 / 2.0;
            let r = width.min(height) as f32 / 2.0;
            if dx * dx + dy * dy <= r * r {
                Rgba([40, 40, 50, 255])
            } else {
                CLEAR
            }
        }),
        PlaceholderStyle::Character => character_sheet(kind, width, height),
    }
}

/// One frame per column: purple body, eye on the facing side.
/// Frames before the middle face left, the middle frame faces the camera.
fn character_sheet(kind: AssetKind, width: u32, height: u32) -> RgbaImage {
    let (frame_width, frame_height) = match kind {
        AssetKind::SpriteSheet { frame_width, frame_height } => (frame_width.max(1), frame_height.max(1)),
        AssetKind::Image => (width, height),
    };
    let frames = (width / frame_width).max(1);
    let middle = frames / 2;

    RgbaImage::from_fn(width, height, |x, y| {
        let frame = (x / frame_width).min(frames - 1);
        let fx = x % frame_width;
        let fy = y % frame_height;

        let margin = frame_width / 6;
        if fx < margin || fx >= frame_width - margin || fy < frame_height / 8 {
            return CLEAR;
        }

        let eye_y = frame_height / 4;
        let eye_x = if frame < middle {
            frame_width / 3
        } else if frame > middle {
            frame_width * 2 / 3
        } else {
            frame_width / 2
        };
        if fy.abs_diff(eye_y) <= 1 && fx.abs_diff(eye_x) <= 1 {
            return Rgba([255, 255, 255, 255]);
        }

        // Alternate leg shading so walk cycles visibly animate
        if fy > frame_height * 3 / 4 && (fx + frame) % 2 == 0 {
            Rgba([90, 50, 140, 255])
        } else {
            Rgba([140, 80, 200, 255])
        }
    })
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t.clamp(0.0, 1.0)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_sizes() {
        let sky = placeholder_image(AssetKind::Image, (800, 600), PlaceholderStyle::Sky);
        assert_eq!(sky.dimensions(), (800, 600));

        let empty = placeholder_image(AssetKind::Image, (0, 0), PlaceholderStyle::Bomb);
        assert_eq!(empty.dimensions(), (1, 1));

        let strip = placeholder_image(AssetKind::Image, (u32::MAX, 1), PlaceholderStyle::Ground);
        assert_eq!(strip.dimensions(), (MAX_TEXTURE_SIDE, 1));
    }

    #[test]
    fn test_star_is_transparent_in_corners() {
        let star = placeholder_image(AssetKind::Image, (24, 22), PlaceholderStyle::Star);
        assert_eq!(star.get_pixel(0, 0)[3], 0);
        assert_eq!(star.get_pixel(12, 11)[3], 255);
    }

    #[test]
    fn test_character_frames_face_different_ways() {
        let kind = AssetKind::SpriteSheet { frame_width: 32, frame_height: 48 };
        let sheet = placeholder_image(kind, (288, 48), PlaceholderStyle::Character);
        let eye_y = 12;
        // Frame 0 (left) has its eye at x = 10, frame 8 (right) at x = 8*32 + 21
        assert_eq!(*sheet.get_pixel(10, eye_y), Rgba([255, 255, 255, 255]));
        assert_eq!(*sheet.get_pixel(8 * 32 + 21, eye_y), Rgba([255, 255, 255, 255]));
        assert_ne!(*sheet.get_pixel(8 * 32 + 10, eye_y), Rgba([255, 255, 255, 255]));
    }
}
