//! Platformer layout
//!
//! Fixed single-screen level: a full-width ground slab and three ledges,
//! with stars dropped in a row from the top edge.

use crate::config::{GameConfig, StarConfig};
use crate::physics::StaticBody;
use macroquad::prelude::{vec2, Vec2};

/// Natural size of the ledge image; the ground is the same image at 2x
pub const LEDGE_SIZE: Vec2 = Vec2::new(400.0, 32.0);

/// Ground and ledges, positioned by their centres in an 800x600 world
/// and scaled to the configured world size
pub fn platforms(config: &GameConfig) -> Vec<StaticBody> {
    let sx = config.window.width / 800.0;
    let sy = config.window.height / 600.0;
    let ledge = vec2(LEDGE_SIZE.x * sx, LEDGE_SIZE.y * sy);

    vec![
        StaticBody::centered(vec2(400.0 * sx, 568.0 * sy), ledge * 2.0),
        StaticBody::centered(vec2(600.0 * sx, 400.0 * sy), ledge),
        StaticBody::centered(vec2(50.0 * sx, 250.0 * sy), ledge),
        StaticBody::centered(vec2(750.0 * sx, 220.0 * sy), ledge),
    ]
}

/// Horizontal centre of each star, left to right
pub fn star_columns(stars: &StarConfig) -> Vec<f32> {
    (0..stars.count)
        .map(|i| stars.start_x + stars.step_x * i as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::Rect;

    #[test]
    fn test_classic_layout() {
        let platforms = platforms(&GameConfig::default());
        assert_eq!(platforms.len(), 4);
        assert_eq!(platforms[0].rect, Rect::new(0.0, 536.0, 800.0, 64.0));
        assert_eq!(platforms[1].rect, Rect::new(400.0, 384.0, 400.0, 32.0));
        // Left ledge hangs off the edge of the world
        assert_eq!(platforms[2].rect, Rect::new(-150.0, 234.0, 400.0, 32.0));
        assert_eq!(platforms[3].rect, Rect::new(550.0, 204.0, 400.0, 32.0));
    }

    #[test]
    fn test_layout_scales_with_world() {
        let mut config = GameConfig::default();
        config.window.width = 1600.0;
        config.window.height = 1200.0;
        let ground = platforms(&config)[0].rect;
        assert_eq!(ground, Rect::new(0.0, 1072.0, 1600.0, 128.0));
    }

    #[test]
    fn test_star_columns() {
        let columns = star_columns(&StarConfig::default());
        assert_eq!(columns.len(), 12);
        assert_eq!(columns[0], 12.0);
        assert_eq!(columns[11], 12.0 + 70.0 * 11.0);
    }
}
