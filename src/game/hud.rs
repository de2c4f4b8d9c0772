//! Platformer HUD
//!
//! Text overlay in world coordinates: score, shader status, game-over
//! banner and the demo switch hint.

use super::state::PlatformerState;
use crate::scene::{switch_hint, Viewport, SWITCH_HINT_COLOR, SWITCH_HINT_SIZE};
use macroquad::prelude::*;

const SCORE_COLOR: Color = Color::new(0.0, 0.0, 0.0, 1.0);
const STATUS_COLOR: Color = Color::new(0.15, 0.15, 0.2, 1.0);
const BANNER_COLOR: Color = Color::new(0.9, 0.1, 0.1, 1.0);
const BANNER_BG: Color = Color::new(0.0, 0.0, 0.0, 0.55);

pub const SCORE_POS: Vec2 = Vec2::new(16.0, 16.0);
pub const SCORE_SIZE: f32 = 32.0;

/// Everything the HUD shows, snapshotted from the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudModel {
    pub score: u32,
    pub wave: u32,
    pub game_over: bool,
    pub shader_enabled: bool,
    /// False when the shader failed to build (toggle still flips the flag)
    pub shader_available: bool,
}

impl HudModel {
    pub fn from_state(state: &PlatformerState, shader_available: bool) -> Self {
        Self {
            score: state.score(),
            wave: state.wave(),
            game_over: state.is_game_over(),
            shader_enabled: state.shader_enabled(),
            shader_available,
        }
    }
}

/// One line of text; `pos` is the top-left corner in world units
#[derive(Debug, Clone, PartialEq)]
pub struct HudLine {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
    /// Centre horizontally on `pos.x`
    pub centered: bool,
}

impl HudLine {
    fn at(text: String, pos: Vec2, size: f32, color: Color) -> Self {
        Self { text, pos, size, color, centered: false }
    }

    fn centered(text: String, pos: Vec2, size: f32, color: Color) -> Self {
        Self { text, pos, size, color, centered: true }
    }
}

pub fn score_text(score: u32) -> String {
    format!("score: {}", score)
}

pub fn shader_text(model: &HudModel) -> String {
    let state = if model.shader_enabled { "on" } else { "off" };
    if model.shader_available {
        format!("shader: {} (S)", state)
    } else {
        format!("shader: {} (S, unavailable)", state)
    }
}

/// Lay out the HUD for a world of `world_size`
pub fn layout(model: &HudModel, world_size: Vec2) -> Vec<HudLine> {
    let mut lines = vec![
        HudLine::at(score_text(model.score), SCORE_POS, SCORE_SIZE, SCORE_COLOR),
        HudLine::at(shader_text(model), SCORE_POS + vec2(0.0, 40.0), 18.0, STATUS_COLOR),
    ];

    if model.wave > 0 {
        lines.push(HudLine::at(
            format!("wave {}", model.wave + 1),
            SCORE_POS + vec2(0.0, 62.0),
            18.0,
            STATUS_COLOR,
        ));
    }

    if model.game_over {
        let center = world_size / 2.0;
        lines.push(HudLine::centered(
            "GAME OVER".to_string(),
            center - vec2(0.0, 40.0),
            48.0,
            BANNER_COLOR,
        ));
        lines.push(HudLine::centered(
            format!("final score: {}", model.score),
            center + vec2(0.0, 12.0),
            24.0,
            WHITE,
        ));
        lines.push(HudLine::centered(
            "click or press Enter to restart".to_string(),
            center + vec2(0.0, 44.0),
            20.0,
            WHITE,
        ));
    }

    let (hint, hint_pos) = switch_hint("tutorial", world_size);
    lines.push(HudLine::at(hint, hint_pos, SWITCH_HINT_SIZE, SWITCH_HINT_COLOR));
    lines
}

pub fn draw_hud(model: &HudModel, viewport: &Viewport) {
    if model.game_over {
        let band = viewport.rect_to_screen(Rect::new(
            0.0,
            viewport.world_size.y / 2.0 - 90.0,
            viewport.world_size.x,
            160.0,
        ));
        draw_rectangle(band.x, band.y, band.w, band.h, BANNER_BG);
    }

    for line in layout(model, viewport.world_size) {
        let font_size = (line.size * viewport.scale).max(1.0);
        let mut pos = viewport.to_screen(line.pos);
        if line.centered {
            let dims = measure_text(&line.text, None, font_size as u16, 1.0);
            pos.x -= dims.width / 2.0;
        }
        // draw_text positions by baseline
        draw_text(&line.text, pos.x, pos.y + font_size * 0.75, font_size, line.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> HudModel {
        HudModel {
            score: 0,
            wave: 0,
            game_over: false,
            shader_enabled: false,
            shader_available: true,
        }
    }

    #[test]
    fn test_score_line() {
        let lines = layout(&HudModel { score: 40, ..model() }, vec2(800.0, 600.0));
        assert_eq!(lines[0].text, "score: 40");
        assert_eq!(lines[0].pos, vec2(16.0, 16.0));
        assert_eq!(lines[0].size, 32.0);
    }

    #[test]
    fn test_switch_hint_points_to_tutorial() {
        let lines = layout(&model(), vec2(800.0, 600.0));
        let hint = lines.last().unwrap();
        assert_eq!(hint.text, "Tab: tutorial");
        assert_eq!(hint.pos, vec2(670.0, 574.0));
    }

    #[test]
    fn test_shader_status() {
        assert_eq!(shader_text(&model()), "shader: off (S)");
        let on = HudModel { shader_enabled: true, ..model() };
        assert_eq!(shader_text(&on), "shader: on (S)");
        let broken = HudModel { shader_enabled: true, shader_available: false, ..model() };
        assert_eq!(shader_text(&broken), "shader: on (S, unavailable)");
    }

    #[test]
    fn test_banner_only_on_game_over() {
        let playing = layout(&model(), vec2(800.0, 600.0));
        assert!(!playing.iter().any(|l| l.text == "GAME OVER"));

        let over = layout(&HudModel { game_over: true, score: 70, ..model() }, vec2(800.0, 600.0));
        let banner = over.iter().find(|l| l.text == "GAME OVER").unwrap();
        assert!(banner.centered);
        assert_eq!(banner.pos.x, 400.0);
        assert!(over.iter().any(|l| l.text == "final score: 70"));
        assert!(over.iter().any(|l| l.text.contains("restart")));
    }

    #[test]
    fn test_wave_counter_after_first_clear() {
        assert!(!layout(&model(), vec2(800.0, 600.0)).iter().any(|l| l.text.starts_with("wave")));
        let lines = layout(&HudModel { wave: 2, ..model() }, vec2(800.0, 600.0));
        assert!(lines.iter().any(|l| l.text == "wave 3"));
    }
}
