//! Scene lifecycle
//!
//! A scene goes through preload → create → (update, draw)* and may be
//! restarted, which runs create again on the already-loaded assets.
//! The host merges every scene's manifest and loads it once before any
//! scene is created.
//! The host owns the frame loop and drives these callbacks; scenes never
//! block or spawn work of their own.

use crate::asset::{AssetManifest, AssetStore};
use crate::input::FrameInput;
use macroquad::logging::info;
use macroquad::prelude::{draw_text, vec2, Color, Rect, Vec2};

pub trait Scene {
    /// Short name used in logs and the HUD
    fn name(&self) -> &'static str;

    /// Images this scene needs before `create`
    fn preload(&self) -> AssetManifest;

    /// Build the scene state. Every manifest key resolves in `assets`.
    fn create(&mut self, assets: &AssetStore);

    /// Advance one frame
    fn update(&mut self, input: &FrameInput, dt: f32);

    /// Render the current state
    fn draw(&self, assets: &AssetStore, viewport: &Viewport);
}

/// Where a scene is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for the host to load its manifest
    Preload,
    /// Created and running
    Running,
}

/// A scene plus its lifecycle stage
pub struct SceneSlot {
    pub scene: Box<dyn Scene>,
    stage: Stage,
}

impl SceneSlot {
    pub fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            stage: Stage::Preload,
        }
    }

    /// Create the scene once its manifest has been loaded into `assets`
    pub fn create(&mut self, assets: &AssetStore) {
        if self.stage == Stage::Running {
            return;
        }
        self.scene.create(assets);
        self.stage = Stage::Running;
        info!("Scene '{}' running", self.scene.name());
    }

    /// Update only once running
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        if self.stage == Stage::Running {
            self.scene.update(input, dt);
        }
    }

    pub fn draw(&self, assets: &AssetStore, viewport: &Viewport) {
        if self.stage == Stage::Running {
            self.scene.draw(assets, viewport);
        }
    }
}

pub const SWITCH_HINT_SIZE: f32 = 16.0;
pub const SWITCH_HINT_COLOR: Color = Color::new(0.25, 0.25, 0.3, 1.0);

/// "Tab: <target>" and its top-left corner, bottom-right of the world
pub fn switch_hint(target: &str, world_size: Vec2) -> (String, Vec2) {
    (format!("Tab: {}", target), vec2(world_size.x - 130.0, world_size.y - 26.0))
}

pub fn draw_switch_hint(target: &str, viewport: &Viewport) {
    let (text, pos) = switch_hint(target, viewport.world_size);
    let font_size = (SWITCH_HINT_SIZE * viewport.scale).max(1.0);
    let pos = viewport.to_screen(pos);
    draw_text(&text, pos.x, pos.y + font_size * 0.75, font_size, SWITCH_HINT_COLOR);
}

/// Letterboxed mapping from the fixed-size game world to the window.
///
/// The world keeps its aspect ratio and is centred; the remaining bars are
/// left for the host to clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub world_size: Vec2,
    pub scale: f32,
    pub offset: Vec2,
}

impl Viewport {
    pub fn fit(world_size: Vec2, screen_size: Vec2) -> Self {
        let scale = (screen_size.x / world_size.x).min(screen_size.y / world_size.y).max(0.0);
        let offset = (screen_size - world_size * scale) / 2.0;
        Self { world_size, scale, offset }
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        self.offset + world * self.scale
    }

    pub fn scale_size(&self, size: Vec2) -> Vec2 {
        size * self.scale
    }

    /// Screen-space rectangle covered by a world rectangle
    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        let pos = self.to_screen(Vec2::new(rect.x, rect.y));
        Rect::new(pos.x, pos.y, rect.w * self.scale, rect.h * self.scale)
    }

    /// Screen-space area of the whole world
    pub fn screen_rect(&self) -> Rect {
        self.rect_to_screen(Rect::new(0.0, 0.0, self.world_size.x, self.world_size.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::vec2;

    #[test]
    fn test_switch_hint_names_target() {
        let (text, pos) = switch_hint("platformer", vec2(800.0, 600.0));
        assert_eq!(text, "Tab: platformer");
        assert_eq!(pos, vec2(670.0, 574.0));
    }

    #[test]
    fn test_viewport_exact_fit() {
        let vp = Viewport::fit(vec2(800.0, 600.0), vec2(800.0, 600.0));
        assert_eq!(vp.scale, 1.0);
        assert_eq!(vp.offset, Vec2::ZERO);
        assert_eq!(vp.to_screen(vec2(400.0, 300.0)), vec2(400.0, 300.0));
    }

    #[test]
    fn test_viewport_pillarbox() {
        // Wide window: bars on the left and right
        let vp = Viewport::fit(vec2(800.0, 600.0), vec2(1600.0, 600.0));
        assert_eq!(vp.scale, 1.0);
        assert_eq!(vp.offset, vec2(400.0, 0.0));
        assert_eq!(vp.screen_rect(), Rect::new(400.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_viewport_scales_down() {
        let vp = Viewport::fit(vec2(800.0, 600.0), vec2(400.0, 400.0));
        assert_eq!(vp.scale, 0.5);
        assert_eq!(vp.offset, vec2(0.0, 50.0));
        assert_eq!(vp.rect_to_screen(Rect::new(0.0, 536.0, 800.0, 64.0)), Rect::new(0.0, 318.0, 400.0, 32.0));
    }
}
