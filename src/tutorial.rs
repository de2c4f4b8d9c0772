//! Getting-started scene
//!
//! Loads one background image and shows it centred in the world, with a
//! hint for switching to the platformer.

use crate::asset::{AssetManifest, AssetStore, PlaceholderStyle};
use crate::config::GameConfig;
use crate::input::FrameInput;
use crate::scene::{draw_switch_hint, Scene, Viewport};
use macroquad::logging::warn;
use macroquad::prelude::*;

pub const BACKGROUND_KEY: &str = "tutorial_background";

pub struct TutorialScene {
    background_url: String,
    world_size: Vec2,
    /// Centre point of the background in world coordinates
    background_center: Vec2,
}

impl TutorialScene {
    pub fn new(config: &GameConfig) -> Self {
        let world_size = vec2(config.window.width, config.window.height);
        Self {
            background_url: config.assets.tutorial_background.clone(),
            world_size,
            background_center: world_size / 2.0,
        }
    }
}

impl Scene for TutorialScene {
    fn name(&self) -> &'static str {
        "tutorial"
    }

    fn preload(&self) -> AssetManifest {
        AssetManifest::new().image(
            BACKGROUND_KEY,
            &self.background_url,
            (self.world_size.x as u32, self.world_size.y as u32),
            PlaceholderStyle::Sky,
        )
    }

    fn create(&mut self, assets: &AssetStore) {
        if let Err(e) = assets.get(BACKGROUND_KEY) {
            warn!("Tutorial background missing: {}", e);
        }
        self.background_center = self.world_size / 2.0;
    }

    fn update(&mut self, _input: &FrameInput, _dt: f32) {}

    fn draw(&self, assets: &AssetStore, viewport: &Viewport) {
        if let Ok(bg) = assets.get(BACKGROUND_KEY) {
            // Images are drawn at their own pixel size, anchored by their centre
            let size = vec2(bg.width as f32, bg.height as f32);
            let top_left = viewport.to_screen(self.background_center - size / 2.0);
            draw_texture_ex(
                &bg.texture,
                top_left.x,
                top_left.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(viewport.scale_size(size)),
                    ..Default::default()
                },
            );
        }
        draw_switch_hint("platformer", viewport);
    }
}
