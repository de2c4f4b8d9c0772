//! Platformer scene
//!
//! Glue between the simulation in `state` and the host: asset keys,
//! animation playback, the shader pipeline and drawing.

use super::event::Events;
use super::hud::{self, HudModel};
use super::state::PlatformerState;
use crate::anim::{AnimationPlayer, AnimationSet};
use crate::asset::{AssetManifest, AssetStore, LoadedTexture, PlaceholderStyle};
use crate::config::GameConfig;
use crate::input::FrameInput;
use crate::physics::Body;
use crate::scene::{Scene, Viewport};
use crate::shader::ShaderPipeline;
use macroquad::logging::{info, warn};
use macroquad::prelude::*;

pub const SKY_KEY: &str = "sky";
pub const GROUND_KEY: &str = "ground";
pub const STAR_KEY: &str = "star";
pub const BOMB_KEY: &str = "bomb";
pub const DUDE_KEY: &str = "dude";

/// Frames in the walking character sheet
const DUDE_FRAMES: u32 = 9;

const HURT_TINT: Color = Color::new(1.0, 0.0, 0.0, 1.0);

pub struct PlatformerScene {
    config: GameConfig,
    seed: u64,
    state: PlatformerState,
    player_anim: AnimationPlayer,
    shader: ShaderPipeline,
}

impl PlatformerScene {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self {
            config: config.clone(),
            seed,
            state: PlatformerState::new(config, seed),
            player_anim: AnimationPlayer::new(AnimationSet::walker(config.player.frame_rate)),
            shader: ShaderPipeline::inert(config.shader.time_step),
        }
    }

    pub fn state(&self) -> &PlatformerState {
        &self.state
    }

    fn sync_animation(&mut self, dt: f32) {
        let clip = self.state.player.facing.animation();
        self.player_anim.play(clip, true);
        self.player_anim.update(dt);
    }

    fn draw_sprite(texture: &LoadedTexture, body: &Body, frame: Option<usize>, tint: Color, viewport: &Viewport) {
        let dest = viewport.rect_to_screen(body.rect());
        draw_texture_ex(
            &texture.texture,
            dest.x,
            dest.y,
            tint,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                source: frame.map(|f| texture.frame_rect(f)),
                ..Default::default()
            },
        );
    }

    fn draw_world(&self, assets: &AssetStore, viewport: &Viewport) {
        if let Ok(sky) = assets.get(SKY_KEY) {
            let size = vec2(sky.width as f32, sky.height as f32);
            let top_left = viewport.to_screen(self.state.world_size() / 2.0 - size / 2.0);
            draw_texture_ex(
                &sky.texture,
                top_left.x,
                top_left.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(viewport.scale_size(size)),
                    ..Default::default()
                },
            );
        }

        if let Ok(ground) = assets.get(GROUND_KEY) {
            for platform in &self.state.platforms {
                let dest = viewport.rect_to_screen(platform.rect);
                draw_texture_ex(
                    &ground.texture,
                    dest.x,
                    dest.y,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(vec2(dest.w, dest.h)),
                        ..Default::default()
                    },
                );
            }
        }
    }

    fn draw_actors(&self, assets: &AssetStore, viewport: &Viewport) {
        if let Ok(star) = assets.get(STAR_KEY) {
            for s in self.state.stars.iter().filter(|s| s.is_active()) {
                Self::draw_sprite(star, &s.body, None, WHITE, viewport);
            }
        }

        if let Ok(bomb) = assets.get(BOMB_KEY) {
            for b in &self.state.bombs {
                Self::draw_sprite(bomb, &b.body, None, WHITE, viewport);
            }
        }

        if let Ok(dude) = assets.get(DUDE_KEY) {
            let player = &self.state.player;
            let tint = if player.hurt { HURT_TINT } else { WHITE };
            Self::draw_sprite(dude, &player.body, Some(self.player_anim.current_frame()), tint, viewport);
        }
    }
}

impl Scene for PlatformerScene {
    fn name(&self) -> &'static str {
        "platformer"
    }

    fn preload(&self) -> AssetManifest {
        let assets = &self.config.assets;
        let (w, h) = (self.config.window.width as u32, self.config.window.height as u32);
        let star = self.config.stars.size;
        let bomb = self.config.bombs.size;

        AssetManifest::new()
            .image(SKY_KEY, &assets.sky, (w, h), PlaceholderStyle::Sky)
            .image(GROUND_KEY, &assets.ground, (400, 32), PlaceholderStyle::Ground)
            .image(STAR_KEY, &assets.star, (star.0 as u32, star.1 as u32), PlaceholderStyle::Star)
            .image(BOMB_KEY, &assets.bomb, (bomb.0 as u32, bomb.1 as u32), PlaceholderStyle::Bomb)
            .spritesheet(
                DUDE_KEY,
                &assets.dude,
                assets.dude_frame_width,
                assets.dude_frame_height,
                DUDE_FRAMES,
                PlaceholderStyle::Character,
            )
    }

    fn create(&mut self, assets: &AssetStore) {
        for key in [SKY_KEY, GROUND_KEY, STAR_KEY, BOMB_KEY, DUDE_KEY] {
            match assets.get(key) {
                Ok(t) if t.placeholder => warn!("Platformer '{}' is using a placeholder", key),
                Ok(_) => {}
                Err(e) => warn!("Platformer asset missing: {}", e),
            }
        }

        if !self.shader.is_compiled() {
            self.shader = ShaderPipeline::new(self.config.shader.time_step);
        }
        self.state = PlatformerState::new(&self.config, self.seed);
        self.player_anim = AnimationPlayer::new(AnimationSet::walker(self.config.player.frame_rate));
        self.player_anim.play("turn", false);
        info!("Platformer created (seed {})", self.seed);
    }

    fn update(&mut self, input: &FrameInput, dt: f32) {
        self.state.update(input, dt);
        self.shader.tick();
        self.sync_animation(dt);
        log_events(&mut self.state.events);
    }

    fn draw(&self, assets: &AssetStore, viewport: &Viewport) {
        self.draw_world(assets, viewport);

        let shaded = self.state.shader_enabled() && self.shader.apply();
        self.draw_actors(assets, viewport);
        if shaded {
            self.shader.reset();
        }

        let model = HudModel::from_state(&self.state, self.shader.is_compiled());
        hud::draw_hud(&model, viewport);
    }
}

fn log_events(events: &mut Events) {
    if events.is_empty() {
        return;
    }
    for e in events.star_collected.drain() {
        info!("Star {} collected at ({:.0}, {:.0}), score {}", e.star, e.position.x, e.position.y, e.score);
    }
    for e in events.wave_cleared.drain() {
        info!("Wave {} cleared, bomb dropped at x={:.0}", e.wave, e.bomb_spawn.x);
    }
    for e in events.bomb_hit.drain() {
        info!("Hit bomb {} at ({:.0}, {:.0}), final score {}", e.bomb, e.position.x, e.position.y, e.final_score);
    }
    for enabled in events.shader_toggled.drain() {
        info!("Shader {}", if enabled { "enabled" } else { "disabled" });
    }
    for _ in events.restarted.drain() {
        info!("Platformer restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_keys() {
        let scene = PlatformerScene::new(&GameConfig::default(), 1);
        let manifest = scene.preload();
        assert_eq!(manifest.len(), 5);
        for key in [SKY_KEY, GROUND_KEY, STAR_KEY, BOMB_KEY, DUDE_KEY] {
            assert!(manifest.get(key).is_some(), "missing {}", key);
        }
        let dude = manifest.get(DUDE_KEY).unwrap();
        assert_eq!(dude.placeholder_size, (32 * 9, 48));
    }

    #[test]
    fn test_animation_follows_facing() {
        let mut scene = PlatformerScene::new(&GameConfig::default(), 1);
        let right = FrameInput { right: true, ..Default::default() };
        scene.update(&right, 1.0 / 60.0);
        assert_eq!(scene.player_anim.current_name(), Some("right"));
        assert!((5..=8).contains(&scene.player_anim.current_frame()));

        scene.update(&FrameInput::default(), 1.0 / 60.0);
        assert_eq!(scene.player_anim.current_name(), Some("turn"));
        assert_eq!(scene.player_anim.current_frame(), 4);
    }

    #[test]
    fn test_update_drains_events_and_ticks_shader() {
        let mut scene = PlatformerScene::new(&GameConfig::default(), 1);
        let toggle = FrameInput { toggle_shader: true, ..Default::default() };
        scene.update(&toggle, 1.0 / 60.0);
        assert!(scene.state().shader_enabled());
        assert!(scene.state.events.is_empty());
        assert!((scene.shader.time() - 0.005).abs() < 1e-6);
    }
}
