//! Platformer simulation
//!
//! Pure game state: no textures, no GL, no device input. The scene feeds
//! it a `FrameInput` each frame and draws whatever it ends up holding.
//!
//! Frame order:
//! 1. shader toggle (works even after game over)
//! 2. restart, only while game over
//! 3. player controls (using last frame's contact flags)
//! 4. per fixed substep: physics step + platform collisions (player,
//!    stars, bombs), then star pickups, then bomb hits
//!
//! Physics never sees more than `FIXED_STEP` at once. A long frame (asset
//! loading, a backgrounded tab) is capped at `MAX_FRAME_TIME` and split
//! into substeps, so nothing moves farther per step than a ledge is thick.

use super::event::{BombHit, Events, StarCollected, WaveCleared};
use super::level;
use crate::config::GameConfig;
use crate::input::FrameInput;
use crate::physics::{Body, PhysicsWorld, StaticBody};
use macroquad::prelude::{vec2, Rect, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Longest physics step, in seconds
pub const FIXED_STEP: f32 = 1.0 / 60.0;

/// Frame time beyond this is dropped (the game slows down instead)
pub const MAX_FRAME_TIME: f32 = 0.1;

/// Split a frame into equal substeps no longer than `FIXED_STEP`.
/// Returns (count, length). Non-positive frames give one empty step.
pub fn substeps(dt: f32) -> (u32, f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_TIME);
    // Tolerance keeps an exact 1/60 frame at one step despite rounding
    let count = ((dt / FIXED_STEP) - 1e-3).ceil().max(1.0) as u32;
    (count, dt / count as f32)
}

/// Which way the player sprite faces (doubles as the animation name)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Turn,
    Right,
}

impl Facing {
    pub fn animation(&self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Turn => "turn",
            Facing::Right => "right",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    /// Drawn tinted red after touching a bomb
    pub hurt: bool,
}

#[derive(Debug, Clone)]
pub struct Star {
    pub body: Body,
    /// Horizontal centre it respawns at
    pub spawn_x: f32,
}

impl Star {
    pub fn is_active(&self) -> bool {
        self.body.enabled
    }
}

#[derive(Debug, Clone)]
pub struct Bomb {
    pub body: Body,
}

pub struct PlatformerState {
    config: GameConfig,
    pub physics: PhysicsWorld,
    pub platforms: Vec<StaticBody>,
    pub player: Player,
    pub stars: Vec<Star>,
    pub bombs: Vec<Bomb>,
    score: u32,
    game_over: bool,
    shader_enabled: bool,
    wave: u32,
    rng: SmallRng,
    pub events: Events,
}

impl PlatformerState {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut state = Self {
            config: config.clone(),
            physics: PhysicsWorld::new(
                config.physics.gravity,
                Rect::new(0.0, 0.0, config.window.width, config.window.height),
            ),
            platforms: level::platforms(config),
            player: spawn_player(config),
            stars: Vec::new(),
            bombs: Vec::new(),
            score: 0,
            game_over: false,
            shader_enabled: config.shader.enabled_at_start,
            wave: 0,
            rng: SmallRng::seed_from_u64(seed),
            events: Events::new(),
        };
        state.stars = state.spawn_stars();
        state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn shader_enabled(&self) -> bool {
        self.shader_enabled
    }

    /// Number of times every star has been collected this round
    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn active_stars(&self) -> usize {
        self.stars.iter().filter(|s| s.is_active()).count()
    }

    pub fn world_size(&self) -> Vec2 {
        vec2(self.config.window.width, self.config.window.height)
    }

    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        if input.toggle_shader {
            self.toggle_shader();
        }

        if self.game_over {
            if input.restart {
                self.restart();
            }
            return;
        }

        self.apply_controls(input);

        let (count, step) = substeps(dt);
        for _ in 0..count {
            self.step_physics(step);
            self.check_pickups();
            self.check_bombs();
            if self.game_over {
                break;
            }
        }
    }

    pub fn toggle_shader(&mut self) {
        self.shader_enabled = !self.shader_enabled;
        self.events.shader_toggled.send(self.shader_enabled);
    }

    /// Start a fresh round. The shader flag and the RNG stream carry over.
    pub fn restart(&mut self) {
        self.physics.resume();
        self.player = spawn_player(&self.config);
        self.stars = self.spawn_stars();
        self.bombs.clear();
        self.score = 0;
        self.wave = 0;
        self.game_over = false;
        self.events.restarted.send(());
    }

    fn apply_controls(&mut self, input: &FrameInput) {
        let speed = self.config.player.run_speed;
        let player = &mut self.player;

        match input.horizontal() {
            -1 => {
                player.body.velocity.x = -speed;
                player.facing = Facing::Left;
            }
            1 => {
                player.body.velocity.x = speed;
                player.facing = Facing::Right;
            }
            _ => {
                player.body.velocity.x = 0.0;
                player.facing = Facing::Turn;
            }
        }

        if input.jump && player.body.on_floor() {
            player.body.velocity.y = -self.config.player.jump_speed;
        }
    }

    fn step_physics(&mut self, dt: f32) {
        let physics = &self.physics;
        let platforms = &self.platforms;

        physics.step(&mut self.player.body, dt);
        physics.collide_static(&mut self.player.body, platforms);

        for star in &mut self.stars {
            physics.step(&mut star.body, dt);
            physics.collide_static(&mut star.body, platforms);
        }

        for bomb in &mut self.bombs {
            physics.step(&mut bomb.body, dt);
            physics.collide_static(&mut bomb.body, platforms);
        }
    }

    fn check_pickups(&mut self) {
        let touched: Vec<usize> = self
            .stars
            .iter()
            .enumerate()
            .filter(|(_, star)| self.physics.overlaps(&self.player.body, &star.body))
            .map(|(i, _)| i)
            .collect();

        for i in touched {
            self.collect_star(i);
        }
    }

    fn check_bombs(&mut self) {
        let hit = self
            .bombs
            .iter()
            .position(|bomb| self.physics.overlaps(&self.player.body, &bomb.body));
        if let Some(i) = hit {
            self.hit_bomb(i);
        }
    }

    /// Pick up a star: hide it and add to the score.
    ///
    /// Ignored after game over or for stars that are already collected.
    /// Collecting the last active star starts the next wave.
    pub fn collect_star(&mut self, index: usize) {
        if self.game_over {
            return;
        }
        let Some(star) = self.stars.get_mut(index) else { return };
        if !star.is_active() {
            return;
        }

        star.body.enabled = false;
        let position = star.body.center();
        self.score = self.score.saturating_add(self.config.stars.score_per_star);
        self.events.star_collected.send(StarCollected {
            star: index,
            position,
            score: self.score,
        });

        if self.active_stars() == 0 {
            self.release_wave();
        }
    }

    /// Player touched a bomb: freeze the world and end the round
    pub fn hit_bomb(&mut self, index: usize) {
        if self.game_over {
            return;
        }
        self.physics.pause();
        self.player.hurt = true;
        self.player.facing = Facing::Turn;
        self.game_over = true;

        let position = self
            .bombs
            .get(index)
            .map(|b| b.body.center())
            .unwrap_or_else(|| self.player.body.center());
        self.events.bomb_hit.send(BombHit {
            bomb: index,
            position,
            final_score: self.score,
        });
    }

    fn release_wave(&mut self) {
        for star in &mut self.stars {
            star.body.reset(vec2(star.spawn_x, 0.0));
            star.body.enabled = true;
        }
        self.wave += 1;

        let bomb_spawn = self.spawn_bomb();
        self.events.wave_cleared.send(WaveCleared {
            wave: self.wave,
            bomb_spawn,
        });
    }

    /// Drop a bomb on the half of the world the player is not in
    fn spawn_bomb(&mut self) -> Vec2 {
        let width = self.config.window.width;
        let half = width / 2.0;
        let x = if self.player.body.center().x < half {
            self.random_between(half, width)
        } else {
            self.random_between(0.0, half)
        };
        let bombs = &self.config.bombs;
        let center = vec2(x, bombs.spawn_y);
        let (speed_min, speed_max, fall_speed) = (bombs.speed_min, bombs.speed_max, bombs.fall_speed);

        let mut body = Body::centered(center, vec2(bombs.size.0, bombs.size.1))
            .with_bounce(1.0, 1.0)
            .with_world_bounds()
            .without_gravity();
        body.velocity = vec2(self.random_between(speed_min, speed_max), fall_speed);

        self.bombs.push(Bomb { body });
        center
    }

    fn spawn_stars(&mut self) -> Vec<Star> {
        let size = vec2(self.config.stars.size.0, self.config.stars.size.1);
        let (bounce_min, bounce_max) = (self.config.stars.bounce_min, self.config.stars.bounce_max);

        level::star_columns(&self.config.stars)
            .into_iter()
            .map(|x| {
                let bounce = self.random_between(bounce_min, bounce_max);
                Star {
                    body: Body::centered(vec2(x, 0.0), size).with_bounce(0.0, bounce),
                    spawn_x: x,
                }
            })
            .collect()
    }

    /// Uniform in [low, high), or `low` for an empty range
    fn random_between(&mut self, low: f32, high: f32) -> f32 {
        if high > low {
            self.rng.gen_range(low..high)
        } else {
            low
        }
    }
}

fn spawn_player(config: &GameConfig) -> Player {
    let p = &config.player;
    Player {
        body: Body::centered(vec2(p.spawn.0, p.spawn.1), vec2(p.size.0, p.size.1))
            .with_bounce(0.0, p.bounce)
            .with_world_bounds(),
        facing: Facing::Turn,
        hurt: false,
    }
}
