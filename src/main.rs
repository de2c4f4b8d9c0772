//! Starfall: two small arcade demos
//!
//! - Tutorial: preload one background and show it centred
//! - Platformer: run, jump, collect stars, dodge bombs
//!
//! Runs natively and in the browser (wasm32 + macroquad's JS bundle).

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod anim;
mod app;
mod asset;
mod config;
mod game;
mod input;
mod physics;
mod scene;
mod shader;
mod tutorial;

use app::AppState;
use config::{load_config, FpsLimit, GameConfig};
use macroquad::logging::info;
use macroquad::prelude::*;

const LETTERBOX_COLOR: Color = Color::new(0.04, 0.04, 0.06, 1.0);

fn window_conf() -> Conf {
    let defaults = GameConfig::default();
    Conf {
        window_title: format!("{} v{}", defaults.window.title, VERSION),
        window_width: defaults.window.width as i32,
        window_height: defaults.window.height as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Seed from the config, or from the clock when none is set
fn pick_seed(config: &GameConfig) -> u64 {
    config
        .seed
        .unwrap_or_else(|| (macroquad::miniquad::date::now() * 1000.0) as u64)
}

fn draw_loading(message: &str) {
    clear_background(LETTERBOX_COLOR);
    let dims = measure_text(message, None, 24, 1.0);
    draw_text(
        message,
        (screen_width() - dims.width) / 2.0,
        screen_height() / 2.0,
        24.0,
        WHITE,
    );
}

/// Clear the areas outside the world after the scene has drawn
fn draw_letterbox(world: Rect) {
    let (sw, sh) = (screen_width(), screen_height());
    if world.x > 0.0 {
        draw_rectangle(0.0, 0.0, world.x, sh, LETTERBOX_COLOR);
        draw_rectangle(world.x + world.w, 0.0, sw - world.x - world.w, sh, LETTERBOX_COLOR);
    }
    if world.y > 0.0 {
        draw_rectangle(0.0, 0.0, sw, world.y, LETTERBOX_COLOR);
        draw_rectangle(0.0, world.y + world.h, sw, sh - world.y - world.h, LETTERBOX_COLOR);
    }
}

/// Hold the frame until the configured frame time has passed.
///
/// Native only: in the browser requestAnimationFrame paces frames.
fn wait_for_frame_budget(frame_start: f64, limit: FpsLimit) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(target_frame_time) = limit.frame_time() {
            // Sleep for the bulk, then spin-wait for precision
            let spin_margin = 0.002;
            while get_time() - frame_start + spin_margin < target_frame_time {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
            while get_time() - frame_start < target_frame_time {
                std::hint::spin_loop();
            }
        }
    }
    #[cfg(target_arch = "wasm32")]
    let _ = (frame_start, limit);
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    draw_loading("loading config...");
    next_frame().await;
    let config = load_config().await;

    let seed = pick_seed(&config);
    let mut app = AppState::new(&config, seed);

    draw_loading("loading assets...");
    next_frame().await;
    app.start().await;

    info!("=== Starfall v{} === (seed {})", VERSION, seed);

    loop {
        // Track frame start time for FPS limiting
        let frame_start = get_time();

        app.input.poll();
        let input = app.input.frame();
        app.update(&input, get_frame_time());

        clear_background(BLACK);
        let viewport = app.viewport(vec2(screen_width(), screen_height()));
        app.draw(&viewport);
        draw_letterbox(viewport.screen_rect());

        wait_for_frame_budget(frame_start, app.fps_limit);

        next_frame().await;
    }
}
