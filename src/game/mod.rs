//! Platformer demo
//!
//! The getting-started scene grown into a small game: run and jump
//! across four platforms, collect falling stars, avoid bouncing bombs.
//!
//! - state: the simulation (pure, testable without a window)
//! - event: what happened this frame, drained by the scene for logging
//! - level: platform layout and star columns
//! - scene: assets, animation, shader and drawing around the state
//! - hud: score and status overlay

pub mod event;
pub mod hud;
pub mod level;
pub mod scene;
pub mod state;

pub use scene::PlatformerScene;
