//! Arcade Physics
//!
//! Just enough physics for a single-screen platformer:
//! - Body: a moving axis-aligned box with gravity, bounce and contact flags
//! - StaticBody: an immovable box (ground and ledges)
//! - PhysicsWorld: gravity, world bounds, pause, and the step/collide calls
//!
//! No rotation, no mass, no body-vs-body separation. Dynamic bodies only
//! collide with statics; everything else is an overlap test.

mod body;
mod world;

pub use body::{Body, Contacts, StaticBody};
pub use world::PhysicsWorld;
