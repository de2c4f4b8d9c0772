//! Arcade bodies
//!
//! Axis-aligned boxes positioned by their top-left corner, the same way
//! sprites are drawn.

use macroquad::prelude::{Rect, Vec2};

/// Which sides of a body are in contact with something this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// A dynamic body that moves under velocity (and optionally gravity)
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Top-left corner
    pub position: Vec2,
    /// Position at the start of the last step, used to pick a separation axis
    pub prev_position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    /// Fraction of velocity kept (and reversed) on impact, per axis
    pub bounce: Vec2,
    pub allow_gravity: bool,
    pub collide_world_bounds: bool,
    /// Disabled bodies are neither moved nor collided
    pub enabled: bool,
    /// Contact with other bodies (platforms) this step
    pub touching: Contacts,
    /// Contact with the world bounds this step
    pub blocked: Contacts,
}

impl Body {
    /// Create a body centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let position = center - size / 2.0;
        Self {
            position,
            prev_position: position,
            size,
            velocity: Vec2::ZERO,
            bounce: Vec2::ZERO,
            allow_gravity: true,
            collide_world_bounds: false,
            enabled: true,
            touching: Contacts::default(),
            blocked: Contacts::default(),
        }
    }

    pub fn with_bounce(mut self, x: f32, y: f32) -> Self {
        self.bounce = Vec2::new(x, y);
        self
    }

    pub fn with_world_bounds(mut self) -> Self {
        self.collide_world_bounds = true;
        self
    }

    pub fn without_gravity(mut self) -> Self {
        self.allow_gravity = false;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    /// Move the body so its centre is at `center`, stopping it and
    /// clearing contact state
    pub fn reset(&mut self, center: Vec2) {
        self.position = center - self.size / 2.0;
        self.prev_position = self.position;
        self.velocity = Vec2::ZERO;
        self.touching = Contacts::default();
        self.blocked = Contacts::default();
    }

    /// Standing on a platform or on the bottom of the world
    pub fn on_floor(&self) -> bool {
        self.touching.down || self.blocked.down
    }
}

/// An immovable box (platforms, ground)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBody {
    pub rect: Rect,
}

impl StaticBody {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { rect: Rect::new(x, y, w, h) }
    }

    /// Create a static box centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }
}
