//! Arcade physics world
//!
//! Semi-implicit Euler integration followed by separation against static
//! boxes. Separation uses the body's position before the step to decide
//! which face it came through: a body that was fully above a platform lands
//! on it, one that was beside it is pushed back sideways.

use super::body::{Body, StaticBody};
use macroquad::prelude::Rect;

/// Slack when comparing the previous position with a platform face
const FACE_EPSILON: f32 = 0.01;

/// Strict AABB overlap (boxes that only share an edge do not overlap)
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Global physics settings shared by every body in a scene
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsWorld {
    /// Downward acceleration (units per second squared)
    pub gravity: f32,
    /// Area bodies with `collide_world_bounds` are kept inside
    pub bounds: Rect,
    paused: bool,
}

impl PhysicsWorld {
    pub fn new(gravity: f32, bounds: Rect) -> Self {
        Self { gravity, bounds, paused: false }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance one body by `dt` seconds.
    ///
    /// Clears the body's contact flags first, so after `step` + collisions
    /// they describe this frame only.
    pub fn step(&self, body: &mut Body, dt: f32) {
        if self.paused || !body.enabled {
            return;
        }

        body.touching = Default::default();
        body.blocked = Default::default();
        body.prev_position = body.position;

        if body.allow_gravity {
            body.velocity.y += self.gravity * dt;
        }
        body.position += body.velocity * dt;

        if body.collide_world_bounds {
            self.keep_in_bounds(body);
        }
    }

    fn keep_in_bounds(&self, body: &mut Body) {
        let b = self.bounds;

        if body.position.x < b.x {
            body.position.x = b.x;
            if body.velocity.x < 0.0 {
                body.velocity.x = -body.velocity.x * body.bounce.x;
            }
            body.blocked.left = true;
        } else if body.position.x + body.size.x > b.x + b.w {
            body.position.x = b.x + b.w - body.size.x;
            if body.velocity.x > 0.0 {
                body.velocity.x = -body.velocity.x * body.bounce.x;
            }
            body.blocked.right = true;
        }

        if body.position.y < b.y {
            body.position.y = b.y;
            if body.velocity.y < 0.0 {
                body.velocity.y = -body.velocity.y * body.bounce.y;
            }
            body.blocked.up = true;
        } else if body.position.y + body.size.y > b.y + b.h {
            body.position.y = b.y + b.h - body.size.y;
            if body.velocity.y > 0.0 {
                body.velocity.y = -body.velocity.y * body.bounce.y;
            }
            body.blocked.down = true;
        }
    }

    /// Separate a body from every static box it overlaps.
    ///
    /// Returns true if any contact happened. Does nothing while paused.
    pub fn collide_static(&self, body: &mut Body, statics: &[StaticBody]) -> bool {
        if self.paused || !body.enabled {
            return false;
        }

        let mut hit = false;
        for platform in statics {
            if !rects_overlap(&body.rect(), &platform.rect) {
                continue;
            }
            hit = true;
            separate(body, &platform.rect);
        }
        hit
    }

    /// Overlap test between two bodies (no separation)
    pub fn overlaps(&self, a: &Body, b: &Body) -> bool {
        a.enabled && b.enabled && rects_overlap(&a.rect(), &b.rect())
    }
}

fn separate(body: &mut Body, r: &Rect) {
    let prev = body.prev_position;
    let size = body.size;

    if prev.y + size.y <= r.y + FACE_EPSILON {
        land_on_top(body, r);
    } else if prev.y >= r.y + r.h - FACE_EPSILON {
        hit_underside(body, r);
    } else if prev.x + size.x <= r.x + FACE_EPSILON {
        hit_left_face(body, r);
    } else if prev.x >= r.x + r.w - FACE_EPSILON {
        hit_right_face(body, r);
    } else {
        // Started the step already inside: leave along the shallowest axis
        let pos = body.position;
        let pen_top = pos.y + size.y - r.y;
        let pen_bottom = r.y + r.h - pos.y;
        let pen_left = pos.x + size.x - r.x;
        let pen_right = r.x + r.w - pos.x;
        let min = pen_top.min(pen_bottom).min(pen_left).min(pen_right);

        if min == pen_top {
            land_on_top(body, r);
        } else if min == pen_bottom {
            hit_underside(body, r);
        } else if min == pen_left {
            hit_left_face(body, r);
        } else {
            hit_right_face(body, r);
        }
    }
}

fn land_on_top(body: &mut Body, r: &Rect) {
    body.position.y = r.y - body.size.y;
    if body.velocity.y > 0.0 {
        body.velocity.y = -body.velocity.y * body.bounce.y;
    }
    body.touching.down = true;
}

fn hit_underside(body: &mut Body, r: &Rect) {
    body.position.y = r.y + r.h;
    if body.velocity.y < 0.0 {
        body.velocity.y = -body.velocity.y * body.bounce.y;
    }
    body.touching.up = true;
}

fn hit_left_face(body: &mut Body, r: &Rect) {
    body.position.x = r.x - body.size.x;
    if body.velocity.x > 0.0 {
        body.velocity.x = -body.velocity.x * body.bounce.x;
    }
    body.touching.right = true;
}

fn hit_right_face(body: &mut Body, r: &Rect) {
    body.position.x = r.x + r.w;
    if body.velocity.x < 0.0 {
        body.velocity.x = -body.velocity.x * body.bounce.x;
    }
    body.touching.left = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::vec2;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(300.0, Rect::new(0.0, 0.0, 800.0, 600.0))
    }

    #[test]
    fn test_gravity_accumulates() {
        let world = world();
        let mut body = Body::centered(vec2(100.0, 100.0), vec2(10.0, 10.0));

        world.step(&mut body, DT);
        assert!((body.velocity.y - 5.0).abs() < 1e-4);
        world.step(&mut body, DT);
        assert!((body.velocity.y - 10.0).abs() < 1e-4);
        assert!(body.position.y > 95.0);
    }

    #[test]
    fn test_no_gravity_body_keeps_velocity() {
        let world = world();
        let mut body = Body::centered(vec2(100.0, 100.0), vec2(10.0, 10.0)).without_gravity();
        body.velocity = vec2(60.0, 20.0);

        world.step(&mut body, 0.5);
        assert_eq!(body.velocity, vec2(60.0, 20.0));
        assert_eq!(body.center(), vec2(130.0, 110.0));
    }

    #[test]
    fn test_world_bounds_clamp_and_bounce() {
        let world = world();
        let mut body = Body::centered(vec2(795.0, 300.0), vec2(10.0, 10.0))
            .with_world_bounds()
            .without_gravity()
            .with_bounce(1.0, 1.0);
        body.velocity = vec2(120.0, 0.0);

        world.step(&mut body, 0.1);
        assert_eq!(body.position.x, 790.0);
        assert_eq!(body.velocity.x, -120.0);
        assert!(body.blocked.right);
    }

    #[test]
    fn test_floor_of_world_counts_as_floor() {
        let world = world();
        let mut body = Body::centered(vec2(100.0, 590.0), vec2(20.0, 20.0)).with_world_bounds();
        body.velocity.y = 50.0;

        world.step(&mut body, DT);
        assert_eq!(body.position.y, 580.0);
        assert!(body.blocked.down);
        assert!(body.on_floor());
        // Zero bounce: stopped dead
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_land_on_platform() {
        let world = world();
        let ground = [StaticBody::new(0.0, 536.0, 800.0, 64.0)];
        let mut body = Body::centered(vec2(100.0, 500.0), vec2(32.0, 48.0)).with_bounce(0.0, 0.2);
        body.velocity.y = 200.0;

        let mut landed = false;
        for _ in 0..60 {
            world.step(&mut body, DT);
            if world.collide_static(&mut body, &ground) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert!(body.touching.down);
        assert_eq!(body.position.y, 536.0 - 48.0);
        // Bounced upward at 20% of the impact speed
        assert!(body.velocity.y < 0.0);
    }

    #[test]
    fn test_resting_body_stays_grounded() {
        let world = world();
        let ground = [StaticBody::new(0.0, 536.0, 800.0, 64.0)];
        let mut body = Body::centered(vec2(100.0, 512.0), vec2(32.0, 48.0)).with_bounce(0.0, 0.2);

        for _ in 0..120 {
            world.step(&mut body, DT);
            world.collide_static(&mut body, &ground);
            assert!(body.touching.down);
            assert!(body.position.y <= 488.0 + 1e-3);
        }
    }

    #[test]
    fn test_side_hit_stops_horizontal_motion() {
        let world = world();
        let wall = [StaticBody::new(200.0, 0.0, 50.0, 600.0)];
        let mut body = Body::centered(vec2(185.0, 300.0), vec2(20.0, 20.0)).without_gravity();
        body.velocity = vec2(160.0, 0.0);

        world.step(&mut body, 0.1);
        assert!(world.collide_static(&mut body, &wall));
        assert_eq!(body.position.x, 180.0);
        assert!(body.touching.right);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_head_bump() {
        let world = world();
        let ledge = [StaticBody::new(0.0, 100.0, 800.0, 32.0)];
        let mut body = Body::centered(vec2(100.0, 150.0), vec2(20.0, 20.0));
        body.velocity.y = -330.0;

        world.step(&mut body, 0.1);
        assert!(world.collide_static(&mut body, &ledge));
        assert!(body.touching.up);
        assert_eq!(body.position.y, 132.0);
        assert!(body.velocity.y >= 0.0);
    }

    #[test]
    fn test_paused_world_freezes_bodies() {
        let mut world = world();
        let mut body = Body::centered(vec2(100.0, 100.0), vec2(10.0, 10.0));
        body.velocity = vec2(50.0, 50.0);
        world.pause();

        let before = body.clone();
        world.step(&mut body, DT);
        assert_eq!(body, before);

        world.resume();
        world.step(&mut body, DT);
        assert_ne!(body.position, before.position);
    }

    #[test]
    fn test_overlaps_ignores_disabled() {
        let world = world();
        let a = Body::centered(vec2(100.0, 100.0), vec2(20.0, 20.0));
        let mut b = Body::centered(vec2(110.0, 110.0), vec2(20.0, 20.0));
        assert!(world.overlaps(&a, &b));

        b.enabled = false;
        assert!(!world.overlaps(&a, &b));

        // Sharing an edge is not an overlap
        let c = Body::centered(vec2(120.0, 100.0), vec2(20.0, 20.0));
        assert!(!world.overlaps(&a, &c));
    }
}
