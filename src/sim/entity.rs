//! Game entities: shared kinematics plus the fruit and bomb variants
//!
//! Both entity types fly the same Euler-integrated ballistic arc; they
//! differ in their pointer hit-test shape and in which screen edges cull
//! them. Coordinates are screen space: origin top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shared kinematic state for anything launched from the bottom of the
/// panel. Position is the sprite's top-left corner in pixels; velocity is
/// in pixels per simulation tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Sprite dimensions, fixed at construction. Both components > 0.
    size: Vec2,
}

impl Kinematics {
    pub fn new(pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0);
        Self { pos, vel, size }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// One Euler step of the ballistic arc: move, then accelerate downward.
    /// Velocity is unbounded; entities are culled long before that matters.
    pub fn step(&mut self, gravity: f32) {
        self.pos += self.vel;
        self.vel.y += gravity;
    }

    /// Axis-aligned bounding-rectangle test, closed on all edges.
    pub fn rect_contains(&self, p: Vec2) -> bool {
        p.x >= self.pos.x
            && p.x <= self.pos.x + self.size.x
            && p.y >= self.pos.y
            && p.y <= self.pos.y + self.size.y
    }
}

/// A fruit in flight. `kind` indexes the catalog entry whose art pair
/// (whole/sliced) the fruit was spawned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    pub kind: usize,
    pub body: Kinematics,
    sliced: bool,
}

impl Fruit {
    pub fn new(kind: usize, body: Kinematics) -> Self {
        Self {
            kind,
            body,
            sliced: false,
        }
    }

    pub fn is_sliced(&self) -> bool {
        self.sliced
    }

    /// Mark the fruit sliced. Returns true only on the first call; the flag
    /// never reverts, which is what keeps repeat hits score-neutral.
    pub fn slice(&mut self) -> bool {
        if self.sliced {
            return false;
        }
        self.sliced = true;
        true
    }

    pub fn update(&mut self, gravity: f32) {
        self.body.step(gravity);
    }

    /// Pointer hit test: quadratic containment around the sprite origin.
    /// A point hits when its squared distance from (x, y) is at most
    /// `width * height`. The bound is an area rather than a geometric
    /// ellipse equation; slicing feel is tuned around it.
    pub fn contains(&self, p: Vec2) -> bool {
        (p - self.body.pos).length_squared() <= self.body.width() * self.body.height()
    }

    /// Fully cleared the left, right, or bottom edge. Fruit launches from
    /// below the panel and is never culled on the way in or out the top.
    pub fn is_off_screen(&self, panel_width: f32, panel_height: f32) -> bool {
        let (pos, size) = (self.body.pos, self.body.size);
        pos.x + size.x < 0.0 || pos.x - size.x > panel_width || pos.y - size.y > panel_height
    }
}

/// A bomb in flight. Slicing one ends the round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub body: Kinematics,
}

impl Bomb {
    pub fn new(body: Kinematics) -> Self {
        Self { body }
    }

    pub fn update(&mut self, gravity: f32) {
        self.body.step(gravity);
    }

    /// Bounding-rectangle hit test.
    pub fn is_hit(&self, p: Vec2) -> bool {
        self.body.rect_contains(p)
    }

    /// Bombs are only culled once they fall back out through the bottom.
    /// They launch upward from inside the panel, so horizontal exits are
    /// not checked.
    pub fn is_off_screen(&self, panel_height: f32) -> bool {
        self.body.pos.y > panel_height
    }
}
