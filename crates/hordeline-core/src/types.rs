//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::TICK_RATE;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 / TICK_RATE as f64;
    }
}

/// Rectangular play field with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
}

impl FieldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if `p` lies inside the field grown by `margin` on every side.
    pub fn contains(&self, p: Vec2, margin: f32) -> bool {
        p.x >= -margin && p.x <= self.width + margin && p.y >= -margin && p.y <= self.height + margin
    }

    /// Clamp `p` into the field shrunk by `margin` on every side.
    pub fn clamp(&self, p: Vec2, margin: f32) -> Vec2 {
        Vec2::new(
            p.x.clamp(margin, (self.width - margin).max(margin)),
            p.y.clamp(margin, (self.height - margin).max(margin)),
        )
    }
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            width: crate::constants::DEFAULT_FIELD_WIDTH,
            height: crate::constants::DEFAULT_FIELD_HEIGHT,
        }
    }
}

/// Axis-aligned hit-box: full extents plus an offset of its center from
/// the owner's position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub size: Vec2,
    pub offset: Vec2,
}

impl Hitbox {
    pub fn centered(size: Vec2) -> Self {
        Self {
            size,
            offset: Vec2::ZERO,
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }
}

/// Position and geometry of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Visual extent (width, height).
    pub size: Vec2,
    pub hitbox: Hitbox,
}

impl Body {
    /// Body whose hit-box matches its visual extent.
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            hitbox: Hitbox::centered(size),
        }
    }

    pub fn with_hitbox(mut self, hitbox: Hitbox) -> Self {
        self.hitbox = hitbox;
        self
    }

    /// World-space center of the hit-box.
    pub fn hitbox_center(&self) -> Vec2 {
        self.pos + self.hitbox.offset
    }
}

/// Player geometry, read by the simulation every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub body: Body,
}

impl PlayerState {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            body: Body::new(pos, size),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Player width, used to scale projectile and zone tolerances.
    pub fn width(&self) -> f32 {
        self.body.size.x
    }
}

/// A shot fired by the player, resolved against hostiles each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerShot {
    pub pos: Vec2,
    pub radius: f32,
    pub damage: i32,
    pub active: bool,
}

impl PlayerShot {
    pub fn new(pos: Vec2, radius: f32, damage: i32) -> Self {
        Self {
            pos,
            radius,
            damage,
            active: true,
        }
    }
}

/// Identifies the agent that owns a projectile pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmitterId(pub u32);

/// Unit vector from `from` towards `to` and the distance between them.
/// A zero distance yields a divisor of 1 so the direction is zero, never NaN.
pub fn direction_to(from: Vec2, to: Vec2) -> (Vec2, f32) {
    let delta = to - from;
    let dist = delta.length();
    let divisor = if dist > 0.0 { dist } else { 1.0 };
    (delta / divisor, dist)
}
