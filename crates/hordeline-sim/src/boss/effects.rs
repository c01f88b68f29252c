//! Timed boss effects: delayed bursts, damage zones, orbit shots, dash trails.
//!
//! Each effect advances itself once per tick and reports when it fires or
//! expires. Owners compact expired effects after the update loop.

use glam::Vec2;
use rand::Rng;

use hordeline_core::constants::{ORBIT_MAX_RADIUS, TRAIL_SLOTS};
use hordeline_core::state::{TrailView, ZoneView};

use crate::collision;

/// A bomb or meteor: counts up from a negative pre-delay to its trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayedBurst {
    pub pos: Vec2,
    pub timer: i32,
    pub trigger: i32,
    /// Re-aim at the player (plus jitter) when the timer crosses zero.
    pub track_jitter: Option<f32>,
    /// Position is known; false while a tracking meteor waits to lock on.
    pub locked: bool,
    pub spawns_zone: bool,
    pub done: bool,
}

impl DelayedBurst {
    /// Burst at a fixed point after `trigger` ticks.
    pub fn bomb(pos: Vec2, trigger: i32) -> Self {
        Self {
            pos,
            timer: 0,
            trigger,
            track_jitter: None,
            locked: true,
            spawns_zone: false,
            done: false,
        }
    }

    /// Burst that locks onto the player after `pre_delay` ticks and fires
    /// `trigger` ticks later, leaving a damage zone.
    pub fn meteor(pre_delay: i32, trigger: i32, jitter: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            timer: -pre_delay,
            trigger,
            track_jitter: Some(jitter),
            locked: false,
            spawns_zone: true,
            done: false,
        }
    }

    /// Advance one tick. Returns true on the tick the burst fires.
    pub fn update(&mut self, target: Vec2, rng: &mut impl Rng) -> bool {
        if self.done {
            return false;
        }
        self.timer += 1;
        if !self.locked && self.timer >= 0 {
            let jitter = self.track_jitter.unwrap_or(0.0);
            let offset = if jitter > 0.0 {
                Vec2::new(rng.gen_range(-jitter..=jitter), rng.gen_range(-jitter..=jitter))
            } else {
                Vec2::ZERO
            };
            self.pos = target + offset;
            self.locked = true;
        }
        if self.timer >= self.trigger {
            self.done = true;
            return true;
        }
        false
    }
}

/// A circular area that deals damage during the first `danger_ratio` of its
/// lifetime and lingers as a marker afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageZone {
    pub pos: Vec2,
    pub radius: f32,
    pub age: u32,
    pub lifetime: u32,
    pub danger_ratio: f32,
    pub damage: i32,
}

impl DamageZone {
    pub fn new(pos: Vec2, radius: f32, lifetime: u32, danger_ratio: f32, damage: i32) -> Self {
        Self {
            pos,
            radius,
            age: 0,
            lifetime,
            danger_ratio,
            damage,
        }
    }

    pub fn update(&mut self) {
        self.age += 1;
    }

    pub fn is_lethal(&self) -> bool {
        (self.age as f32) < self.lifetime as f32 * self.danger_ratio
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }

    /// Lethal and reaching `point` with the given tolerance.
    pub fn hits(&self, point: Vec2, tolerance: f32) -> bool {
        self.is_lethal() && collision::point_in_circle(point, self.pos, self.radius + tolerance)
    }

    pub fn view(&self) -> ZoneView {
        ZoneView {
            pos: self.pos,
            radius: self.radius,
            lethal: self.is_lethal(),
        }
    }
}

/// A shot moving on a widening circle around a fixed center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitShot {
    pub center: Vec2,
    pub angle: f32,
    pub radius: f32,
    /// Signed; negative rotates the other way.
    pub angular_speed: f32,
    pub radial_speed: f32,
    pub frozen: u32,
}

impl OrbitShot {
    pub fn pos(&self) -> Vec2 {
        self.center + Vec2::from_angle(self.angle) * self.radius
    }

    pub fn update(&mut self) {
        if self.frozen > 0 {
            self.frozen -= 1;
            return;
        }
        self.angle += self.angular_speed;
        self.radius += self.radial_speed;
    }

    pub fn is_spent(&self) -> bool {
        self.radius >= ORBIT_MAX_RADIUS
    }
}

/// A rotated-rectangle damage strip left behind by a dash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trail {
    pub start: Vec2,
    pub end: Vec2,
    pub half_height: f32,
    pub damage: i32,
    /// Ticks since the dash finished; `None` while it is still being drawn.
    pub timer: Option<u32>,
    pub lifetime: u32,
    pub active: bool,
}

impl Trail {
    const IDLE: Trail = Trail {
        start: Vec2::ZERO,
        end: Vec2::ZERO,
        half_height: 0.0,
        damage: 0,
        timer: None,
        lifetime: 0,
        active: false,
    };

    pub fn hits(&self, point: Vec2, tolerance: f32) -> bool {
        self.active
            && collision::point_in_segment_rect(point, self.start, self.end, self.half_height, tolerance)
    }

    pub fn view(&self) -> TrailView {
        TrailView {
            start: self.start,
            end: self.end,
            half_height: self.half_height,
        }
    }
}

/// Fixed set of reusable dash-trail slots.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailPool {
    slots: [Trail; TRAIL_SLOTS],
}

impl Default for TrailPool {
    fn default() -> Self {
        Self {
            slots: [Trail::IDLE; TRAIL_SLOTS],
        }
    }
}

impl TrailPool {
    /// Claim a slot for a trail starting at `start`. Prefers a free slot,
    /// otherwise recycles the finished trail that has been visible longest.
    /// Returns `None` if every slot is still being drawn.
    pub fn claim(&mut self, start: Vec2, half_height: f32, damage: i32, lifetime: u32) -> Option<usize> {
        let idx = self.slots.iter().position(|t| !t.active).or_else(|| {
            self.slots
                .iter()
                .enumerate()
                .filter_map(|(i, t)| t.timer.map(|age| (i, age)))
                .max_by_key(|&(_, age)| age)
                .map(|(i, _)| i)
        })?;

        self.slots[idx] = Trail {
            start,
            end: start,
            half_height,
            damage,
            timer: None,
            lifetime,
            active: true,
        };
        Some(idx)
    }

    /// Stretch a trail that is still being drawn.
    pub fn extend(&mut self, idx: usize, end: Vec2) {
        if let Some(trail) = self.slots.get_mut(idx) {
            trail.end = end;
        }
    }

    /// Start the fade timer of a trail.
    pub fn finish(&mut self, idx: usize) {
        if let Some(trail) = self.slots.get_mut(idx) {
            trail.timer = Some(0);
        }
    }

    pub fn update(&mut self) {
        for trail in self.slots.iter_mut().filter(|t| t.active) {
            if let Some(age) = trail.timer.as_mut() {
                *age += 1;
                if *age >= trail.lifetime {
                    trail.active = false;
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots = [Trail::IDLE; TRAIL_SLOTS];
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Trail> {
        self.slots.iter().filter(|t| t.active)
    }
}
