//! Hostile projectiles: motion models, detonation, and the live collection.
//!
//! Pooled projectiles belong to the pool of the agent that fired them.
//! Detonation children are plain values kept outside any pool.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use glam::Vec2;

use hordeline_ai::fsm::{scaled_damage, steer_toward};
use hordeline_core::constants::*;
use hordeline_core::enums::{ProjectileKind, VisualTag};
use hordeline_core::state::ProjectileView;
use hordeline_core::types::{EmitterId, FieldBounds, PlayerState};

use crate::collision;
use crate::pool::{Pool, Poolable};

/// Sinusoidal sideways motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    pub amplitude: f32,
    pub frequency: f32,
}

/// Everything needed to launch a projectile.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotSpec {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub radius: f32,
    pub lifetime: u32,
    pub visual: VisualTag,
    /// Turn rate toward the player (rad/tick).
    pub homing: Option<f32>,
    pub oscillation: Option<Oscillation>,
    /// Bursts on reaching this point or on expiry.
    pub detonate_at: Option<Vec2>,
}

impl ShotSpec {
    pub fn new(pos: Vec2, vel: Vec2, damage: i32) -> Self {
        Self {
            pos,
            vel,
            damage,
            radius: PROJECTILE_DEFAULT_RADIUS,
            lifetime: PROJECTILE_DEFAULT_LIFETIME,
            visual: VisualTag::Plain,
            homing: None,
            oscillation: None,
            detonate_at: None,
        }
    }

    /// Shot along `angle` at `speed`.
    pub fn polar(pos: Vec2, angle: f32, speed: f32, damage: i32) -> Self {
        Self::new(pos, Vec2::from_angle(angle) * speed, damage)
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn lifetime(mut self, lifetime: u32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn visual(mut self, visual: VisualTag) -> Self {
        self.visual = visual;
        self
    }

    pub fn homing(mut self, turn_rate: f32) -> Self {
        self.homing = Some(turn_rate);
        self
    }

    pub fn oscillating(mut self, amplitude: f32, frequency: f32) -> Self {
        self.oscillation = Some(Oscillation {
            amplitude,
            frequency,
        });
        self
    }

    pub fn detonating_at(mut self, point: Vec2) -> Self {
        self.detonate_at = Some(point);
        self
    }
}

/// `count` shots evenly spaced around `origin`, rotated by `offset`.
pub fn ring(origin: Vec2, count: u32, speed: f32, offset: f32, damage: i32) -> impl Iterator<Item = ShotSpec> {
    (0..count).map(move |i| {
        let angle = TAU / count as f32 * i as f32 + offset;
        ShotSpec::polar(origin, angle, speed, damage)
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub radius: f32,
    pub visual: VisualTag,
    pub kind: ProjectileKind,
    pub age: u32,
    pub max_age: u32,
    pub active: bool,
    turn_rate: f32,
    amplitude: f32,
    frequency: f32,
    /// Perpendicular to the launch direction, fixed at spawn.
    perp: Vec2,
    /// Oscillation offset already applied.
    wave_applied: f32,
    detonate_at: Option<Vec2>,
}

impl Poolable for Projectile {
    type Spec = ShotSpec;

    fn from_spec(spec: &ShotSpec) -> Self {
        let kind = if spec.detonate_at.is_some() {
            ProjectileKind::SelfDetonating
        } else if spec.homing.is_some() {
            ProjectileKind::Homing
        } else {
            ProjectileKind::Normal
        };
        let (amplitude, frequency) = spec
            .oscillation
            .map_or((0.0, PROJECTILE_DEFAULT_WAVE_FREQUENCY), |o| (o.amplitude, o.frequency));
        let perp = if amplitude != 0.0 {
            let speed = spec.vel.length();
            let speed = if speed > 0.0 { speed } else { 1.0 };
            Vec2::new(-spec.vel.y, spec.vel.x) / speed
        } else {
            Vec2::ZERO
        };

        Self {
            pos: spec.pos,
            vel: spec.vel,
            damage: spec.damage,
            radius: spec.radius,
            visual: spec.visual,
            kind,
            age: 0,
            max_age: spec.lifetime,
            active: true,
            turn_rate: spec.homing.unwrap_or(0.0),
            amplitude,
            frequency,
            perp,
            wave_applied: 0.0,
            detonate_at: spec.detonate_at,
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Projectile {
    /// Build a standalone projectile outside any pool.
    pub fn spawn(spec: &ShotSpec) -> Self {
        Self::from_spec(spec)
    }

    /// Advance one tick. `target` is the player position, used for homing.
    /// Detonation children are appended to `children`; returns true if the
    /// shot burst this tick.
    pub fn update(&mut self, target: Vec2, children: &mut Vec<Projectile>) -> bool {
        if !self.active {
            return false;
        }
        self.age += 1;

        if self.turn_rate > 0.0 {
            self.vel = steer_toward(self.vel, self.pos, target, self.turn_rate);
        }

        self.pos += self.vel;

        if self.amplitude != 0.0 {
            let offset = self.amplitude * (self.age as f32 * self.frequency).sin();
            self.pos += self.perp * (offset - self.wave_applied);
            self.wave_applied = offset;
        }

        if let Some(point) = self.detonate_at {
            if self.pos.distance_squared(point) < DETONATION_RADIUS * DETONATION_RADIUS {
                return self.detonate(children);
            }
        }

        if self.age >= self.max_age {
            return self.detonate(children);
        }
        false
    }

    /// Deactivate and, for self-detonating shots, emit the child burst.
    /// Returns true if a burst was emitted.
    pub fn detonate(&mut self, children: &mut Vec<Projectile>) -> bool {
        self.active = false;
        if self.kind != ProjectileKind::SelfDetonating {
            return false;
        }
        let damage = scaled_damage(self.damage, DETONATION_CHILD_DAMAGE_FACTOR);
        children.extend(
            ring(
                self.pos,
                DETONATION_CHILD_COUNT as u32,
                DETONATION_CHILD_SPEED,
                0.0,
                damage,
            )
            .map(|spec| {
                Projectile::spawn(
                    &spec
                        .radius(DETONATION_CHILD_RADIUS)
                        .lifetime(DETONATION_CHILD_LIFETIME)
                        .visual(VisualTag::SpiritShard),
                )
            }),
        );
        true
    }

    pub fn hits_player(&self, player: &PlayerState) -> bool {
        self.active && collision::circle_hits_player(self.pos, self.radius, player)
    }

    pub fn is_out_of_bounds(&self, bounds: &FieldBounds) -> bool {
        !bounds.contains(self.pos, PROJECTILE_BOUNDS_MARGIN)
    }

    pub fn view(&self) -> ProjectileView {
        ProjectileView {
            pos: self.pos,
            radius: self.radius,
            kind: self.kind,
            visual: self.visual,
        }
    }
}

/// All live hostile projectiles: one pool per emitter plus loose
/// detonation children.
#[derive(Debug, Default)]
pub struct ProjectileField {
    pools: BTreeMap<EmitterId, Pool<Projectile>>,
    loose: Vec<Projectile>,
    children: Vec<Projectile>,
    detonations: Vec<Vec2>,
}

impl ProjectileField {
    /// Create the emitter's pool if it does not exist yet.
    pub fn register(&mut self, emitter: EmitterId, capacity: usize) {
        self.pools
            .entry(emitter)
            .or_insert_with(|| Pool::with_capacity(capacity));
    }

    /// Launch a shot from the emitter's pool. Returns false if the shot was
    /// dropped because the pool is full or unknown.
    pub fn emit(&mut self, emitter: EmitterId, spec: &ShotSpec) -> bool {
        match self.pools.get_mut(&emitter) {
            Some(pool) => pool.acquire(spec).is_some(),
            None => false,
        }
    }

    /// Move every projectile, then prune expired and out-of-bounds ones.
    pub fn integrate(&mut self, target: Vec2, bounds: &FieldBounds) {
        for pool in self.pools.values_mut() {
            for p in pool.iter_active_mut() {
                if p.update(target, &mut self.children) {
                    self.detonations.push(p.pos);
                }
                if p.active && p.is_out_of_bounds(bounds) {
                    p.active = false;
                }
            }
        }
        for p in &mut self.loose {
            if p.update(target, &mut self.children) {
                self.detonations.push(p.pos);
            }
        }
        self.loose.retain(|p| p.active && !p.is_out_of_bounds(bounds));
        self.flush_children();
    }

    /// Resolve every live projectile against the player. Consumed shots
    /// deactivate, self-detonating ones burst. Returns the damage of each hit.
    pub fn hit_player(&mut self, player: &PlayerState) -> Vec<i32> {
        let mut hits = Vec::new();
        let children = &mut self.children;
        let detonations = &mut self.detonations;
        let pooled = self.pools.values_mut().flat_map(|pool| pool.iter_active_mut());
        for p in pooled.chain(self.loose.iter_mut()) {
            if p.hits_player(player) {
                hits.push(p.damage);
                if p.detonate(children) {
                    detonations.push(p.pos);
                }
            }
        }
        self.loose.retain(|p| p.active);
        self.flush_children();
        hits
    }

    /// Drop pools whose emitter is gone and that have nothing in flight.
    pub fn release_idle(&mut self, is_live: impl Fn(EmitterId) -> bool) {
        self.pools.retain(|&id, pool| is_live(id) || !pool.is_idle());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.pools
            .values()
            .flat_map(|pool| pool.iter_active())
            .chain(self.loose.iter().filter(|p| p.active))
    }

    pub fn active_count(&self) -> usize {
        self.iter().count()
    }

    pub fn pool(&self, emitter: EmitterId) -> Option<&Pool<Projectile>> {
        self.pools.get(&emitter)
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Positions of bursts since the last call.
    pub fn take_detonations(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.detonations)
    }

    fn flush_children(&mut self) {
        self.loose.append(&mut self.children);
    }
}
