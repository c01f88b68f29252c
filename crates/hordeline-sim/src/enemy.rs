//! Regular enemy agent: chase plus an optional table-driven ranged attack.

use glam::Vec2;
use rand::Rng;

use hordeline_ai::fsm::{scaled_damage, should_move, update_in_range};
use hordeline_ai::profiles::{get_enemy_profile, EnemyProfile, FirePattern, RangedProfile};
use hordeline_core::constants::*;
use hordeline_core::enums::EnemyKind;
use hordeline_core::types::{direction_to, Body, EmitterId};

use crate::projectile::{ring, ShotSpec};

/// ECS component for a live regular enemy. Paired with a `Body`.
#[derive(Debug, Clone)]
pub struct EnemyAgent {
    pub id: EmitterId,
    pub kind: EnemyKind,
    pub profile: EnemyProfile,
    /// Table speed times the level multiplier.
    pub speed: f32,
    pub hp: i32,
    pub in_range: bool,
    /// Ticks between shots.
    pub shot_interval: u32,
    pub shot_timer: u32,
    /// Spiral shooters only: pause after a full rotation.
    pub rest_window: u32,
    pub rest_timer: u32,
    pub spiral_angle: f32,
    pub spiral_shots: u32,
    /// Death grace ticks left once HP reaches zero.
    pub dying: Option<u32>,
    pub active: bool,
    /// Shots fired this tick, drained by the orchestrator.
    pub pending: Vec<ShotSpec>,
}

impl EnemyAgent {
    pub fn new(id: EmitterId, kind: EnemyKind, speed_multiplier: f32, rng: &mut impl Rng) -> Self {
        let profile = get_enemy_profile(kind);
        let rolled = rng.gen_range(SHOOT_COOLDOWN_MIN..=SHOOT_COOLDOWN_MAX);
        let (shot_interval, rest_window) = match profile.ranged.map(|r| r.pattern) {
            Some(FirePattern::Spiral { .. }) => (SPIRAL_SHOT_INTERVAL, rolled),
            _ => (rolled, 0),
        };
        let shot_timer = rng.gen_range(0..shot_interval.max(1));

        Self {
            id,
            kind,
            profile,
            speed: profile.speed * speed_multiplier,
            hp: profile.max_hp,
            in_range: false,
            shot_interval,
            shot_timer,
            rest_window,
            rest_timer: 0,
            spiral_angle: 0.0,
            spiral_shots: 0,
            dying: None,
            active: true,
            pending: Vec::new(),
        }
    }

    pub fn body(&self, pos: Vec2) -> Body {
        Body::new(pos, Vec2::splat(self.profile.size))
    }

    pub fn max_hp(&self) -> i32 {
        self.profile.max_hp
    }

    pub fn is_dying(&self) -> bool {
        self.dying.is_some()
    }

    /// Can still be hit and deal contact damage.
    pub fn is_alive(&self) -> bool {
        self.active && self.dying.is_none()
    }

    /// Apply damage. Armor is not applied to regular enemies.
    /// Returns true if this hit killed the agent.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.hp -= damage;
        if self.hp <= 0 {
            self.hp = 0;
            self.dying = Some(ENEMY_DEATH_TICKS);
            return true;
        }
        false
    }

    /// Advance one tick toward `target` (the player position).
    pub fn update(&mut self, body: &mut Body, target: Vec2) {
        if !self.active {
            return;
        }
        if let Some(ticks) = self.dying.as_mut() {
            *ticks = ticks.saturating_sub(1);
            if *ticks == 0 {
                self.active = false;
            }
            return;
        }

        self.shot_timer = self.shot_timer.saturating_sub(1);
        self.rest_timer = self.rest_timer.saturating_sub(1);

        let (dir, distance) = direction_to(body.pos, target);

        if let Some(ranged) = self.profile.ranged {
            self.in_range = update_in_range(self.in_range, distance * distance, ranged.range);
            if self.in_range && self.shot_timer == 0 && self.rest_timer == 0 {
                self.fire(&ranged, body.pos, dir, target);
                self.shot_timer = self.shot_interval;
            }
        }

        let stops = self.profile.ranged.is_some_and(|r| r.stops_to_shoot);
        if should_move(distance, stops, self.in_range) {
            body.pos += dir * self.speed;
        }
    }

    fn fire(&mut self, ranged: &RangedProfile, origin: Vec2, dir: Vec2, target: Vec2) {
        let damage = scaled_damage(self.profile.damage, ranged.damage_factor);
        let bearing = dir.y.atan2(dir.x);
        let finish = |spec: ShotSpec| spec.lifetime(ranged.lifetime).visual(ranged.visual);

        match ranged.pattern {
            FirePattern::Aimed { speed, radius } => {
                self.pending
                    .push(finish(ShotSpec::new(origin, dir * speed, damage).radius(radius)));
            }
            FirePattern::Cone { offsets, speed } => {
                self.pending.extend(
                    offsets
                        .iter()
                        .map(|o| finish(ShotSpec::polar(origin, bearing + o, speed, damage))),
                );
            }
            FirePattern::SelfDetonating { speed, radius } => {
                self.pending.push(finish(
                    ShotSpec::new(origin, dir * speed, damage)
                        .radius(radius)
                        .detonating_at(target),
                ));
            }
            FirePattern::Radial { count, speed } => {
                self.pending
                    .extend(ring(origin, count, speed, 0.0, damage).map(finish));
            }
            FirePattern::Spiral {
                step,
                shots_per_turn,
                speed,
            } => {
                self.pending
                    .push(finish(ShotSpec::polar(origin, self.spiral_angle, speed, damage)));
                self.spiral_angle += step;
                self.spiral_shots += 1;
                if self.spiral_shots >= shots_per_turn {
                    self.spiral_angle = 0.0;
                    self.spiral_shots = 0;
                    self.rest_timer = self.rest_window;
                }
            }
            FirePattern::Homing {
                speed,
                radius,
                turn_rate,
            } => {
                self.pending.push(finish(
                    ShotSpec::new(origin, dir * speed, damage)
                        .radius(radius)
                        .homing(turn_rate),
                ));
            }
        }
    }
}
