//! Decision functions shared by enemy and boss agents.
//!
//! Pure functions over plain data: range hysteresis, skill selection,
//! phase escalation, armor mitigation and homing steering.
//! No ECS dependency.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use hordeline_core::constants::*;
use hordeline_core::enums::{BossPhase, SkillId};

/// Update an in-range flag with a hysteresis band: enter at `range`,
/// leave only beyond `range * RANGE_HYSTERESIS_FACTOR`.
pub fn update_in_range(in_range: bool, dist_sq: f32, range: f32) -> bool {
    if !in_range {
        dist_sq <= range * range
    } else {
        let exit = range * RANGE_HYSTERESIS_FACTOR;
        dist_sq <= exit * exit
    }
}

/// Whether an agent advances toward the player this tick.
pub fn should_move(distance: f32, stops_to_shoot: bool, in_range: bool) -> bool {
    distance > 0.0 && (!stops_to_shoot || !in_range)
}

/// Pick the next skill uniformly, excluding `last` when another option exists.
pub fn pick_next_skill(
    skills: impl IntoIterator<Item = SkillId>,
    last: Option<SkillId>,
    rng: &mut impl Rng,
) -> Option<SkillId> {
    let all: Vec<SkillId> = skills.into_iter().collect();
    let candidates: Vec<SkillId> = all.iter().copied().filter(|&s| Some(s) != last).collect();
    let pool = if candidates.is_empty() { &all } else { &candidates };
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.gen_range(0..pool.len())])
}

/// True exactly when a phase-one boss has dropped below the threshold.
pub fn crosses_phase_two(phase: BossPhase, hp: i32, max_hp: i32) -> bool {
    phase == BossPhase::One && max_hp > 0 && (hp as f32 / max_hp as f32) < PHASE_TWO_HP_RATIO
}

/// Absorbs binary rounding of decimal factors before flooring.
const FLOOR_SLACK: f64 = 1e-3;

/// Damage after armor, floored.
pub fn mitigate(damage: i32, armor: i32) -> i32 {
    let reduction = (armor as f64 * ARMOR_REDUCTION_PER_POINT).min(ARMOR_REDUCTION_CAP);
    (damage as f64 * (1.0 - reduction) + FLOOR_SLACK).floor() as i32
}

/// Wrap an angle into (-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    if a > PI {
        a - TAU
    } else {
        a
    }
}

/// Rotate `velocity` toward the bearing from `pos` to `target` by at most
/// `turn_rate` radians, keeping its speed.
pub fn steer_toward(velocity: Vec2, pos: Vec2, target: Vec2, turn_rate: f32) -> Vec2 {
    if turn_rate <= 0.0 {
        return velocity;
    }
    let speed = velocity.length();
    let to_target = target - pos;
    let heading = velocity.y.atan2(velocity.x);
    let bearing = to_target.y.atan2(to_target.x);
    let turn = wrap_angle(bearing - heading).clamp(-turn_rate, turn_rate);
    Vec2::from_angle(heading + turn) * speed
}

/// Ticks per clip frame at the given animation speed.
pub fn frame_delay(delay: u32, anim_speed: f32) -> u32 {
    ((delay as f32 / anim_speed).ceil() as u32).max(1)
}

/// Damage of a derived shot: `base * factor`, floored.
pub fn scaled_damage(base: i32, factor: f32) -> i32 {
    (base as f64 * factor as f64 + FLOOR_SLACK).floor() as i32
}
