//! Spawn-point selection and entity spawn factories.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use hordeline_core::constants::*;
use hordeline_core::enums::EnemyKind;
use hordeline_core::types::{EmitterId, FieldBounds};

use crate::enemy::EnemyAgent;

/// Walkability query over the loaded map. Map loading and its failures are
/// the collaborator's concern; the simulation only asks point queries.
pub trait SpawnMap {
    fn is_walkable(&self, pos: Vec2) -> bool;
}

impl<F> SpawnMap for F
where
    F: Fn(Vec2) -> bool,
{
    fn is_walkable(&self, pos: Vec2) -> bool {
        self(pos)
    }
}

/// Uniform point inside the field shrunk by `margin`.
pub fn random_point(bounds: &FieldBounds, margin: f32, rng: &mut ChaCha8Rng) -> Vec2 {
    let hi = bounds.clamp(Vec2::new(bounds.width, bounds.height), margin);
    let lo = bounds.clamp(Vec2::ZERO, margin);
    Vec2::new(rng.gen_range(lo.x..=hi.x), rng.gen_range(lo.y..=hi.y))
}

/// Point just outside a random field edge.
pub fn random_edge_point(bounds: &FieldBounds, rng: &mut ChaCha8Rng) -> Vec2 {
    let m = SPAWN_EDGE_MARGIN;
    let x = rng.gen_range(0.0..=bounds.width);
    let y = rng.gen_range(0.0..=bounds.height);
    match rng.gen_range(0..4) {
        0 => Vec2::new(x, -m),
        1 => Vec2::new(bounds.width + m, y),
        2 => Vec2::new(x, bounds.height + m),
        _ => Vec2::new(-m, y),
    }
}

/// Pick a spawn point away from the player.
///
/// With a map, samples up to `SPAWN_ATTEMPTS` interior points and takes the
/// first walkable one at least `SPAWN_MIN_PLAYER_DISTANCE` from the player,
/// falling back to the last sample. Without a map, spawns off a field edge.
pub fn pick_spawn_point(
    map: Option<&dyn SpawnMap>,
    bounds: &FieldBounds,
    player: Vec2,
    rng: &mut ChaCha8Rng,
) -> Vec2 {
    let Some(map) = map else {
        return random_edge_point(bounds, rng);
    };

    let min_dist_sq = SPAWN_MIN_PLAYER_DISTANCE * SPAWN_MIN_PLAYER_DISTANCE;
    let mut candidate = random_point(bounds, SPAWN_MAP_MARGIN, rng);
    for attempt in 0..SPAWN_ATTEMPTS {
        if attempt > 0 {
            candidate = random_point(bounds, SPAWN_MAP_MARGIN, rng);
        }
        if map.is_walkable(candidate) && candidate.distance_squared(player) >= min_dist_sq {
            return candidate;
        }
    }
    tracing::debug!(x = candidate.x, y = candidate.y, "no valid spawn point, using last sample");
    candidate
}

/// Spawn a regular enemy entity with its body and agent components.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    id: EmitterId,
    kind: EnemyKind,
    pos: Vec2,
    speed_multiplier: f32,
) -> hecs::Entity {
    let agent = EnemyAgent::new(id, kind, speed_multiplier, rng);
    let body = agent.body(pos);
    world.spawn((body, agent))
}
