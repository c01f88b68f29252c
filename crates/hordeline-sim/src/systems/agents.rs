//! Agent system: advances every enemy and the boss by one tick.

use glam::Vec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use hordeline_core::types::{Body, PlayerState};

use crate::boss::BossAgent;
use crate::enemy::EnemyAgent;

/// Update all regular enemies toward the player.
pub fn run(world: &mut World, player: Vec2) {
    for (_entity, (body, agent)) in world.query_mut::<(&mut Body, &mut EnemyAgent)>() {
        agent.update(body, player);
    }
}

/// Update the boss, if any.
pub fn run_boss(boss: Option<&mut BossAgent>, player: &PlayerState, rng: &mut ChaCha8Rng) {
    if let Some(boss) = boss {
        boss.update(player, rng);
    }
}
