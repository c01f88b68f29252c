//! Projectile system: drains newly fired shots into the live field, then
//! integrates and prunes it.

use glam::Vec2;
use hecs::World;

use hordeline_core::types::FieldBounds;

use crate::boss::BossAgent;
use crate::enemy::EnemyAgent;
use crate::projectile::ProjectileField;

/// Move every agent's pending shots into its pool. Returns the number of
/// shots dropped because a pool was full.
pub fn drain(world: &mut World, boss: Option<&mut BossAgent>, field: &mut ProjectileField) -> u32 {
    let mut dropped = 0;

    for (_entity, agent) in world.query_mut::<&mut EnemyAgent>() {
        for spec in agent.pending.drain(..) {
            if !field.emit(agent.id, &spec) {
                dropped += 1;
            }
        }
    }

    if let Some(boss) = boss {
        let id = boss.id();
        for spec in boss.core.pending.drain(..) {
            if !field.emit(id, &spec) {
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "projectile pools full, shots dropped");
    }
    dropped
}

/// Integrate all live projectiles and prune expired or out-of-bounds ones.
pub fn run(field: &mut ProjectileField, player: Vec2, bounds: &FieldBounds) {
    field.integrate(player, bounds);
}
