//! Snapshot system: builds the read-only `CombatSnapshot` for renderers.

use hecs::World;

use hordeline_core::state::{CombatSnapshot, EnemyView, WaveProgress};
use hordeline_core::types::{Body, SimTime};

use crate::boss::BossAgent;
use crate::enemy::EnemyAgent;
use crate::projectile::ProjectileField;
use crate::systems::wave_spawner::PendingSpawn;

/// Running totals carried across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub kills: u32,
    pub gold: u64,
}

/// Build the snapshot from current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    progress: WaveProgress,
    field: &ProjectileField,
    boss: Option<&BossAgent>,
    pending: &[PendingSpawn],
    totals: Totals,
) -> CombatSnapshot {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Body, &EnemyAgent)>()
        .iter()
        .map(|(_entity, (body, agent))| EnemyView {
            id: agent.id.0,
            kind: agent.kind,
            pos: body.pos,
            hp: agent.hp,
            max_hp: agent.max_hp(),
            dying: agent.is_dying(),
        })
        .collect();
    enemies.sort_by_key(|e| e.id);

    CombatSnapshot {
        tick: time.tick,
        progress,
        projectiles: field.iter().map(|p| p.view()).collect(),
        enemies,
        boss: boss.map(BossAgent::view),
        telegraphs: pending.iter().map(PendingSpawn::view).collect(),
        total_kills: totals.kills,
        total_gold: totals.gold,
        complete: progress == WaveProgress::Complete,
    }
}
