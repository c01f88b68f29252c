//! Combat system: resolves player shots against hostiles and hostiles
//! against the player.

use hecs::World;

use hordeline_core::events::CombatEvent;
use hordeline_core::state::PlayerHit;
use hordeline_core::types::{Body, PlayerShot, PlayerState};

use crate::boss::BossAgent;
use crate::collision;
use crate::enemy::EnemyAgent;
use crate::projectile::ProjectileField;

/// Resolve player shots. Each shot damages at most one target: the first
/// living enemy it touches, otherwise the boss. A shot that lands is spent.
pub fn resolve_player_shots(world: &mut World, mut boss: Option<&mut BossAgent>, shots: &mut [PlayerShot]) {
    for shot in shots.iter_mut().filter(|s| s.active) {
        for (_entity, (body, agent)) in world.query_mut::<(&Body, &mut EnemyAgent)>() {
            if agent.is_alive() && collision::circle_hits_body(shot.pos, shot.radius, body) {
                agent.take_damage(shot.damage);
                shot.active = false;
                break;
            }
        }
        if !shot.active {
            continue;
        }

        if let Some(boss) = boss.as_deref_mut() {
            if boss.is_vulnerable() && boss.is_hit_by(shot.pos, shot.radius) {
                boss.take_damage(shot.damage);
                shot.active = false;
            }
        }
    }
}

/// Everything that can hurt the player this tick. Damage does not stack:
/// the strongest source wins.
pub fn resolve_player_hits(
    world: &World,
    boss: Option<&BossAgent>,
    field: &mut ProjectileField,
    player: &PlayerState,
    events: &mut Vec<CombatEvent>,
) -> PlayerHit {
    let mut hit = PlayerHit::default();

    for (_entity, (body, agent)) in world.query::<(&Body, &EnemyAgent)>().iter() {
        if agent.is_alive() && collision::bodies_overlap(body, &player.body) {
            hit.register(agent.profile.damage);
        }
    }

    if let Some(boss) = boss {
        if let Some(damage) = boss.contact(player) {
            hit.register(damage);
        }
        if let Some(damage) = boss.special_hit(player) {
            hit.register(damage);
        }
    }

    for damage in field.hit_player(player) {
        hit.register(damage);
    }

    events.extend(
        field
            .take_detonations()
            .into_iter()
            .map(|pos| CombatEvent::Detonation { pos }),
    );
    if hit.hit {
        events.push(CombatEvent::PlayerHit { damage: hit.damage });
    }
    hit
}
