//! Cleanup system: reconciles finished agents, pays out loot, and removes
//! them from the world.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use hordeline_core::events::CombatEvent;
use hordeline_loot::{roll_drop, roll_gold, EconomySink};

use crate::boss::BossAgent;
use crate::enemy::EnemyAgent;

/// Kills and gold reconciled in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Payout {
    pub kills: u32,
    pub gold: u32,
}

/// Roll gold and a possible item for one kill and hand them to the sink.
fn pay_out(
    gold_range: (u32, u32),
    rng: &mut ChaCha8Rng,
    sink: &mut dyn EconomySink,
    events: &mut Vec<CombatEvent>,
) -> u32 {
    let gold = roll_gold(gold_range, rng);
    sink.add_gold(gold);
    if let Some(item) = roll_drop(rng) {
        events.push(CombatEvent::ItemDropped {
            slot: item.slot,
            rarity: item.rarity,
        });
        sink.add_item(item);
    }
    gold
}

/// Pay out and despawn every enemy whose death grace has run out.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn EconomySink,
    events: &mut Vec<CombatEvent>,
) -> Payout {
    despawn_buffer.clear();
    let mut payout = Payout::default();

    for (entity, agent) in world.query_mut::<&EnemyAgent>() {
        if agent.active {
            continue;
        }
        let gold = pay_out(agent.profile.gold, rng, sink, events);
        events.push(CombatEvent::EnemyKilled {
            kind: agent.kind,
            gold,
        });
        payout.kills += 1;
        payout.gold += gold;
        despawn_buffer.push(entity);
    }

    // Despawn collected entities.
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    payout
}

/// Pay out and remove the boss once its death sequence has finished.
/// Returns `None` while the boss is still live.
pub fn run_boss(
    boss: &mut Option<BossAgent>,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn EconomySink,
    events: &mut Vec<CombatEvent>,
) -> Option<Payout> {
    if boss.as_ref().map_or(true, BossAgent::is_active) {
        return None;
    }
    let finished = boss.take()?;
    let gold = pay_out(finished.core.profile.gold, rng, sink, events);
    tracing::debug!(boss = ?finished.kind(), gold, "boss removed");
    Some(Payout { kills: 1, gold })
}
