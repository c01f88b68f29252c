//! Events emitted by the simulation for audio, UI and logging collaborators.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Structured combat events, drained once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A new wave began spawning.
    WaveStarted { wave: u32, spawns: u32, boss: bool },
    /// The current wave has no hostiles left.
    WaveCleared { wave: u32 },
    /// A spawn telegraph appeared.
    SpawnTelegraphed { pos: Vec2, ticks: u32 },
    /// A boss materialized.
    BossSpawned { kind: BossKind, pos: Vec2 },
    /// A boss picked and began a skill.
    SkillCast { kind: BossKind, skill: SkillId },
    /// A skill identifier the boss table does not support.
    SkillRejected { kind: BossKind, skill: SkillId },
    /// A boss crossed its phase threshold.
    PhaseTransition { kind: BossKind },
    /// A boss reached zero HP.
    BossDefeated { kind: BossKind },
    /// A regular enemy was removed after dying.
    EnemyKilled { kind: EnemyKind, gold: u32 },
    /// A dropped item was handed to the economy.
    ItemDropped { slot: ItemSlot, rarity: Rarity },
    /// A self-detonating shot burst.
    Detonation { pos: Vec2 },
    /// The player took damage this tick.
    PlayerHit { damage: i32 },
    /// The level is finished.
    SessionComplete { waves: u32 },
}
