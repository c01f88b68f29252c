//! Wave spawning system: starts waves and materializes spawn telegraphs.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use hordeline_core::constants::*;
use hordeline_core::enums::{BossKind, EnemyKind};
use hordeline_core::events::CombatEvent;
use hordeline_core::level::LevelConfig;
use hordeline_core::state::TelegraphView;
use hordeline_core::types::FieldBounds;

use crate::world_setup::{self, SpawnMap};

/// What a telegraph turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Enemy(EnemyKind),
    Boss(BossKind),
}

/// A spawn announced on the field but not yet live.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSpawn {
    pub pos: Vec2,
    pub ticks_left: u32,
    pub kind: SpawnKind,
}

impl PendingSpawn {
    pub fn view(&self) -> TelegraphView {
        TelegraphView {
            pos: self.pos,
            ticks_left: self.ticks_left,
            boss: matches!(self.kind, SpawnKind::Boss(_)),
        }
    }
}

/// Wave lifecycle state.
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    /// Current wave, 1-based. Zero before the first wave.
    pub wave: u32,
    pub max_waves: u32,
    /// A wave is running and has not been cleared yet.
    pub active: bool,
    /// Ticks counted since the last wave was cleared.
    pub delay: u32,
    pub complete: bool,
    pub pending: Vec<PendingSpawn>,
}

impl WaveState {
    pub fn new(max_waves: u32) -> Self {
        Self {
            max_waves,
            ..Self::default()
        }
    }

    pub fn delay_left(&self) -> u32 {
        WAVE_DELAY_TICKS.saturating_sub(self.delay)
    }
}

/// Normal-wave spawn count.
pub fn wave_spawn_count(wave: u32, enemies_multiplier: f32) -> u32 {
    ((BASE_ENEMIES_PER_WAVE + wave / 3) as f32 * enemies_multiplier).floor() as u32
}

/// Boss-wave minion count.
pub fn boss_minion_count(wave: u32) -> u32 {
    BASE_ENEMIES_PER_WAVE + wave / 5
}

/// Draw an enemy kind from the level's weighted pool.
pub fn pick_kind(level: &LevelConfig, rng: &mut ChaCha8Rng) -> EnemyKind {
    let total = level.total_weight();
    if total == 0 {
        return EnemyKind::default();
    }
    let mut roll = rng.gen_range(0..total);
    for entry in &level.enemy_pool {
        if roll < entry.weight {
            return entry.kind;
        }
        roll -= entry.weight;
    }
    level.enemy_pool.last().map_or(EnemyKind::default(), |e| e.kind)
}

/// Advance to the next wave and queue its telegraphs.
pub fn start_next_wave(
    state: &mut WaveState,
    level: &LevelConfig,
    bounds: &FieldBounds,
    player: Vec2,
    map: Option<&dyn SpawnMap>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
) {
    state.wave += 1;
    state.active = true;
    state.delay = 0;
    let wave = state.wave;
    let first_new = state.pending.len();

    let boss = level.boss.filter(|_| level.is_boss_wave(wave));
    if let Some(kind) = boss {
        let center = world_setup::pick_spawn_point(map, bounds, player, rng);
        state.pending.push(PendingSpawn {
            pos: center,
            ticks_left: BOSS_TELEGRAPH_TICKS,
            kind: SpawnKind::Boss(kind),
        });

        let minions = boss_minion_count(wave);
        for i in 0..minions {
            let angle = TAU / minions as f32 * i as f32;
            state.pending.push(PendingSpawn {
                pos: center + Vec2::from_angle(angle) * BOSS_MINION_RING_RADIUS,
                ticks_left: SPAWN_TELEGRAPH_TICKS,
                kind: SpawnKind::Enemy(pick_kind(level, rng)),
            });
        }
    } else {
        for _ in 0..wave_spawn_count(wave, level.enemies_multiplier) {
            let pos = world_setup::pick_spawn_point(map, bounds, player, rng);
            state.pending.push(PendingSpawn {
                pos,
                ticks_left: SPAWN_TELEGRAPH_TICKS,
                kind: SpawnKind::Enemy(pick_kind(level, rng)),
            });
        }
    }

    let spawns = (state.pending.len() - first_new) as u32;
    events.push(CombatEvent::WaveStarted {
        wave,
        spawns,
        boss: boss.is_some(),
    });
    events.extend(state.pending[first_new..].iter().map(|p| CombatEvent::SpawnTelegraphed {
        pos: p.pos,
        ticks: p.ticks_left,
    }));
    tracing::info!(wave, spawns, boss = boss.is_some(), "wave started");
}

/// Count down telegraphs and return those that completed this tick.
pub fn run(state: &mut WaveState) -> Vec<PendingSpawn> {
    for spawn in state.pending.iter_mut() {
        spawn.ticks_left = spawn.ticks_left.saturating_sub(1);
    }
    let (due, waiting): (Vec<_>, Vec<_>) = state.pending.drain(..).partition(|s| s.ticks_left == 0);
    state.pending = waiting;
    due
}
