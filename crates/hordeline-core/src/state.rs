//! Read-only views handed to rendering, HUD and economy collaborators.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::TICK_RATE;
use crate::enums::*;
use crate::events::CombatEvent;

/// Damage the player took this tick. Multiple sources do not stack:
/// the largest single hit wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerHit {
    pub hit: bool,
    pub damage: i32,
}

impl PlayerHit {
    /// Record a hit, keeping the maximum.
    pub fn register(&mut self, damage: i32) {
        self.hit = true;
        self.damage = self.damage.max(damage);
    }
}

/// Result of one simulation tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Agents reconciled as dead this tick.
    pub kills: u32,
    /// Gold credited this tick. Reset every tick.
    pub gold: u32,
    pub player_hit: PlayerHit,
    /// Shots skipped because their emitter's pool was full.
    pub dropped_shots: u32,
    pub complete: bool,
    pub events: Vec<CombatEvent>,
}

/// Human-readable wave progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum WaveProgress {
    /// A wave is running or hostiles remain.
    Active { wave: u32, max_waves: u32, remaining: u32 },
    /// Counting down to the next wave.
    Countdown { ticks_left: u32 },
    Complete,
}

impl WaveProgress {
    /// Whole seconds left in a countdown, rounded up.
    pub fn seconds_left(ticks_left: u32) -> u32 {
        ticks_left.div_ceil(TICK_RATE)
    }
}

impl fmt::Display for WaveProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveProgress::Active {
                wave,
                max_waves,
                remaining,
            } => write!(f, "Wave {wave}/{max_waves} - Remaining: {remaining}"),
            WaveProgress::Countdown { ticks_left } => {
                write!(f, "Next wave in: {}s", Self::seconds_left(*ticks_left))
            }
            WaveProgress::Complete => write!(f, "Complete"),
        }
    }
}

/// Boss health bar data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossHud {
    pub kind: BossKind,
    pub hp: i32,
    pub max_hp: i32,
    pub phase: BossPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: ProjectileKind,
    pub visual: VisualTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub dying: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelegraphView {
    pub pos: Vec2,
    pub ticks_left: u32,
    pub boss: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneView {
    pub pos: Vec2,
    pub radius: f32,
    /// Still inside its danger window.
    pub lethal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailView {
    pub start: Vec2,
    pub end: Vec2,
    pub half_height: f32,
}

/// Boss state plus its archetype-specific effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub hud: BossHud,
    pub pos: Vec2,
    pub state: BossState,
    pub zones: Vec<ZoneView>,
    pub orbit_shots: Vec<Vec2>,
    pub trails: Vec<TrailView>,
    /// Pending bomb and meteor impact points.
    pub impacts: Vec<Vec2>,
}

/// Full read-only state for one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub tick: u64,
    pub progress: WaveProgress,
    pub projectiles: Vec<ProjectileView>,
    pub enemies: Vec<EnemyView>,
    pub boss: Option<BossView>,
    pub telegraphs: Vec<TelegraphView>,
    pub total_kills: u32,
    pub total_gold: u64,
    pub complete: bool,
}
