//! Combat engine: the wave orchestrator an external game loop drives.
//!
//! `CombatEngine` owns the hecs world of regular enemies, the optional boss,
//! every projectile pool, the wave state and the single seeded RNG. Each
//! `tick` runs the systems in a fixed order and returns a `TickReport`.
//! Completely headless, enabling deterministic testing.

use std::mem;

use glam::Vec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hordeline_core::constants::*;
use hordeline_core::events::CombatEvent;
use hordeline_core::level::LevelConfig;
use hordeline_core::state::{BossHud, CombatSnapshot, TickReport, WaveProgress};
use hordeline_core::types::{EmitterId, FieldBounds, PlayerShot, PlayerState, SimTime};
use hordeline_loot::EconomySink;

use crate::boss::BossAgent;
use crate::enemy::EnemyAgent;
use crate::error::CombatError;
use crate::projectile::ProjectileField;
use crate::systems;
use crate::systems::snapshot::Totals;
use crate::systems::wave_spawner::{PendingSpawn, SpawnKind, WaveState};
use crate::world_setup::{self, SpawnMap};

/// Configuration for starting a new combat session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub bounds: FieldBounds,
    pub level: LevelConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bounds: FieldBounds::default(),
            level: LevelConfig::builtin(1).unwrap_or_default(),
        }
    }
}

impl SimConfig {
    /// Default config on one of the built-in levels.
    pub fn for_level(id: u32) -> Result<Self, CombatError> {
        let level = LevelConfig::builtin(id).ok_or(CombatError::UnknownLevel(id))?;
        Ok(Self {
            level,
            ..Self::default()
        })
    }
}

/// The combat engine. Owns the ECS world and all combat state.
pub struct CombatEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    bounds: FieldBounds,
    level: LevelConfig,
    map: Option<Box<dyn SpawnMap>>,
    waves: WaveState,
    boss: Option<BossAgent>,
    boss_defeated: bool,
    field: ProjectileField,
    next_emitter: u32,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<CombatEvent>,
    totals: Totals,
    started: bool,
}

impl CombatEngine {
    /// Create an engine for the given config. The level is validated here;
    /// the per-tick path never fails.
    pub fn new(config: SimConfig) -> Result<Self, CombatError> {
        let SimConfig { seed, bounds, level } = config;
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(bounds.width) || !valid(bounds.height) {
            return Err(CombatError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }
        level.validate()?;

        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            bounds,
            waves: WaveState::new(level.max_waves),
            level,
            map: None,
            boss: None,
            boss_defeated: false,
            field: ProjectileField::default(),
            next_emitter: 1,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            totals: Totals::default(),
            started: false,
        })
    }

    /// Use `map` to validate spawn points. Without one, enemies enter from
    /// the field edges.
    pub fn with_map(mut self, map: impl SpawnMap + 'static) -> Self {
        self.map = Some(Box::new(map));
        self
    }

    /// Begin the first wave. Later calls do nothing.
    pub fn start(&mut self, player: Vec2) {
        if self.started {
            return;
        }
        self.started = true;
        self.start_next_wave(player);
    }

    /// Advance the simulation by one tick.
    ///
    /// `shots` are the player's live shots; those that land are marked
    /// inactive. Loot for every kill reconciled this tick goes to `sink`.
    pub fn tick(
        &mut self,
        player: &PlayerState,
        shots: &mut [PlayerShot],
        sink: &mut dyn EconomySink,
    ) -> TickReport {
        let mut report = TickReport {
            tick: self.time.tick,
            ..TickReport::default()
        };
        if !self.started || self.waves.complete {
            report.complete = self.waves.complete;
            return report;
        }

        // 1. Spawn telegraphs
        for spawn in systems::wave_spawner::run(&mut self.waves) {
            self.materialize(spawn);
        }

        // 2. Agents
        systems::agents::run(&mut self.world, player.pos());
        systems::agents::run_boss(self.boss.as_mut(), player, &mut self.rng);
        self.spawn_minions();

        // 3. Newly fired shots into their pools
        report.dropped_shots = systems::projectiles::drain(&mut self.world, self.boss.as_mut(), &mut self.field);

        // 4. Projectile motion, expiry and bounds
        systems::projectiles::run(&mut self.field, player.pos(), &self.bounds);

        // 5. Collision
        systems::combat::resolve_player_shots(&mut self.world, self.boss.as_mut(), shots);
        report.player_hit = systems::combat::resolve_player_hits(
            &self.world,
            self.boss.as_ref(),
            &mut self.field,
            player,
            &mut self.events,
        );
        self.drain_boss_events();

        // 6. Deaths and loot
        let payout = systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.rng,
            sink,
            &mut self.events,
        );
        report.kills = payout.kills;
        report.gold = payout.gold;
        if let Some(payout) = systems::cleanup::run_boss(&mut self.boss, &mut self.rng, sink, &mut self.events) {
            self.boss_defeated = true;
            report.kills += payout.kills;
            report.gold += payout.gold;
        }
        self.totals.kills += report.kills;
        self.totals.gold += report.gold as u64;

        // 7. Pools of removed emitters
        self.release_idle_pools();

        // 8. Wave completion
        self.update_waves(player.pos());

        // 9. Time and events
        self.time.advance();
        report.complete = self.waves.complete;
        report.events = mem::take(&mut self.events);
        report
    }

    /// Build a read-only snapshot of the current state.
    pub fn snapshot(&self) -> CombatSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.progress(),
            &self.field,
            self.boss.as_ref(),
            &self.waves.pending,
            self.totals,
        )
    }

    /// Wave progress for the HUD.
    pub fn progress(&self) -> WaveProgress {
        if self.waves.complete {
            return WaveProgress::Complete;
        }
        let remaining = self.remaining_hostiles();
        if self.waves.active || remaining > 0 {
            WaveProgress::Active {
                wave: self.waves.wave,
                max_waves: self.waves.max_waves,
                remaining,
            }
        } else {
            WaveProgress::Countdown {
                ticks_left: self.waves.delay_left(),
            }
        }
    }

    pub fn boss_hud(&self) -> Option<BossHud> {
        self.boss.as_ref().map(BossAgent::hud)
    }

    pub fn is_complete(&self) -> bool {
        self.waves.complete
    }

    pub fn wave(&self) -> u32 {
        self.waves.wave
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn boss(&self) -> Option<&BossAgent> {
        self.boss.as_ref()
    }

    pub fn projectiles(&self) -> &ProjectileField {
        &self.field
    }

    pub fn pending_spawns(&self) -> &[PendingSpawn] {
        &self.waves.pending
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Live enemies, pending telegraphs and the boss.
    pub fn remaining_hostiles(&self) -> u32 {
        let enemies = self.world.query::<&EnemyAgent>().iter().count() as u32;
        enemies + self.waves.pending.len() as u32 + u32::from(self.boss.is_some())
    }

    /// Spawn an enemy immediately (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, kind: hordeline_core::enums::EnemyKind, pos: Vec2) -> hecs::Entity {
        self.spawn_enemy(kind, pos)
    }

    /// Spawn a boss immediately (for testing).
    #[cfg(test)]
    pub fn spawn_test_boss(&mut self, kind: hordeline_core::enums::BossKind, pos: Vec2) {
        self.materialize(PendingSpawn {
            pos,
            ticks_left: 0,
            kind: SpawnKind::Boss(kind),
        });
    }

    /// Mutable boss access (for testing).
    #[cfg(test)]
    pub fn boss_mut(&mut self) -> Option<&mut BossAgent> {
        self.boss.as_mut()
    }

    /// Mutable wave state access (for testing).
    #[cfg(test)]
    pub fn waves_mut(&mut self) -> &mut WaveState {
        &mut self.waves
    }

    /// Mark the session as started without spawning a wave (for testing).
    #[cfg(test)]
    pub fn start_empty(&mut self) {
        self.started = true;
        self.waves.wave = 1;
        self.waves.active = true;
    }

    fn next_emitter_id(&mut self) -> EmitterId {
        let id = EmitterId(self.next_emitter);
        self.next_emitter += 1;
        id
    }

    fn start_next_wave(&mut self, player: Vec2) {
        systems::wave_spawner::start_next_wave(
            &mut self.waves,
            &self.level,
            &self.bounds,
            player,
            self.map.as_deref(),
            &mut self.rng,
            &mut self.events,
        );
    }

    fn spawn_enemy(&mut self, kind: hordeline_core::enums::EnemyKind, pos: Vec2) -> hecs::Entity {
        let id = self.next_emitter_id();
        self.field.register(id, ENEMY_POOL_CAPACITY);
        world_setup::spawn_enemy(&mut self.world, &mut self.rng, id, kind, pos, self.level.speed_multiplier)
    }

    fn materialize(&mut self, spawn: PendingSpawn) {
        match spawn.kind {
            SpawnKind::Enemy(kind) => {
                self.spawn_enemy(kind, spawn.pos);
            }
            SpawnKind::Boss(kind) => {
                if let Some(live) = &self.boss {
                    tracing::warn!(live = ?live.kind(), skipped = ?kind, "boss already live, spawn skipped");
                    return;
                }
                let id = self.next_emitter_id();
                let boss = BossAgent::new(id, kind, spawn.pos, self.bounds);
                self.field.register(id, boss.core.profile.pool_capacity);
                self.boss = Some(boss);
                self.events.push(CombatEvent::BossSpawned { kind, pos: spawn.pos });
                tracing::info!(boss = ?kind, x = spawn.pos.x, y = spawn.pos.y, "boss spawned");
            }
        }
    }

    /// Spawn minions the boss summoned this tick, without a telegraph.
    fn spawn_minions(&mut self) {
        let minions = match self.boss.as_mut() {
            Some(boss) => mem::take(&mut boss.core.minions),
            None => return,
        };
        for (kind, pos) in minions {
            self.spawn_enemy(kind, pos);
        }
        self.drain_boss_events();
    }

    fn drain_boss_events(&mut self) {
        if let Some(boss) = self.boss.as_mut() {
            self.events.append(&mut boss.core.events);
        }
    }

    fn release_idle_pools(&mut self) {
        let mut live: Vec<EmitterId> = self
            .world
            .query::<&EnemyAgent>()
            .iter()
            .map(|(_entity, agent)| agent.id)
            .collect();
        live.extend(self.boss.as_ref().map(BossAgent::id));
        self.field.release_idle(|id| live.contains(&id));
    }

    fn update_waves(&mut self, player: Vec2) {
        if self.waves.complete {
            return;
        }
        let remaining = self.remaining_hostiles();

        if self.waves.active {
            if remaining == 0 {
                self.waves.active = false;
                self.waves.delay = 0;
                self.events.push(CombatEvent::WaveCleared { wave: self.waves.wave });
                tracing::debug!(wave = self.waves.wave, "wave cleared");
            }
            return;
        }
        if remaining > 0 {
            return;
        }

        self.waves.delay += 1;
        if self.waves.delay < WAVE_DELAY_TICKS {
            return;
        }

        let boss_cleared = self.level.boss_only && self.boss_defeated;
        if self.waves.wave >= self.waves.max_waves || boss_cleared {
            self.waves.complete = true;
            self.events.push(CombatEvent::SessionComplete { waves: self.waves.wave });
            tracing::info!(waves = self.waves.wave, kills = self.totals.kills, "session complete");
        } else {
            self.start_next_wave(player);
        }
    }
}
