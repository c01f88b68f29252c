//! Level configuration: spawn pool, difficulty multipliers and boss waves.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_MAX_WAVES;
use crate::enums::{BossKind, EnemyKind};

/// Reasons a level configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level {id}: enemy pool is empty")]
    EmptyPool { id: u32 },
    #[error("level {id}: enemy pool weights sum to zero")]
    ZeroWeight { id: u32 },
    #[error("level {id}: {field} must be positive and finite, got {value}")]
    NonPositive {
        id: u32,
        field: &'static str,
        value: f32,
    },
    #[error("level {id}: max_waves must be at least 1")]
    NoWaves { id: u32 },
    #[error("level {id}: boss waves listed without a boss kind")]
    MissingBoss { id: u32 },
    #[error("level {id}: boss wave {wave} exceeds max_waves {max_waves}")]
    BossWaveOutOfRange { id: u32, wave: u32, max_waves: u32 },
    #[error("invalid level json: {0}")]
    Json(#[from] serde_json::Error),
}

/// One weighted entry of a level's spawn pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnWeight {
    pub kind: EnemyKind,
    pub weight: u32,
}

impl SpawnWeight {
    pub const fn new(kind: EnemyKind, weight: u32) -> Self {
        Self { kind, weight }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub id: u32,
    pub name: String,
    /// Scales the number of spawns per normal wave.
    pub enemies_multiplier: f32,
    /// Scales enemy movement speed at spawn.
    pub speed_multiplier: f32,
    pub enemy_pool: Vec<SpawnWeight>,
    #[serde(default = "default_max_waves")]
    pub max_waves: u32,
    /// 1-based wave numbers that spawn the boss.
    #[serde(default)]
    pub boss_waves: Vec<u32>,
    #[serde(default)]
    pub boss: Option<BossKind>,
    /// The level ends when its boss wave is cleared.
    #[serde(default)]
    pub boss_only: bool,
}

fn default_max_waves() -> u32 {
    DEFAULT_MAX_WAVES
}

impl LevelConfig {
    /// Parse and validate a level from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let level: LevelConfig = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let id = self.id;
        if self.enemy_pool.is_empty() {
            return Err(ConfigError::EmptyPool { id });
        }
        if self.total_weight() == 0 {
            return Err(ConfigError::ZeroWeight { id });
        }
        for (field, value) in [
            ("enemies_multiplier", self.enemies_multiplier),
            ("speed_multiplier", self.speed_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { id, field, value });
            }
        }
        if self.max_waves == 0 {
            return Err(ConfigError::NoWaves { id });
        }
        if !self.boss_waves.is_empty() && self.boss.is_none() {
            return Err(ConfigError::MissingBoss { id });
        }
        if let Some(&wave) = self.boss_waves.iter().find(|&&w| w == 0 || w > self.max_waves) {
            return Err(ConfigError::BossWaveOutOfRange {
                id,
                wave,
                max_waves: self.max_waves,
            });
        }
        Ok(())
    }

    pub fn total_weight(&self) -> u32 {
        self.enemy_pool.iter().map(|e| e.weight).sum()
    }

    pub fn is_boss_wave(&self, wave: u32) -> bool {
        self.boss.is_some() && self.boss_waves.contains(&wave)
    }

    /// Built-in level table. Levels 1-4 are wave levels, 5 and 6 are
    /// single-boss levels.
    pub fn builtin(id: u32) -> Option<Self> {
        use EnemyKind::*;

        let wave_level = |name: &str, pool: Vec<SpawnWeight>, count: f32, speed: f32| Self {
            id,
            name: name.to_string(),
            enemies_multiplier: count,
            speed_multiplier: speed,
            enemy_pool: pool,
            max_waves: DEFAULT_MAX_WAVES,
            boss_waves: Vec::new(),
            boss: None,
            boss_only: false,
        };
        let boss_level = |name: &str, boss: BossKind| Self {
            id,
            name: name.to_string(),
            enemies_multiplier: 1.0,
            speed_multiplier: 1.0,
            enemy_pool: vec![SpawnWeight::new(Zombie, 60), SpawnWeight::new(Skeleton, 40)],
            max_waves: 1,
            boss_waves: vec![1],
            boss: Some(boss),
            boss_only: true,
        };

        let level = match id {
            1 => wave_level(
                "Level 1",
                vec![SpawnWeight::new(Zombie, 60), SpawnWeight::new(Skeleton, 40)],
                1.0,
                1.0,
            ),
            2 => wave_level(
                "Level 2",
                vec![
                    SpawnWeight::new(Goblin, 40),
                    SpawnWeight::new(Orc, 35),
                    SpawnWeight::new(Darkwolf, 25),
                ],
                1.3,
                1.2,
            ),
            3 => wave_level(
                "Level 3",
                vec![
                    SpawnWeight::new(Demon, 35),
                    SpawnWeight::new(Wraith, 35),
                    SpawnWeight::new(Golem, 30),
                ],
                1.6,
                1.4,
            ),
            4 => wave_level(
                "Level 4",
                vec![
                    SpawnWeight::new(Dragon, 35),
                    SpawnWeight::new(Lich, 35),
                    SpawnWeight::new(Titan, 30),
                ],
                2.0,
                1.6,
            ),
            5 => boss_level("Giant Slime", BossKind::GiantSlime),
            6 => boss_level("Giant Frog", BossKind::GiantFrog),
            _ => return None,
        };
        Some(level)
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            id: 0,
            name: "Default".to_string(),
            enemies_multiplier: 1.0,
            speed_multiplier: 1.0,
            enemy_pool: vec![SpawnWeight::new(EnemyKind::Zombie, 100)],
            max_waves: DEFAULT_MAX_WAVES,
            boss_waves: Vec::new(),
            boss: None,
            boss_only: false,
        }
    }
}
