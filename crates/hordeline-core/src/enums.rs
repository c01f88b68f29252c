//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Regular enemy kinds. Drives the static stat table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    #[default]
    Zombie,
    Skeleton,
    Goblin,
    Orc,
    Darkwolf,
    Demon,
    Wraith,
    Golem,
    Dragon,
    Lich,
    Titan,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 11] = [
        EnemyKind::Zombie,
        EnemyKind::Skeleton,
        EnemyKind::Goblin,
        EnemyKind::Orc,
        EnemyKind::Darkwolf,
        EnemyKind::Demon,
        EnemyKind::Wraith,
        EnemyKind::Golem,
        EnemyKind::Dragon,
        EnemyKind::Lich,
        EnemyKind::Titan,
    ];
}

/// Boss archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossKind {
    GiantSlime,
    GiantFrog,
}

/// Boss skill identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    SpreadShot,
    BombField,
    MeteorStrike,
    SummonMinions,
    JumpLand,
    Dash,
    OrbitShots,
}

/// One-way boss escalation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    #[default]
    One,
    Two,
}

/// Coarse boss behavior state, exposed for rendering and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossState {
    #[default]
    Idle,
    /// Post-transition freeze window.
    Frozen,
    Casting,
    /// Post-cast chase toward the player.
    Moving,
    /// Dash or jump traversal in progress.
    Dashing,
    Dead,
}

/// Projectile motion family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Normal,
    Homing,
    SelfDetonating,
}

/// Opaque visual tag carried by projectiles for the rendering layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualTag {
    #[default]
    Plain,
    Bone,
    Ember,
    Spirit,
    SpiritShard,
    Frost,
    Blood,
    Flame,
    Cyan,
    Crimson,
    Bomb,
    Meteor,
    Turret,
}

/// Equipment slot of a dropped item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSlot {
    Helmet,
    Armor,
    Gloves,
    Boots,
}

/// Item rarity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}
