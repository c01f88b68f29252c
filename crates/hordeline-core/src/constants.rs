//! Simulation constants and tuning parameters.
//!
//! Every duration below is a tick count. The simulation assumes a fixed
//! step of `TICK_RATE` ticks per second; hosts driven by wall-clock frame
//! time must accumulate whole ticks before stepping the engine.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Field ---

/// Default play-field width in pixels.
pub const DEFAULT_FIELD_WIDTH: f32 = 1280.0;

/// Default play-field height in pixels.
pub const DEFAULT_FIELD_HEIGHT: f32 = 720.0;

/// Projectiles further than this outside the field are pruned.
pub const PROJECTILE_BOUNDS_MARGIN: f32 = 200.0;

// --- Player ---

/// Fraction of player width added to a projectile radius for player hits.
pub const PLAYER_HIT_SCALE: f32 = 0.35;

/// Fraction of player width added to zone and trail extents.
pub const PLAYER_ZONE_SCALE: f32 = 0.3;

// --- Projectiles ---

/// Radius used when a shot does not specify one.
pub const PROJECTILE_DEFAULT_RADIUS: f32 = 8.0;

/// Lifetime used when a shot does not specify one.
pub const PROJECTILE_DEFAULT_LIFETIME: u32 = 180;

/// Oscillation frequency used when a shot does not specify one (rad/tick).
pub const PROJECTILE_DEFAULT_WAVE_FREQUENCY: f32 = 0.10;

/// Distance to the detonation point that triggers a self-detonating shot.
pub const DETONATION_RADIUS: f32 = 20.0;

/// Number of children in a detonation burst.
pub const DETONATION_CHILD_COUNT: usize = 8;

/// Detonation child speed (px/tick).
pub const DETONATION_CHILD_SPEED: f32 = 4.5;

/// Detonation child damage as a fraction of the parent's.
pub const DETONATION_CHILD_DAMAGE_FACTOR: f32 = 0.5;

/// Detonation child radius.
pub const DETONATION_CHILD_RADIUS: f32 = 5.0;

/// Detonation child lifetime.
pub const DETONATION_CHILD_LIFETIME: u32 = 150;

// --- Pools ---

/// Projectile pool capacity per regular enemy.
pub const ENEMY_POOL_CAPACITY: usize = 60;

/// Projectile pool capacity for the Giant Slime.
pub const SLIME_POOL_CAPACITY: usize = 150;

/// Projectile pool capacity for the Giant Frog.
pub const FROG_POOL_CAPACITY: usize = 100;

// --- Enemies ---

/// Default body extent of a regular enemy.
pub const ENEMY_SIZE: f32 = 64.0;

/// Exit threshold of the in-range hysteresis band, as a multiple of range.
pub const RANGE_HYSTERESIS_FACTOR: f32 = 1.2;

/// Lower bound of the rolled shooter cooldown.
pub const SHOOT_COOLDOWN_MIN: u32 = 120;

/// Upper bound (inclusive) of the rolled shooter cooldown.
pub const SHOOT_COOLDOWN_MAX: u32 = 360;

/// Ticks between shots of a spiral shooter within one rotation.
pub const SPIRAL_SHOT_INTERVAL: u32 = 4;

/// Shots per full spiral rotation.
pub const SPIRAL_SHOTS_PER_TURN: u32 = 12;

/// Death-animation grace window of a regular enemy.
pub const ENEMY_DEATH_TICKS: u32 = 10;

// --- Bosses ---

/// HP ratio below which a boss enters phase 2.
pub const PHASE_TWO_HP_RATIO: f32 = 0.5;

/// Freeze window after a phase transition.
pub const PHASE_TWO_FREEZE_TICKS: u32 = 45;

/// Grace window after the death clip finishes.
pub const BOSS_DEATH_TICKS: u32 = 30;

/// Armor points to damage reduction fraction.
pub const ARMOR_REDUCTION_PER_POINT: f64 = 0.01;

/// Cap on armor damage reduction.
pub const ARMOR_REDUCTION_CAP: f64 = 0.75;

/// Margin used to clamp bomb placements to the field.
pub const BOMB_FIELD_MARGIN: f32 = 60.0;

/// Inset of the frog's corner turrets from the field edges.
pub const CORNER_TURRET_INSET: f32 = 80.0;

/// Orbit shots are dropped once their radius reaches this value.
pub const ORBIT_MAX_RADIUS: f32 = 480.0;

/// Collision radius of an orbit shot.
pub const ORBIT_SHOT_RADIUS: f32 = 20.0;

/// Number of reusable dash-trail slots.
pub const TRAIL_SLOTS: usize = 9;

/// Minions summoned by the slime per cast.
pub const SUMMON_COUNT: usize = 2;

/// Distance from the boss at which summoned minions appear.
pub const SUMMON_RADIUS: f32 = 120.0;

// --- Waves ---

/// Ticks between the end of one wave and the start of the next.
pub const WAVE_DELAY_TICKS: u32 = 180;

/// Default number of waves in a level.
pub const DEFAULT_MAX_WAVES: u32 = 10;

/// Base spawn count of a normal wave.
pub const BASE_ENEMIES_PER_WAVE: u32 = 5;

/// Telegraph duration of a regular spawn.
pub const SPAWN_TELEGRAPH_TICKS: u32 = 90;

/// Telegraph duration of a boss spawn.
pub const BOSS_TELEGRAPH_TICKS: u32 = 150;

/// Radius of the minion ring around a boss spawn.
pub const BOSS_MINION_RING_RADIUS: f32 = 150.0;

/// Attempts to find a walkable spawn point before falling back.
pub const SPAWN_ATTEMPTS: u32 = 50;

/// Minimum distance between a spawn point and the player.
pub const SPAWN_MIN_PLAYER_DISTANCE: f32 = 300.0;

/// Margin passed to the map when sampling spawn points.
pub const SPAWN_MAP_MARGIN: f32 = 100.0;

/// Distance outside the field edge for map-less spawns.
pub const SPAWN_EDGE_MARGIN: f32 = 50.0;

// --- Loot ---

/// Chance that a kill drops an item.
pub const ITEM_DROP_CHANCE: f64 = 0.1;

// --- Clock ---

/// Maximum backlog of ticks before the clock drops it and resynchronizes.
pub const MAX_CATCH_UP_TICKS: u32 = 10;
