//! Combat simulation for hordeline.
//!
//! Owns the hecs world of enemies, the boss, pooled projectiles and the
//! wave schedule, and advances them one fixed tick at a time.

pub mod boss;
pub mod clock;
pub mod collision;
pub mod enemy;
pub mod engine;
pub mod error;
pub mod pool;
pub mod projectile;
pub mod systems;
pub mod world_setup;

pub use clock::FixedStepClock;
pub use engine::{CombatEngine, SimConfig};
pub use error::CombatError;
pub use hordeline_core as core;
pub use hordeline_loot::{EconomySink, Ledger};

#[cfg(test)]
mod tests;
