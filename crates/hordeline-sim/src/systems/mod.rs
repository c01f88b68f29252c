//! Systems that operate on the combat world each tick.
//!
//! Systems are free functions over the world and the engine-owned state
//! they are handed. They do not own state themselves.

pub mod agents;
pub mod cleanup;
pub mod combat;
pub mod projectiles;
pub mod snapshot;
pub mod wave_spawner;
