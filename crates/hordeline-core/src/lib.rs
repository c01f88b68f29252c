//! Core types and definitions for the hordeline combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, enums, constants, events, level configuration and the
//! read-only views produced each tick. It contains no simulation logic.

pub mod constants;
pub mod enums;
pub mod events;
pub mod level;
pub mod state;
pub mod types;
