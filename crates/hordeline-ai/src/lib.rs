//! Agent decision logic for hordeline.
//!
//! Declarative enemy and boss profiles plus the pure functions that
//! drive range hysteresis, skill scheduling and phase escalation.

pub mod fsm;
pub mod profiles;

pub use hordeline_core as core;
