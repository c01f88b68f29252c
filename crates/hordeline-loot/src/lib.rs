//! Loot rolls and the economy boundary for hordeline.
//!
//! The simulation reports each kill exactly once; this crate turns it into
//! gold and an optional item and hands both to an `EconomySink`.

pub mod economy;
pub mod items;

pub use economy::{roll_gold, EconomySink, Ledger};
pub use items::{roll_drop, roll_item, Item};
