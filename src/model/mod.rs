//! Core data model for Fleet.
//!
//! These types represent the fleet: movers, the items they carry,
//! and the log entries that record each step of a mission.

mod item;
mod log;
mod mover;
mod weight;

pub use item::Item;
pub use log::{Action, LogEntry};
pub use mover::{Mover, QuestState};
pub use weight::Weight;
