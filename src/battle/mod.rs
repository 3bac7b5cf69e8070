//! Battle representation.
//!
//! Contains the battle state, the append-only battle log, and the actions a
//! player can take on their turn.

pub mod action;
pub mod log;
pub mod state;

pub use action::{Action, ALL_ACTIONS};
pub use log::{Actor, LogEntry};
pub use state::{BattleState, Winner, MAX_HEALTH, SPECIAL_COOLDOWN};
