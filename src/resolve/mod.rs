//! Turn resolution.
//!
//! Turns a player action into a new battle state: rolls dice, applies
//! damage and healing, appends log entries, and advances the turn counter.

pub mod dice;
pub mod rules;
pub mod turn;

pub use dice::{Dice, Roll, ScriptedDice, ATTACK_ROLL, COUNTER_ROLL, HEAL_ROLL, SPECIAL_ROLL};
pub use rules::Rules;
pub use turn::{resolve, ActionError, Resolution, SELF_DESTRUCT_TEXT};
