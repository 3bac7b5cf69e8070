//! Turn accounting rules.
//!
//! The classic ruleset advances the turn counter on a rejected special
//! attack and leaves it untouched on a heal. Both can be switched through
//! engine options.

use serde::{Deserialize, Serialize};

/// Toggles for how the turn counter reacts to particular actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// A special attack rejected for cooldown still counts as a turn.
    pub rejected_special_advances_turn: bool,
    /// A heal counts as a turn.
    pub heal_advances_turn: bool,
}

impl Rules {
    /// The classic battle rules.
    pub const fn classic() -> Self {
        Rules {
            rejected_special_advances_turn: true,
            heal_advances_turn: false,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::classic()
    }
}
