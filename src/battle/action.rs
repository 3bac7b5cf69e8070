//! Player actions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An action the player can choose on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Attack,
    SpecialAttack,
    Heal,
    SelfDestruct,
    Restart,
}

/// Every action, in the order the controls are shown.
pub const ALL_ACTIONS: [Action; 5] = [
    Action::Attack,
    Action::SpecialAttack,
    Action::Heal,
    Action::SelfDestruct,
    Action::Restart,
];

impl Action {
    /// Returns the protocol command name for this action.
    pub const fn command(self) -> &'static str {
        match self {
            Action::Attack => "attack",
            Action::SpecialAttack => "special",
            Action::Heal => "heal",
            Action::SelfDestruct => "selfdestruct",
            Action::Restart => "newgame",
        }
    }

    /// Parses an action from its protocol command name.
    pub fn from_command(s: &str) -> Option<Action> {
        ALL_ACTIONS.iter().copied().find(|a| a.command() == s)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}
