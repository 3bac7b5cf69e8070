//! Battle log entries.
//!
//! Each resolved action appends one or more entries. Entries are plain
//! values; the `Display` impl produces the line shown in the battle log.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which combatant performed an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    Player,
    Monster,
}

impl Actor {
    pub const fn name(self) -> &'static str {
        match self {
            Actor::Player => "Player",
            Actor::Monster => "Monster",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single line of the battle log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntry {
    /// A regular attack by `attacker` dealing `damage`.
    Attack { attacker: Actor, damage: u32 },
    /// The player restored `amount` health.
    Heal { amount: u32 },
    /// A special attack by `attacker` dealing `damage`.
    SpecialAttack { attacker: Actor, damage: u32 },
    /// Free-form text, e.g. the self-destruct message.
    Narrative { text: String },
}

impl LogEntry {
    /// Damage dealt by this entry (0 for heals and narration).
    pub fn damage(&self) -> u32 {
        match self {
            LogEntry::Attack { damage, .. } | LogEntry::SpecialAttack { damage, .. } => *damage,
            LogEntry::Heal { .. } | LogEntry::Narrative { .. } => 0,
        }
    }
}

/// Battle log text.
///
/// A regular attack names the attacker (`Player attacks and deals 12
/// damage`) for both sides. Older front ends printed the player's own attack
/// as `Player takes N damage` and the self-destruct line as `Player chooses
/// to kill themselves!`; consumers matching on those strings must switch to
/// the texts below.
impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Attack { attacker, damage } => {
                write!(f, "{} attacks and deals {} damage", attacker, damage)
            }
            LogEntry::Heal { amount } => write!(f, "Player heals for {} life points", amount),
            LogEntry::SpecialAttack { attacker, damage } => {
                write!(f, "{} uses a special attack and deals {} damage", attacker, damage)
            }
            LogEntry::Narrative { text } => f.write_str(text),
        }
    }
}
