//! Engine state management.
//!
//! Holds the current battle, the dice, and the turn rules that `setoption`
//! adjusts, and answers each protocol command by writing its response lines.

use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::battle::{Action, BattleState, LogEntry};
use crate::protocol::snapshot::{encode_snapshot, parse_snapshot, SnapshotError};
use crate::protocol::view::{write_turn_report, write_view};
use crate::resolve::{resolve, ActionError, Rules};

/// Option name: reseeds the dice with a fixed `u64` seed.
pub const OPTION_SEED: &str = "Seed";
/// Option name: whether a heal counts as a turn.
pub const OPTION_HEAL_ADVANCES_TURN: &str = "HealAdvancesTurn";
/// Option name: whether a rejected special attack counts as a turn.
pub const OPTION_REJECTED_SPECIAL_ADVANCES_TURN: &str = "RejectedSpecialAdvancesTurn";

/// Errors from `setoption`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("unknown option '{0}'")]
    Unknown(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// What a single action did to the battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Log entries appended by the action.
    pub entries: Vec<LogEntry>,
    /// Set when the action was refused.
    pub notice: Option<ActionError>,
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub state: BattleState,
    pub rules: Rules,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with a fresh battle and entropy-seeded dice.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Creates an engine whose dice are seeded with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Engine {
            state: BattleState::new(),
            rules: Rules::classic(),
            rng,
        }
    }

    /// Plays one action against the current battle.
    ///
    /// Once the battle has a winner every action except `Restart` is
    /// refused with `ActionError::BattleOver` and the state is left alone.
    pub fn act(&mut self, action: Action) -> TurnOutcome {
        if self.state.is_over() && action != Action::Restart {
            return TurnOutcome {
                entries: Vec::new(),
                notice: Some(ActionError::BattleOver),
            };
        }

        let resolution = resolve(&self.state, action, &self.rules, &mut self.rng);
        let entries = resolution.new_entries(&self.state).to_vec();
        self.state = resolution.state;

        tracing::debug!(
            %action,
            player = self.state.player_health,
            monster = self.state.monster_health,
            turn = self.state.turn,
            rejected = resolution.notice.is_some(),
            "resolved action"
        );

        TurnOutcome {
            entries,
            notice: resolution.notice,
        }
    }

    /// Replaces the battle with one decoded from a JSON snapshot.
    pub fn set_position(&mut self, json: &str) -> Result<(), SnapshotError> {
        self.state = parse_snapshot(json)?;
        Ok(())
    }

    /// Sets an engine option and applies it.
    pub fn set_option(&mut self, name: String, value: Option<String>) -> Result<(), OptionError> {
        let raw = value.unwrap_or_default();
        let invalid = || OptionError::InvalidValue {
            name: name.clone(),
            value: raw.clone(),
        };

        match name.as_str() {
            OPTION_SEED => {
                let seed = raw.parse::<u64>().map_err(|_| invalid())?;
                self.rng = SmallRng::seed_from_u64(seed);
            }
            OPTION_HEAL_ADVANCES_TURN => {
                self.rules.heal_advances_turn = parse_bool(&raw).ok_or_else(invalid)?;
            }
            OPTION_REJECTED_SPECIAL_ADVANCES_TURN => {
                self.rules.rejected_special_advances_turn =
                    parse_bool(&raw).ok_or_else(invalid)?;
            }
            _ => return Err(OptionError::Unknown(name)),
        }

        tracing::debug!(option = %name, value = %raw, "option set");
        Ok(())
    }

    /// Handles an action command: writes any notice, then the turn report.
    pub fn handle_action<W: Write>(&mut self, action: Action, out: &mut W) -> io::Result<()> {
        let outcome = self.act(action);
        if let Some(notice) = &outcome.notice {
            writeln!(out, "notice {}", notice)?;
        }
        write_turn_report(out, &self.state, &outcome.entries)
    }

    /// Handles the `show` command.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_view(out, &self.state)
    }

    /// Handles the `state` command.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match encode_snapshot(&self.state) {
            Ok(json) => writeln!(out, "state {}", json)?,
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "on" | "1" => Some(true),
        "false" | "off" | "0" => Some(false),
        _ => None,
    }
}
