//! Battle state representation.
//!
//! Holds the complete snapshot of a battle at a given point in time: both
//! combatants' health, the turn counter, and the battle log.

use serde::{Deserialize, Serialize};

use super::log::LogEntry;

/// Health of a combatant at the start of a battle, and the heal cap.
pub const MAX_HEALTH: u32 = 100;

/// The special attack is available on turns divisible by this number.
pub const SPECIAL_COOLDOWN: u32 = 3;

/// The side that won a finished battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Monster,
}

impl Winner {
    /// Returns the display name used by the view.
    pub const fn name(self) -> &'static str {
        match self {
            Winner::Player => "Player",
            Winner::Monster => "Monster",
        }
    }
}

/// Complete battle state at a point in time.
///
/// Health values always lie in `[0, MAX_HEALTH]`. The log is only ever
/// extended, except on restart where the whole state is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub player_health: u32,
    pub monster_health: u32,
    /// Completed player action cycles.
    pub turn: u32,
    pub log: Vec<LogEntry>,
}

impl Default for BattleState {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleState {
    /// Creates the state of a fresh battle: full health, turn 0, empty log.
    pub fn new() -> Self {
        BattleState {
            player_health: MAX_HEALTH,
            monster_health: MAX_HEALTH,
            turn: 0,
            log: Vec::new(),
        }
    }

    /// Returns true if the special attack may be used this turn.
    pub fn special_ready(&self) -> bool {
        self.turn % SPECIAL_COOLDOWN == 0
    }

    /// Number of turns until the special attack is ready again (0 if ready).
    pub fn turns_until_special(&self) -> u32 {
        match self.turn % SPECIAL_COOLDOWN {
            0 => 0,
            r => SPECIAL_COOLDOWN - r,
        }
    }

    /// Returns the winner once either side has been reduced to zero health.
    ///
    /// A player at zero loses even if the monster is also at zero.
    pub fn winner(&self) -> Option<Winner> {
        if self.player_health == 0 {
            Some(Winner::Monster)
        } else if self.monster_health == 0 {
            Some(Winner::Player)
        } else {
            None
        }
    }

    /// Returns true once the battle has a winner.
    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Reduces the player's health by `amount`, flooring at zero.
    pub(crate) fn damage_player(&mut self, amount: u32) {
        self.player_health = self.player_health.saturating_sub(amount);
    }

    /// Reduces the monster's health by `amount`, flooring at zero.
    pub(crate) fn damage_monster(&mut self, amount: u32) {
        self.monster_health = self.monster_health.saturating_sub(amount);
    }

    /// Restores the player's health by `amount`, capped at `MAX_HEALTH`.
    pub(crate) fn heal_player(&mut self, amount: u32) {
        self.player_health = self.player_health.saturating_add(amount).min(MAX_HEALTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_battle_is_full_health() {
        let state = BattleState::new();
        assert_eq!(state.player_health, 100);
        assert_eq!(state.monster_health, 100);
        assert_eq!(state.turn, 0);
        assert!(state.log.is_empty());
        assert_eq!(state, BattleState::default());
    }

    #[test]
    fn special_ready_every_third_turn() {
        let mut state = BattleState::new();
        let ready: Vec<bool> = (0..7)
            .map(|t| {
                state.turn = t;
                state.special_ready()
            })
            .collect();
        assert_eq!(ready, vec![true, false, false, true, false, false, true]);
    }

    #[test]
    fn turns_until_special_counts_down() {
        let mut state = BattleState::new();
        for (turn, expected) in [(0, 0), (1, 2), (2, 1), (3, 0), (4, 2)] {
            state.turn = turn;
            assert_eq!(state.turns_until_special(), expected, "turn {}", turn);
        }
    }

    #[test]
    fn winner_detection() {
        let mut state = BattleState::new();
        assert_eq!(state.winner(), None);
        assert!(!state.is_over());

        state.monster_health = 0;
        assert_eq!(state.winner(), Some(Winner::Player));

        state.monster_health = 40;
        state.player_health = 0;
        assert_eq!(state.winner(), Some(Winner::Monster));
    }

    #[test]
    fn simultaneous_zero_is_monster_win() {
        let mut state = BattleState::new();
        state.player_health = 0;
        state.monster_health = 0;
        assert_eq!(state.winner(), Some(Winner::Monster));
    }

    #[test]
    fn health_helpers_clamp() {
        let mut state = BattleState::new();
        state.damage_monster(250);
        assert_eq!(state.monster_health, 0);

        state.player_health = 95;
        state.heal_player(19);
        assert_eq!(state.player_health, 100);

        state.damage_player(7);
        assert_eq!(state.player_health, 93);
        state.damage_player(u32::MAX);
        assert_eq!(state.player_health, 0);
    }
}
