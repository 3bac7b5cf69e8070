//! The turn transition function.
//!
//! `resolve` borrows the current state and returns the next one, so the
//! caller always swaps in a complete snapshot and never observes a state
//! where health and log disagree.

use crate::battle::{Action, Actor, BattleState, LogEntry, SPECIAL_COOLDOWN};

use super::dice::{Dice, ATTACK_ROLL, COUNTER_ROLL, HEAL_ROLL, SPECIAL_ROLL};
use super::rules::Rules;

/// Log text appended when the player self-destructs.
pub const SELF_DESTRUCT_TEXT: &str = "Player chooses to self-destruct!";

/// User-facing notices for actions that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("Special attack can only be used every {} turns!", SPECIAL_COOLDOWN)]
    SpecialOnCooldown { turn: u32 },

    #[error("The battle is over. Start a new game.")]
    BattleOver,
}

/// Outcome of resolving one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub state: BattleState,
    /// Set when the action was rejected; `state` may still differ from the
    /// input (a rejected special still uses up the turn under classic rules).
    pub notice: Option<ActionError>,
}

impl Resolution {
    /// Log entries appended by this resolution relative to `before`.
    ///
    /// After a restart the log starts over, so every entry is new.
    pub fn new_entries(&self, before: &BattleState) -> &[LogEntry] {
        let log = &self.state.log;
        if log.len() >= before.log.len() && log[..before.log.len()] == before.log[..] {
            &log[before.log.len()..]
        } else {
            &log[..]
        }
    }
}

/// Applies `action` to `state` and returns the resulting state.
///
/// Does not check whether the battle is already over; that is up to the
/// caller.
pub fn resolve<D: Dice>(
    state: &BattleState,
    action: Action,
    rules: &Rules,
    dice: &mut D,
) -> Resolution {
    let mut next = state.clone();
    let mut notice = None;

    match action {
        Action::Attack => {
            let before = next.monster_health;
            let damage = dice.roll(ATTACK_ROLL);
            next.damage_monster(damage);
            next.log.push(LogEntry::Attack { attacker: Actor::Player, damage });
            if before > damage {
                counter_attack(&mut next, dice);
            }
            next.turn = next.turn.saturating_add(1);
        }
        Action::SpecialAttack => {
            if next.special_ready() {
                // Retaliation is gated on the monster being alive before the hit.
                let before = next.monster_health;
                let damage = dice.roll(SPECIAL_ROLL);
                next.damage_monster(damage);
                next.log.push(LogEntry::SpecialAttack { attacker: Actor::Player, damage });
                if before > 0 {
                    counter_attack(&mut next, dice);
                }
                next.turn = next.turn.saturating_add(1);
            } else {
                notice = Some(ActionError::SpecialOnCooldown { turn: next.turn });
                if rules.rejected_special_advances_turn {
                    next.turn = next.turn.saturating_add(1);
                }
            }
        }
        Action::Heal => {
            let amount = dice.roll(HEAL_ROLL);
            next.heal_player(amount);
            next.log.push(LogEntry::Heal { amount });
            counter_attack(&mut next, dice);
            if rules.heal_advances_turn {
                next.turn = next.turn.saturating_add(1);
            }
        }
        Action::SelfDestruct => {
            next.player_health = 0;
            next.log.push(LogEntry::Narrative { text: SELF_DESTRUCT_TEXT.to_string() });
        }
        Action::Restart => {
            next = BattleState::new();
        }
    }

    Resolution { state: next, notice }
}

/// Monster strikes back at the player.
fn counter_attack<D: Dice>(state: &mut BattleState, dice: &mut D) {
    let damage = dice.roll(COUNTER_ROLL);
    state.damage_player(damage);
    state.log.push(LogEntry::Attack { attacker: Actor::Monster, damage });
}
