//! Property tests for the turn resolver.

use proptest::prelude::*;

use monster_slayer::battle::{Action, BattleState, LogEntry, ALL_ACTIONS, MAX_HEALTH};
use monster_slayer::resolve::{resolve, ActionError, Rules, ScriptedDice};

fn any_action() -> impl Strategy<Value = Action> {
    prop::sample::select(ALL_ACTIONS.to_vec())
}

fn any_state() -> impl Strategy<Value = BattleState> {
    (0..=MAX_HEALTH, 0..=MAX_HEALTH, 0u32..1_000, prop::collection::vec(0u32..50, 0..4)).prop_map(
        |(player_health, monster_health, turn, heals)| BattleState {
            player_health,
            monster_health,
            turn,
            log: heals.into_iter().map(|amount| LogEntry::Heal { amount }).collect(),
        },
    )
}

fn any_dice() -> impl Strategy<Value = ScriptedDice> {
    prop::collection::vec(any::<u32>(), 0..8).prop_map(ScriptedDice::new)
}

proptest! {
    #[test]
    fn health_stays_in_bounds(
        actions in prop::collection::vec(any_action(), 1..60),
        rolls in prop::collection::vec(any::<u32>(), 0..200),
    ) {
        let rules = Rules::classic();
        let mut dice = ScriptedDice::new(rolls);
        let mut state = BattleState::new();
        for action in actions {
            state = resolve(&state, action, &rules, &mut dice).state;
            prop_assert!(state.player_health <= MAX_HEALTH);
            prop_assert!(state.monster_health <= MAX_HEALTH);
        }
    }

    #[test]
    fn attacks_only_lower_health(
        count in 1usize..40,
        rolls in prop::collection::vec(any::<u32>(), 0..80),
    ) {
        let rules = Rules::classic();
        let mut dice = ScriptedDice::new(rolls);
        let mut state = BattleState::new();
        for _ in 0..count {
            let next = resolve(&state, Action::Attack, &rules, &mut dice).state;
            prop_assert!(next.player_health <= state.player_health);
            prop_assert!(next.monster_health <= state.monster_health);
            prop_assert_eq!(next.turn, state.turn + 1);
            state = next;
        }
    }

    #[test]
    fn special_on_cooldown_only_advances_turn(state in any_state(), mut dice in any_dice()) {
        prop_assume!(state.turn % 3 != 0);
        let r = resolve(&state, Action::SpecialAttack, &Rules::classic(), &mut dice);
        prop_assert_eq!(r.notice, Some(ActionError::SpecialOnCooldown { turn: state.turn }));
        prop_assert_eq!(r.state.player_health, state.player_health);
        prop_assert_eq!(r.state.monster_health, state.monster_health);
        prop_assert_eq!(&r.state.log, &state.log);
        prop_assert_eq!(r.state.turn, state.turn + 1);
    }

    #[test]
    fn special_when_ready_is_accepted(state in any_state(), mut dice in any_dice()) {
        prop_assume!(state.turn % 3 == 0);
        let r = resolve(&state, Action::SpecialAttack, &Rules::classic(), &mut dice);
        prop_assert_eq!(r.notice, None);
        prop_assert_eq!(r.state.turn, state.turn + 1);
    }

    #[test]
    fn heal_never_decrements_turn(state in any_state(), mut dice in any_dice()) {
        let r = resolve(&state, Action::Heal, &Rules::classic(), &mut dice);
        prop_assert_eq!(r.state.turn, state.turn);
        prop_assert_eq!(r.state.log.len(), state.log.len() + 2);
    }

    #[test]
    fn restart_resets_from_anywhere(state in any_state(), mut dice in any_dice()) {
        let r = resolve(&state, Action::Restart, &Rules::classic(), &mut dice);
        prop_assert_eq!(r.state, BattleState::new());
    }

    #[test]
    fn self_destruct_zeroes_player(state in any_state(), mut dice in any_dice()) {
        let r = resolve(&state, Action::SelfDestruct, &Rules::classic(), &mut dice);
        prop_assert_eq!(r.state.player_health, 0);
        prop_assert_eq!(r.state.monster_health, state.monster_health);
        prop_assert_eq!(r.state.turn, state.turn);
    }

    #[test]
    fn log_only_grows(state in any_state(), action in any_action(), mut dice in any_dice()) {
        prop_assume!(action != Action::Restart);
        let r = resolve(&state, action, &Rules::classic(), &mut dice);
        prop_assert!(r.state.log.len() >= state.log.len());
        prop_assert_eq!(&r.state.log[..state.log.len()], &state.log[..]);
    }
}

#[test]
fn turn_three_special_permitted_turn_four_rejected() {
    let rules = Rules::classic();
    let mut dice = ScriptedDice::default();

    let mut state = BattleState::new();
    state.turn = 3;
    assert_eq!(resolve(&state, Action::SpecialAttack, &rules, &mut dice).notice, None);

    state.turn = 4;
    assert!(resolve(&state, Action::SpecialAttack, &rules, &mut dice).notice.is_some());
}

#[test]
fn lethal_attack_scenario() {
    let mut state = BattleState::new();
    state.monster_health = 10;
    let mut dice = ScriptedDice::new([10, 9]);
    let r = resolve(&state, Action::Attack, &Rules::classic(), &mut dice);
    assert_eq!(r.state.monster_health, 0);
    assert_eq!(r.state.log.len(), 1);
    assert!(matches!(r.state.log[0], LogEntry::Attack { damage: 10, .. }));
    assert_eq!(r.state.turn, 1);
}
