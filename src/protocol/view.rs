//! Text rendering of the battle.
//!
//! Produces the lines the engine writes to stdout: health bars, battle log,
//! the controls that are currently available, and the game-over banner.

use std::io::{self, Write};

use crate::battle::{Action, BattleState, LogEntry, MAX_HEALTH};

/// Number of cells in a rendered health bar.
pub const HEALTH_BAR_WIDTH: usize = 20;

/// Renders `health` as a fixed-width bar, e.g. `[##########----------]`.
pub fn health_bar(health: u32) -> String {
    let health = health.min(MAX_HEALTH) as usize;
    let filled = health * HEALTH_BAR_WIDTH / MAX_HEALTH as usize;
    let mut bar = String::with_capacity(HEALTH_BAR_WIDTH + 2);
    bar.push('[');
    bar.extend(std::iter::repeat('#').take(filled));
    bar.extend(std::iter::repeat('-').take(HEALTH_BAR_WIDTH - filled));
    bar.push(']');
    bar
}

/// Health as a percentage of the maximum.
fn percent(health: u32) -> u32 {
    health.min(MAX_HEALTH) * 100 / MAX_HEALTH
}

/// Returns the controls line for `state`, e.g.
/// `controls attack special:off heal selfdestruct`.
///
/// Once the battle is over only `newgame` is offered.
pub fn controls_line(state: &BattleState) -> String {
    if state.is_over() {
        return format!("controls {}", Action::Restart.command());
    }
    let special = if state.special_ready() {
        Action::SpecialAttack.command().to_string()
    } else {
        format!("{}:off", Action::SpecialAttack.command())
    };
    format!(
        "controls {} {} {} {}",
        Action::Attack.command(),
        special,
        Action::Heal.command(),
        Action::SelfDestruct.command(),
    )
}

/// Writes the game-over banner (if any) followed by the controls line.
fn write_controls<W: Write>(out: &mut W, state: &BattleState) -> io::Result<()> {
    if let Some(winner) = state.winner() {
        writeln!(out, "gameover winner {}", winner.name())?;
    }
    writeln!(out, "{}", controls_line(state))
}

/// Writes the report that follows an action: the new log entries, a status
/// line, and the controls.
pub fn write_turn_report<W: Write>(
    out: &mut W,
    state: &BattleState,
    new_entries: &[LogEntry],
) -> io::Result<()> {
    for entry in new_entries {
        writeln!(out, "log {}", entry)?;
    }
    writeln!(
        out,
        "status player {} monster {} turn {}",
        state.player_health, state.monster_health, state.turn
    )?;
    write_controls(out, state)?;
    out.flush()
}

/// Returns the cooldown line shown while the special attack is unavailable,
/// e.g. `Special ready in 2 turns`.
pub fn cooldown_line(state: &BattleState) -> Option<String> {
    if state.is_over() {
        return None;
    }
    match state.turns_until_special() {
        0 => None,
        1 => Some("Special ready in 1 turn".to_string()),
        n => Some(format!("Special ready in {} turns", n)),
    }
}

/// Writes the full view: both health bars, the whole battle log, the
/// special cooldown, and the controls.
pub fn write_view<W: Write>(out: &mut W, state: &BattleState) -> io::Result<()> {
    for (name, health) in [
        ("Your Health", state.player_health),
        ("Monster Health", state.monster_health),
    ] {
        writeln!(out, "{:<16}{} {}%", name, health_bar(health), percent(health))?;
    }
    writeln!(out, "Battle Log")?;
    for entry in &state.log {
        writeln!(out, "  {}", entry)?;
    }
    if let Some(line) = cooldown_line(state) {
        writeln!(out, "{}", line)?;
    }
    write_controls(out, state)?;
    out.flush()
}
