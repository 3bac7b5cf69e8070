//! Command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the main loop can dispatch on.

use crate::battle::Action;

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a battle action (`attack`, `special`, `heal`, `selfdestruct`,
    /// `newgame`).
    Act(Action),

    /// Render the full view: health bars, battle log, and controls.
    Show,

    /// Print the battle state as a JSON snapshot.
    State,

    /// Replace the battle state from a JSON snapshot.
    Position { json: String },

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    if let Some(action) = Action::from_command(tokens[0]) {
        return Some(Command::Act(action));
    }

    match tokens[0] {
        "show" => Some(Command::Show),
        "state" => Some(Command::State),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(trimmed),

        other => {
            tracing::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        tracing::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                tracing::warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position <json>`; the snapshot is everything after the keyword.
fn parse_position(line: &str) -> Option<Command> {
    let json = line.strip_prefix("position").unwrap_or("").trim();
    if json.is_empty() {
        tracing::warn!("malformed position: expected 'position <json>'");
        return None;
    }
    Some(Command::Position { json: json.to_string() })
}
