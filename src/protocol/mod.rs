//! Text protocol handling.
//!
//! Parses the line commands a client sends, renders the battle as text, and
//! encodes battle snapshots as JSON.

pub mod parser;
pub mod snapshot;
pub mod view;

pub use parser::{parse_command, Command};
pub use snapshot::{encode_snapshot, parse_snapshot, SnapshotError};
pub use view::{
    controls_line, cooldown_line, health_bar, write_turn_report, write_view, HEALTH_BAR_WIDTH,
};
