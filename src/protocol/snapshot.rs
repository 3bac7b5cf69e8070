//! JSON snapshots of the battle state.
//!
//! A snapshot is the serde encoding of `BattleState`, e.g.
//! `{"player_health":90,"monster_health":82,"turn":1,"log":[...]}`.
//! Decoding checks that both health values lie within `[0, MAX_HEALTH]`.

use crate::battle::{Actor, BattleState, MAX_HEALTH};

/// Errors that can occur while decoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{who} health {value} is outside 0..={max}", max = MAX_HEALTH)]
    HealthOutOfRange { who: Actor, value: u32 },
}

/// Encodes a battle state as a single-line JSON snapshot.
pub fn encode_snapshot(state: &BattleState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(state)?)
}

/// Decodes and validates a JSON snapshot.
pub fn parse_snapshot(json: &str) -> Result<BattleState, SnapshotError> {
    let state: BattleState = serde_json::from_str(json)?;
    if state.player_health > MAX_HEALTH {
        return Err(SnapshotError::HealthOutOfRange {
            who: Actor::Player,
            value: state.player_health,
        });
    }
    if state.monster_health > MAX_HEALTH {
        return Err(SnapshotError::HealthOutOfRange {
            who: Actor::Monster,
            value: state.monster_health,
        });
    }
    Ok(state)
}
