//! Clue record construction.

use crate::models::{CandidateClue, ClueSlot, GameId};
use chrono::{NaiveDate, Utc};

/// Deterministic clue id: zero-padded game id, then round, column and row.
///
/// `000042-1-3-2` is game 42, first round, fourth category, third row.
pub fn clue_id(game_id: &GameId, slot: ClueSlot) -> String {
    format!("{}-{}", game_id.padded(), slot)
}

/// Build a candidate clue. Texts are trimmed; timestamps are set to now.
pub fn build_clue(
    clue_text: &str,
    solution: &str,
    category: &str,
    slot: ClueSlot,
    air_date: Option<NaiveDate>,
    game_id: &GameId,
) -> CandidateClue {
    let now = Utc::now();
    CandidateClue {
        id: clue_id(game_id, slot),
        clue_text: clue_text.trim().to_string(),
        solution: solution.trim().to_string(),
        category: category.trim().to_string(),
        slot,
        game_id: game_id.clone(),
        air_date,
        created_at: now,
        updated_at: now,
    }
}
