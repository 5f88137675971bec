//! Turns parse [`Notice`]s into log events and per-game counts.
//!
//! The parser itself never logs; callers hand its notices to
//! [`log_notices`] and aggregate them with [`summarize`].

use crate::models::{GameId, Notice};
use crate::utils::truncate_for_log;
use itertools::Itertools;
use tracing::{debug, info};

/// Longest category text shown in a rewrite event.
const MAX_LOGGED_CATEGORY: usize = 120;

/// Notice counts for one page or a whole batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoticeSummary {
    pub empty_cells: usize,
    pub rejected: usize,
    pub categories_rewritten: usize,
    pub rounds_absent: usize,
}

impl NoticeSummary {
    pub fn merge(self, other: NoticeSummary) -> NoticeSummary {
        NoticeSummary {
            empty_cells: self.empty_cells + other.empty_cells,
            rejected: self.rejected + other.rejected,
            categories_rewritten: self.categories_rewritten + other.categories_rewritten,
            rounds_absent: self.rounds_absent + other.rounds_absent,
        }
    }
}

fn kind(notice: &Notice) -> &'static str {
    match notice {
        Notice::EmptyCell { .. } => "empty_cell",
        Notice::Rejected { .. } => "rejected",
        Notice::CategoryRewritten { .. } => "category_rewritten",
        Notice::RoundAbsent { .. } => "round_absent",
    }
}

pub fn summarize(notices: &[Notice]) -> NoticeSummary {
    let counts = notices.iter().counts_by(kind);
    let count = |k: &str| counts.get(k).copied().unwrap_or(0);
    NoticeSummary {
        empty_cells: count("empty_cell"),
        rejected: count("rejected"),
        categories_rewritten: count("category_rewritten"),
        rounds_absent: count("round_absent"),
    }
}

/// Emit one event per notice, then a summary line for the game.
pub fn log_notices(game_id: &GameId, notices: &[Notice]) {
    for notice in notices {
        match notice {
            Notice::EmptyCell { slot } => {
                debug!(game_id = %game_id, %slot, "Skipped unrevealed clue cell");
            }
            Notice::Rejected { id, reason } => {
                info!(game_id = %game_id, clue_id = %id, %reason, "Rejected clue");
            }
            Notice::CategoryRewritten { rule, from, to } => {
                debug!(
                    game_id = %game_id,
                    %rule,
                    from = %truncate_for_log(from, MAX_LOGGED_CATEGORY),
                    to = %truncate_for_log(to, MAX_LOGGED_CATEGORY),
                    "Rewrote category commentary"
                );
            }
            Notice::RoundAbsent { round } => {
                debug!(game_id = %game_id, round, "Round not present on page");
            }
        }
    }

    let summary = summarize(notices);
    info!(
        game_id = %game_id,
        empty_cells = summary.empty_cells,
        rejected = summary.rejected,
        categories_rewritten = summary.categories_rewritten,
        rounds_absent = summary.rounds_absent,
        "Parse notices"
    );
}
