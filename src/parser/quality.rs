//! Quality gate for candidate clues.
//!
//! A candidate survives only if its text is non-empty, is not the `=`
//! placeholder, does not open with a parenthesized aside and contains no
//! `[...]` fragment. Survivors get their category normalized; rejected
//! candidates are dropped as they are.

use crate::models::{CandidateClue, Notice, Rejection};
use crate::parser::category::rewrite_category;
use once_cell::sync::Lazy;
use regex::Regex;

static PREAMBLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\(.*\)").expect("valid regex"));
static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*\]").expect("valid regex"));

/// Check clue text against every rule, reporting the first one it breaks.
pub fn check_clue_text(text: &str) -> Result<(), Rejection> {
    let text = text.trim();
    let rules: [(bool, Rejection); 4] = [
        (text.is_empty(), Rejection::Empty),
        (text == "=", Rejection::Placeholder),
        (PREAMBLE.is_match(text), Rejection::Preamble),
        (BRACKETED.is_match(text), Rejection::Bracketed),
    ];

    match rules.iter().find(|(failed, _)| *failed) {
        Some((_, reason)) => Err(*reason),
        None => Ok(()),
    }
}

/// Keep the candidates that pass [`check_clue_text`], in their original
/// order, and normalize the category of each one kept.
pub fn quality_pass(candidates: Vec<CandidateClue>, notices: &mut Vec<Notice>) -> Vec<CandidateClue> {
    candidates
        .into_iter()
        .filter_map(|mut clue| {
            if let Err(reason) = check_clue_text(&clue.clue_text) {
                notices.push(Notice::Rejected {
                    id: clue.id,
                    reason,
                });
                return None;
            }

            if let Some((rule, rewritten)) = rewrite_category(&clue.category) {
                notices.push(Notice::CategoryRewritten {
                    rule,
                    from: std::mem::replace(&mut clue.category, rewritten.clone()),
                    to: rewritten,
                });
            }
            Some(clue)
        })
        .collect()
}
