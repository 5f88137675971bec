//! Category label normalization.
//!
//! Category cells often carry host commentary, either in parentheses
//! (`SCIENCE (Alex: pick a planet)`) or on a line of its own. Storage marks
//! such text with square brackets, so recognizable asides are rewritten into
//! `[...]` form with their content intact. A trailing line that contains no
//! lowercase letters is the actual label; everything before it is dropped.
//!
//! Rule order:
//! 1. Trailing non-lowercase line: return it and stop.
//! 2. `(phrase: text)`
//! 3. `\nphrase: text)`
//! 4. `(phrase: text` left unclosed to the end
//! 5. `(phrase; text)`
//!
//! Rules 2 through 5 are each matched against the original label and the
//! last one that matches decides the result.

use crate::models::CategoryRule;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TRAILING_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[^a-z]+$").expect("valid regex"));
static COLON_PARENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\()(\b.*\b.*:\s*).*(\))").expect("valid regex"));
static COLON_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\n)(\b.*\b.*:\s*).*(\))").expect("valid regex"));
static UNCLOSED_PARENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\()(\b[^)]*\b[^)]*:\s*)[^)]*$").expect("valid regex"));
static SEMICOLON_PARENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\()(\b.*\b.*;\s*).*(\))").expect("valid regex"));

/// Normalize a raw category label, returning it unchanged when no rule fires.
pub fn normalize_category(raw: &str) -> String {
    match rewrite_category(raw) {
        Some((_, rewritten)) => rewritten,
        None => raw.to_string(),
    }
}

/// Like [`normalize_category`], but reports which rule produced the result.
pub fn rewrite_category(raw: &str) -> Option<(CategoryRule, String)> {
    if TRAILING_LINE.is_match(raw) {
        let last = raw.rsplit('\n').next().unwrap_or(raw);
        return Some((CategoryRule::TrailingLine, last.to_string()));
    }

    let mut result = None;

    if let Some(caps) = COLON_PARENS.captures(raw) {
        result = Some((CategoryRule::ColonParens, bracket_enclosed(raw, &caps, "[")));
    }
    if let Some(caps) = COLON_LINE.captures(raw) {
        result = Some((CategoryRule::ColonLine, bracket_enclosed(raw, &caps, "\n[")));
    }
    if let Some(caps) = UNCLOSED_PARENS.captures(raw) {
        let open = group_span(&caps, 1);
        let rewritten = format!("{}[{}", &raw[..open.0], &raw[open.1..]);
        result = Some((CategoryRule::UnclosedParens, rewritten));
    }
    if let Some(caps) = SEMICOLON_PARENS.captures(raw) {
        result = Some((CategoryRule::SemicolonParens, bracket_enclosed(raw, &caps, "[")));
    }

    result
}

/// Replace the opener (group 1) with `open` and the closing `)` (group 3)
/// with `]`, keeping everything in between.
fn bracket_enclosed(raw: &str, caps: &Captures<'_>, open: &str) -> String {
    let opener = group_span(caps, 1);
    let closer = group_span(caps, 3);
    format!(
        "{}{}{}]{}",
        &raw[..opener.0],
        open,
        &raw[opener.1..closer.0],
        &raw[closer.1..]
    )
}

fn group_span(caps: &Captures<'_>, index: usize) -> (usize, usize) {
    // Groups 1 and 3 are mandatory in every pattern above.
    caps.get(index).map(|m| (m.start(), m.end())).unwrap_or((0, 0))
}
