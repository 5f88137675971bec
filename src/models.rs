//! Data models for parsed clues and the diagnostics produced while parsing.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`GameId`]: Opaque identifier of one archived game page
//! - [`ClueSlot`]: Round/category/difficulty address of a clue on the board
//! - [`CandidateClue`]: A clue as built from one cell, before filtering and dating
//! - [`Clue`]: The final, dated record handed to storage
//! - [`GameParse`]: Everything one page parse produces, including [`Notice`]s
//!
//! Serialized field names follow the storage schema (camelCase, `_id` key).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty assigned to the final-round clue. Board rows are 0-based, so
/// this never collides with a first or second round difficulty.
pub const FINAL_DIFFICULTY: usize = 5;

/// Round number stored for the final round.
pub const FINAL_ROUND_NUMBER: u8 = 3;

/// Identifier of a game page.
///
/// Usually numeric (`"7001"`). Numeric ids are kept in canonical form with
/// leading zeros removed, so `"042"` and `"42"` name the same game; any
/// other id is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
            let trimmed = id.trim_start_matches('0');
            return Self(if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() });
        }
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Six-wide, zero-padded form used as the clue id prefix.
    ///
    /// Only numeric ids are padded. Padding a canonical number never lands on
    /// another canonical number, and a non-numeric id can never equal an
    /// all-digit one, so distinct games keep distinct prefixes.
    pub fn padded(&self) -> String {
        if self.0.bytes().all(|b| b.is_ascii_digit()) {
            format!("{:0>6}", self.0)
        } else {
            self.0.clone()
        }
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u32> for GameId {
    fn from(id: u32) -> Self {
        Self::new(id.to_string())
    }
}

/// The two board rounds that share the table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardRound {
    First,
    Second,
}

impl BoardRound {
    pub fn number(self) -> u8 {
        match self {
            BoardRound::First => 1,
            BoardRound::Second => 2,
        }
    }
}

/// Where a clue sits in a game.
///
/// Board clues carry their column and row; the final round has a single
/// fixed address. Two cells of one page can only share a slot if they share
/// round, column and row, which the table walk never produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClueSlot {
    Board {
        round: BoardRound,
        category_index: usize,
        difficulty: usize,
    },
    Final,
}

impl ClueSlot {
    pub fn board(round: BoardRound, category_index: usize, difficulty: usize) -> Self {
        ClueSlot::Board {
            round,
            category_index,
            difficulty,
        }
    }

    pub fn round_number(&self) -> u8 {
        match self {
            ClueSlot::Board { round, .. } => round.number(),
            ClueSlot::Final => FINAL_ROUND_NUMBER,
        }
    }

    pub fn category_index(&self) -> usize {
        match self {
            ClueSlot::Board { category_index, .. } => *category_index,
            ClueSlot::Final => 0,
        }
    }

    pub fn difficulty(&self) -> usize {
        match self {
            ClueSlot::Board { difficulty, .. } => *difficulty,
            ClueSlot::Final => FINAL_DIFFICULTY,
        }
    }
}

impl fmt::Display for ClueSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.round_number(),
            self.category_index(),
            self.difficulty()
        )
    }
}

/// A clue built from one cell, not yet filtered or stamped with an air date.
///
/// Only the quality filter touches it, and only to rewrite `category` on
/// survivors. Turning it into a [`Clue`] requires a date; a date set at
/// build time takes precedence over the one supplied when sealing.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateClue {
    pub id: String,
    pub clue_text: String,
    pub solution: String,
    pub category: String,
    pub slot: ClueSlot,
    pub game_id: GameId,
    pub air_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateClue {
    /// Seal the candidate into a [`Clue`], falling back to `air_date` when
    /// the candidate was built without one.
    pub fn dated(self, air_date: NaiveDate) -> Clue {
        let air_date = self.air_date.unwrap_or(air_date);
        Clue {
            id: self.id,
            clue_text: self.clue_text,
            solution: self.solution,
            category: self.category,
            difficulty: self.slot.difficulty(),
            air_date,
            game_id: self.game_id,
            round_number: self.slot.round_number(),
            category_index: self.slot.category_index(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A finished clue record, in the shape the storage layer expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clue {
    #[serde(rename = "_id")]
    pub id: String,
    pub clue_text: String,
    pub solution: String,
    pub category: String,
    pub difficulty: usize,
    pub air_date: NaiveDate,
    pub game_id: GameId,
    pub round_number: u8,
    pub category_index: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Why the quality filter dropped a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No clue text at all.
    Empty,
    /// The `=` placeholder used for missing text.
    Placeholder,
    /// Text opens with a parenthesized aside.
    Preamble,
    /// Text contains a `[...]` fragment.
    Bracketed,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::Empty => "empty clue text",
            Rejection::Placeholder => "placeholder clue text",
            Rejection::Preamble => "parenthesized preamble",
            Rejection::Bracketed => "bracketed fragment",
        };
        f.write_str(s)
    }
}

/// Which category rewrite fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRule {
    /// Trailing all-caps line kept, leading commentary dropped.
    TrailingLine,
    /// `(phrase: text)` → `[phrase: text]`.
    ColonParens,
    /// `\nphrase: text)` → `\n[phrase: text]`.
    ColonLine,
    /// `(phrase: text` with no close → `[phrase: text`.
    UnclosedParens,
    /// `(phrase; text)` → `[phrase; text]`.
    SemicolonParens,
}

impl fmt::Display for CategoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CategoryRule::TrailingLine => "trailing-line",
            CategoryRule::ColonParens => "colon-parens",
            CategoryRule::ColonLine => "colon-line",
            CategoryRule::UnclosedParens => "unclosed-parens",
            CategoryRule::SemicolonParens => "semicolon-parens",
        };
        f.write_str(s)
    }
}

/// Something noteworthy but non-fatal that happened while parsing a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A board cell with no clue in it (never revealed on air).
    EmptyCell { slot: ClueSlot },
    /// A candidate dropped by the quality filter.
    Rejected { id: String, reason: Rejection },
    /// A category label rewritten by the normalizer.
    CategoryRewritten {
        rule: CategoryRule,
        from: String,
        to: String,
    },
    /// An optional round not present on the page.
    RoundAbsent { round: u8 },
}

/// Result of parsing one game page.
#[derive(Debug, Clone)]
pub struct GameParse {
    pub game_id: GameId,
    pub air_date: NaiveDate,
    pub clues: Vec<Clue>,
    pub notices: Vec<Notice>,
}
