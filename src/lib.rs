//! # cluebase
//!
//! Extracts structured trivia clue records from archived game-show pages.
//!
//! ## Pipeline
//!
//! 1. **Parsing**: Walk a game page's round tables into candidate clues
//! 2. **Filtering**: Drop degenerate candidates and normalize category labels
//! 3. **Dating**: Stamp every surviving clue with the page's air date
//! 4. **Output**: Hand the clues to storage (here, per-game JSON files)
//!
//! The parsing core ([`parser`]) is synchronous, stateless and free of I/O.
//! It returns diagnostics as [`models::Notice`]s instead of logging; the
//! [`loader`] and [`report`] modules do the file handling and logging.
//!
//! ```ignore
//! let parsed = cluebase::parser::parse_game_html(&html, "7001")?;
//! for clue in &parsed.clues {
//!     println!("{} {}", clue.id, clue.clue_text);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod outputs;
pub mod parser;
pub mod report;
pub mod utils;

pub use error::{AppError, ParseError};
pub use models::{Clue, ClueSlot, GameId, GameParse, Notice};
pub use parser::{parse_game, parse_game_html};
