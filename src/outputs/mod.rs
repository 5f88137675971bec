//! Output writers for parsed games.
//!
//! # Submodules
//!
//! - [`json`]: Writes each game's clues to a JSON file for the storage loader

pub mod json;
