//! Error types for page parsing and for the batch tooling around it.

use std::path::PathBuf;
use thiserror::Error;

/// A condition that makes a whole page unusable.
///
/// Content-quality rejections are not errors; they show up as
/// [`Notice`](crate::models::Notice)s instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("required section missing: {0}")]
    MissingSection(&'static str),

    #[error("malformed clue cell in {location}: missing {field}")]
    MalformedCell {
        location: String,
        field: &'static str,
    },

    #[error("round {round} has no category for column {column}")]
    MissingCategory { round: u8, column: usize },

    #[error("no YYYY-MM-DD air date in page title {0:?}")]
    MissingAirDate(String),

    #[error("invalid air date {text:?}: {reason}")]
    InvalidAirDate { text: String, reason: String },

    #[error("invalid selector {css:?}: {reason}")]
    Selector { css: &'static str, reason: String },
}

/// Errors raised by the file-level loader, config and output writers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("cannot derive a game id from {0}")]
    GameFileName(PathBuf),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        let e = ParseError::MissingSection("first round table");
        assert_eq!(e.to_string(), "required section missing: first round table");

        let e = ParseError::MalformedCell {
            location: "round 1, row 2, column 3".to_string(),
            field: "correct response",
        };
        assert!(e.to_string().contains("missing correct response"));
    }

    #[test]
    fn test_app_error_wraps_parse_error() {
        let e = AppError::Parse {
            path: PathBuf::from("raw/games/7001.html"),
            source: ParseError::MissingAirDate("Show #1".to_string()),
        };
        let msg = e.to_string();
        assert!(msg.contains("7001.html"));
        assert!(msg.contains("Show #1"));
    }
}
