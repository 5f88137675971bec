//! Air date extraction from the page title.

use crate::error::{ParseError, Result};
use crate::parser::dom::{all_in_document, text_of};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

static AIR_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("valid regex"));

/// Find the first `YYYY-MM-DD` in `text` and parse it.
pub fn extract_air_date(text: &str) -> Result<NaiveDate> {
    let found = AIR_DATE
        .find(text)
        .ok_or_else(|| ParseError::MissingAirDate(text.to_string()))?;

    NaiveDate::parse_from_str(found.as_str(), "%Y-%m-%d").map_err(|e| ParseError::InvalidAirDate {
        text: found.as_str().to_string(),
        reason: e.to_string(),
    })
}

/// Air date of a game page, read from its `<title>`.
pub fn page_air_date(document: &Html) -> Result<NaiveDate> {
    let title = all_in_document(document, "title")?
        .into_iter()
        .next()
        .ok_or(ParseError::MissingSection("page title"))?;
    extract_air_date(&text_of(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_date_from_title_text() {
        let date = extract_air_date("J! Archive - Show #4567, aired 2004-06-02").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2004, 6, 2).unwrap());
    }

    #[test]
    fn test_missing_date_is_an_error() {
        assert!(matches!(
            extract_air_date("J! Archive - Show #4567"),
            Err(ParseError::MissingAirDate(_))
        ));
    }

    #[test]
    fn test_impossible_date_is_an_error() {
        assert!(matches!(
            extract_air_date("aired 2004-13-45"),
            Err(ParseError::InvalidAirDate { .. })
        ));
    }

    #[test]
    fn test_page_air_date_reads_title() {
        let html = Html::parse_document(
            "<html><head><title>Show #1, aired 1984-09-10</title></head><body></body></html>",
        );
        assert_eq!(
            page_air_date(&html).unwrap(),
            NaiveDate::from_ymd_opt(1984, 9, 10).unwrap()
        );
    }

    #[test]
    fn test_page_without_title() {
        let html = Html::parse_document("<html><body><p>no title</p></body></html>");
        assert_eq!(
            page_air_date(&html),
            Err(ParseError::MissingSection("page title"))
        );
    }
}
