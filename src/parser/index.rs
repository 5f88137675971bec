//! Season list and season page link extraction.
//!
//! The season list page links every season (`showseason.php?season=40`) and
//! each season page links its games (`showgame.php?game_id=7001`). Links in
//! the page's first table are resolved against the archive's base URL and
//! the id is read from the `season` or `game_id` query parameter. Links that
//! resolve to another host point off-site and are ignored.

use crate::error::{ParseError, Result};
use crate::models::GameId;
use crate::parser::dom::{all_in_document, selector};
use once_cell::sync::Lazy;
use scraper::Html;
use url::Url;

/// Base that relative archive links resolve against.
pub const ARCHIVE_BASE_URL: &str = "https://j-archive.com/";

static ARCHIVE_BASE: Lazy<Url> = Lazy::new(|| Url::parse(ARCHIVE_BASE_URL).expect("valid base url"));

/// Season ids linked from the season list page, in page order.
pub fn parse_season_ids(list_seasons_html: &str) -> Result<Vec<String>> {
    Ok(first_table_links(list_seasons_html)?
        .iter()
        .filter_map(|href| id_from_href(href, "season"))
        .collect())
}

/// Game ids linked from one season page, in page order.
pub fn parse_game_ids(season_page_html: &str) -> Result<Vec<GameId>> {
    Ok(first_table_links(season_page_html)?
        .iter()
        .filter_map(|href| id_from_href(href, "game_id"))
        .map(GameId::new)
        .collect())
}

fn first_table_links(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let table = all_in_document(&document, "table")?
        .into_iter()
        .next()
        .ok_or(ParseError::MissingSection("index table"))?;

    let link_sel = selector("a[href]")?;
    Ok(table
        .select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect())
}

/// Value of `key` in the query of an on-site link, if present and non-empty.
fn id_from_href(href: &str, key: &str) -> Option<String> {
    let resolved = ARCHIVE_BASE.join(href.trim()).ok()?;
    if host_of(&resolved) != host_of(&ARCHIVE_BASE) {
        return None;
    }

    resolved
        .query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.trim().to_string())
        .filter(|id| !id.is_empty())
}

fn host_of(url: &Url) -> Option<&str> {
    url.host_str().map(|host| host.trim_start_matches("www."))
}
