//! Reading raw game pages from disk and parsing them in batches.
//!
//! Pages are parsed concurrently, up to [`Config::concurrency`] at a time.
//! A page that cannot be read or parsed is logged and reported in its
//! [`PageOutcome`]; the rest of the batch carries on.

use crate::config::Config;
use crate::error::AppError;
use crate::models::{GameId, GameParse};
use crate::parser::parse_game_html;
use crate::report::log_notices;
use crate::utils::game_id_from_path;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info, instrument};

/// The result of one page in a batch.
#[derive(Debug)]
pub struct PageOutcome {
    pub path: PathBuf,
    pub result: Result<GameParse, AppError>,
}

/// Read and parse one raw game page. The game id comes from the file name.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn parse_game_file(path: &Path) -> Result<GameParse, AppError> {
    let game_id = game_id_from_path(path)?;
    let html = fs::read_to_string(path).await.map_err(|e| AppError::io(path, e))?;
    debug!(game_id = %game_id, bytes = html.len(), "Read game page");

    parse_game_html(&html, game_id).map_err(|source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Raw page files in `dir` with the given extension, sorted by name.
pub async fn list_game_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, AppError> {
    let mut entries = fs::read_dir(dir).await.map_err(|e| AppError::io(dir, e))?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(|e| AppError::io(dir, e))? {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Parse every game page in `dir`, or only those in `only` when it is not
/// empty.
///
/// Up to `config.concurrency` pages are read and parsed at once. A page that
/// fails is reported in its [`PageOutcome`] and does not stop the batch.
///
/// # Arguments
///
/// * `dir` - Directory holding `{game_id}.{page_extension}` files
/// * `config` - Supplies `page_extension` and `concurrency`
/// * `only` - Game ids to keep; empty means every page in `dir`
///
/// # Returns
///
/// One outcome per selected page, in file name order.
///
/// # Errors
///
/// [`AppError::Io`] if `dir` cannot be listed. Per-page failures are not
/// errors here.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn parse_game_dir(dir: &Path, config: &Config, only: &[GameId]) -> Result<Vec<PageOutcome>, AppError> {
    let files: Vec<PathBuf> = list_game_files(dir, &config.page_extension)
        .await?
        .into_iter()
        .filter(|path| {
            only.is_empty()
                || game_id_from_path(path)
                    .map(|id| only.contains(&id))
                    .unwrap_or(false)
        })
        .collect();

    info!(
        count = files.len(),
        concurrency = config.concurrency,
        "Parsing game pages"
    );

    let mut outcomes: Vec<(usize, PageOutcome)> = stream::iter(files.into_iter().enumerate())
        .map(|(i, path)| async move {
            let result = parse_game_file(&path).await;
            match &result {
                Ok(parsed) => {
                    log_notices(&parsed.game_id, &parsed.notices);
                    debug!(
                        game_id = %parsed.game_id,
                        clues = parsed.clues.len(),
                        air_date = %parsed.air_date,
                        "Parsed game page"
                    );
                }
                Err(e) => error!(path = %path.display(), error = %e, "Failed to parse game page; skipping"),
            }
            (i, PageOutcome { path, result })
        })
        .buffer_unordered(config.concurrency.max(1))
        .collect()
        .await;

    outcomes.sort_by_key(|(i, _)| *i);
    Ok(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
}
