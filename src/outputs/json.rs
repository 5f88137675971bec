//! JSON output of parsed games.
//!
//! Each game is written to its own file, named after the game id:
//! ```text
//! json_output_dir/
//! ├── 7001.json
//! └── 7002.json
//! ```
//! A file holds a JSON array of clue records in board order.

use crate::error::AppError;
use crate::models::GameParse;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write the clues of one parsed game to `{json_output_dir}/{game_id}.json`.
///
/// # Arguments
///
/// * `parsed` - A successful page parse; only its clues are serialized
/// * `json_output_dir` - Existing directory to write into
/// * `pretty` - Indent the JSON instead of writing it on one line
///
/// # Returns
///
/// The path of the file written.
///
/// # Errors
///
/// [`AppError::Json`] if serialization fails, or [`AppError::Io`] if the
/// file cannot be written.
#[instrument(level = "info", skip_all, fields(game_id = %parsed.game_id, json_output_dir = %json_output_dir.display()))]
pub async fn write_game_clues(parsed: &GameParse, json_output_dir: &Path, pretty: bool) -> Result<PathBuf, AppError> {
    let json = if pretty {
        serde_json::to_string_pretty(&parsed.clues)?
    } else {
        serde_json::to_string(&parsed.clues)?
    };

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(AppError::io(json_output_dir, e));
    }

    let path = json_output_dir.join(format!("{}.json", parsed.game_id));
    fs::write(&path, json).await.map_err(|e| AppError::io(&path, e))?;
    info!(path = %path.display(), clues = parsed.clues.len(), "Wrote game clues");

    Ok(path)
}
