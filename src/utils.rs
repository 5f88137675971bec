//! Utility functions for logging, file names and output directories.

use crate::error::AppError;
use crate::models::GameId;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are cut at a character boundary no later than `max` bytes,
/// with an ellipsis and the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let cut = (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Game id of a raw page file: the file name up to its first `.`.
///
/// `raw/games/7001.html` → `7001`.
pub fn game_id_from_path(path: &Path) -> Result<GameId, AppError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .map(GameId::new)
        .ok_or_else(|| AppError::GameFileName(path.to_path_buf()))
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a scratch file.
///
/// # Arguments
///
/// * `path` - Directory that output files will be written into
///
/// # Returns
///
/// `Ok(())` when the directory exists and accepts new files.
///
/// # Errors
///
/// [`AppError::Io`] naming the directory or scratch file that could not be
/// created.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), AppError> {
    fs::create_dir_all(path).await.map_err(|e| AppError::io(path, e))?;

    let scratch_path = path.join("..__write_check__");
    stdfs::File::create(&scratch_path).map_err(|e| AppError::io(&scratch_path, e))?;
    let _ = stdfs::remove_file(&scratch_path);
    info!("Output directory is writable");
    Ok(())
}
