//! Batch configuration loaded from an optional YAML file.
//!
//! ```yaml
//! concurrency: 16
//! pretty_json: true
//! page_extension: html
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use crate::error::AppError;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Pages parsed at once when nothing else is configured.
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of pages parsed concurrently.
    pub concurrency: usize,
    /// Indent the per-game JSON files.
    pub pretty_json: bool,
    /// Extension of raw game page files.
    pub page_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            pretty_json: false,
            page_extension: "html".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self, AppError> {
        let mut config: Config = serde_yaml::from_str(text)?;
        // A zero limit would stall the batch.
        config.concurrency = config.concurrency.max(1);
        Ok(config)
    }
}

/// Load the config at `path`, or the defaults when no path is given.
#[instrument(level = "debug")]
pub async fn load_config(path: Option<&Path>) -> Result<Config, AppError> {
    let Some(path) = path else {
        debug!("No config file given; using defaults");
        return Ok(Config::default());
    };

    let text = fs::read_to_string(path).await.map_err(|e| AppError::io(path, e))?;
    let config = Config::from_yaml(&text)?;
    debug!(?config, "Loaded configuration");
    Ok(config)
}
