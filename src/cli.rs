//! Command-line interface definitions for cluebase.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use crate::models::GameId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the cluebase tool.
///
/// # Examples
///
/// ```sh
/// # Parse every page in a directory of downloaded games
/// cluebase parse -i ./raw/games -j ./json
///
/// # Only two games, with a config file
/// cluebase parse -i ./raw/games -j ./json -c config.yaml --game 7001 --game 7002
///
/// # List game ids linked from downloaded season pages
/// cluebase index --season-page ./raw/seasons/40.html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse raw game pages into per-game JSON clue files
    Parse(ParseArgs),
    /// List season ids or game ids from downloaded index pages
    Index(IndexArgs),
}

#[derive(clap::Args, Debug)]
pub struct ParseArgs {
    /// Directory of raw game pages named `<game_id>.html`
    #[arg(short, long)]
    pub input_dir: PathBuf,

    /// Output directory for per-game JSON files
    #[arg(short, long)]
    pub json_output_dir: PathBuf,

    /// Optional path to a config.yaml file
    #[arg(short, long, env = "CLUEBASE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only parse these games (repeatable)
    #[arg(long = "game", value_name = "GAME_ID")]
    pub games: Vec<String>,

    /// Override the configured number of pages parsed at once
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl ParseArgs {
    pub fn game_filter(&self) -> Vec<GameId> {
        self.games.iter().map(|g| GameId::new(g.as_str())).collect()
    }
}

#[derive(clap::Args, Debug)]
pub struct IndexArgs {
    /// Downloaded season list page
    #[arg(long)]
    pub season_list: Option<PathBuf>,

    /// Downloaded season pages (repeatable)
    #[arg(long)]
    pub season_page: Vec<PathBuf>,
}
