//! # cluebase
//!
//! Command-line front end: parses downloaded game pages into per-game JSON
//! clue files, and lists the season and game ids linked from downloaded
//! index pages.
//!
//! ## Usage
//!
//! ```sh
//! cluebase parse -i ./raw/games -j ./json
//! cluebase index --season-list ./raw/list_seasons.html
//! ```

use clap::Parser;
use cluebase::cli::{Cli, Command, IndexArgs, ParseArgs};
use cluebase::config::load_config;
use cluebase::error::AppError;
use cluebase::loader::parse_game_dir;
use cluebase::outputs::json::write_game_clues;
use cluebase::parser::index::{parse_game_ids, parse_season_ids};
use cluebase::report::{summarize, NoticeSummary};
use cluebase::utils::ensure_writable_dir;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("cluebase starting up");

    let cli = Cli::parse();
    debug!(?cli, "Parsed CLI arguments");

    match cli.command {
        Command::Parse(args) => run_parse(args).await?,
        Command::Index(args) => run_index(args).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

#[instrument(level = "info", skip_all)]
async fn run_parse(args: ParseArgs) -> Result<(), AppError> {
    let mut config = load_config(args.config.as_deref()).await?;
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency.max(1);
    }

    // Early check: ensure JSON output dir is writable
    if let Err(e) = ensure_writable_dir(&args.json_output_dir).await {
        error!(
            path = %args.json_output_dir.display(),
            error = %e,
            "JSON output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let outcomes = parse_game_dir(&args.input_dir, &config, &args.game_filter()).await?;

    let mut pages_ok = 0usize;
    let mut pages_failed = 0usize;
    let mut clues_written = 0usize;
    let mut notices = NoticeSummary::default();

    for outcome in &outcomes {
        let Ok(parsed) = &outcome.result else {
            pages_failed += 1;
            continue;
        };
        notices = notices.merge(summarize(&parsed.notices));

        match write_game_clues(parsed, &args.json_output_dir, config.pretty_json).await {
            Ok(_) => {
                pages_ok += 1;
                clues_written += parsed.clues.len();
            }
            Err(e) => {
                pages_failed += 1;
                error!(game_id = %parsed.game_id, error = %e, "Failed to write game clues");
            }
        }
    }

    info!(
        pages = outcomes.len(),
        pages_ok,
        pages_failed,
        clues_written,
        rejected = notices.rejected,
        empty_cells = notices.empty_cells,
        categories_rewritten = notices.categories_rewritten,
        "Completed game page parsing"
    );
    Ok(())
}

#[instrument(level = "info", skip_all)]
async fn run_index(args: IndexArgs) -> Result<(), AppError> {
    if let Some(path) = &args.season_list {
        let html = read_page(path).await?;
        let seasons = parse_season_ids(&html).map_err(|source| AppError::Parse {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), count = seasons.len(), "Indexed seasons");
        for season in seasons {
            println!("season\t{season}");
        }
    }

    for path in &args.season_page {
        let html = read_page(path).await?;
        let games = parse_game_ids(&html).map_err(|source| AppError::Parse {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), count = games.len(), "Indexed games");
        for game in games {
            println!("game\t{game}");
        }
    }
    Ok(())
}

async fn read_page(path: &Path) -> Result<String, AppError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::io(path, e))
}
