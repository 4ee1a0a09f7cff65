// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::consts::{DEFAULT_COMMANDER, DEFAULT_DECK_LIMIT, DEFAULT_LOG_FILE, DEFAULT_OUT_DIR};
use crate::config::options::{ExportFormat, RunOptions};
use crate::progress::ConsoleProgress;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
        }
    }
}

/// Scrape EDHREC decklists for one commander into CSV/TSV files.
#[derive(Debug, Parser)]
#[command(name = "edh_scrape", version, about)]
pub struct Args {
    /// Commander slug as it appears in EDHREC URLs.
    #[arg(long, env = "EDH_COMMANDER", default_value = DEFAULT_COMMANDER)]
    pub commander: String,

    /// Maximum number of decks to process.
    #[arg(long, env = "EDH_DECK_LIMIT", default_value_t = DEFAULT_DECK_LIMIT)]
    pub limit: usize,

    /// Directory for per-deck files.
    #[arg(short, long, env = "EDH_OUTPUT_DIR", default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    /// Combined output file [default: <commander>_combined_decklists.<ext>]
    #[arg(long)]
    pub combined: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Save a full-page screenshot per deck into this directory.
    #[arg(long)]
    pub debug_dir: Option<PathBuf>,

    /// Show the browser window.
    #[arg(long)]
    pub headed: bool,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl Args {
    pub fn into_options(self) -> RunOptions {
        RunOptions {
            commander_slug: self.commander,
            deck_limit: self.limit,
            output_dir: self.out,
            combined: self.combined,
            format: self.format.into(),
            debug_dir: self.debug_dir,
            headed: self.headed,
            ..RunOptions::default()
        }
    }
}

pub async fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    crate::log::init(Some(args.log_file.as_path()))?;

    let opts = args.into_options();
    tracing::info!(commander = %opts.commander_slug, limit = opts.deck_limit, "starting run");

    let mut progress = ConsoleProgress::default();
    let summary = crate::runner::run(&opts, Some(&mut progress)).await?;
    if summary.decks_parsed == 0 {
        tracing::warn!("no deck produced any cards");
    }
    Ok(())
}
