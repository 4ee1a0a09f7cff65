// src/runner.rs
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use rand::Rng;

use crate::{
    config::options::{Politeness, RunOptions},
    core::net,
    error::ScrapeError,
    file::{self, ensure_directory},
    model::{CardRecord, DeckReference},
    progress::Progress,
    session::{self, ChromeSession, DeckPage},
    specs,
    store::DeckDataset,
};

/// What a run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub decks_total: usize,
    pub decks_parsed: usize,
    pub decks_empty: usize,
    pub decks_failed: usize,
    pub cards: usize,
    /// Per-deck files, in processing order.
    pub files_written: Vec<PathBuf>,
    pub combined: PathBuf,
}

/// Full run: locate decks, render + classify each in one browser tab, export.
///
/// Fails only when nothing can be processed at all (metadata unavailable or
/// malformed, browser won't start, output directory unusable). Per-deck
/// failures are counted in the summary instead.
pub async fn run(
    opts: &RunOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, ScrapeError> {
    let client = net::http_client()?;
    let decks = specs::decks::fetch(&client, opts).await?;

    ensure_directory(&opts.output_dir)?;
    match file::write_deck_sample(&opts.sample_path(), &decks, opts.format) {
        Ok(path) => tracing::info!(path = %path.display(), decks = decks.len(), "saved deck metadata"),
        Err(e) => tracing::warn!("could not save deck metadata: {e}"),
    }
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Found {} decks for {}", decks.len(), opts.commander_slug));
    }

    let mut session = ChromeSession::launch(opts.headed, &opts.timings).await?;
    let summary = process_decks(opts, &decks, &mut session, progress).await;
    session.close().await;
    summary
}

/// Sequential deck loop over an already-open page, then the combined export.
/// The combined file is written even if no deck contributed records.
pub async fn process_decks<P: DeckPage>(
    opts: &RunOptions,
    decks: &[DeckReference],
    page: &mut P,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, ScrapeError> {
    let debug_dir = prepare_debug_dir(opts);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(decks.len());
    }

    let mut summary = RunSummary { decks_total: decks.len(), ..RunSummary::default() };
    let mut dataset = DeckDataset::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (i, deck) in decks.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(pause(&opts.politeness)).await; // be polite
        }
        let index = i + 1;
        tracing::info!(deck = %deck.id, index, total = decks.len(), url = %deck.detail_url, "fetching deck");

        let records = match process_deck(page, deck, opts, debug_dir.as_deref()).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(deck = %deck.id, "deck skipped: {e}");
                summary.decks_failed += 1;
                if let Some(p) = progress.as_deref_mut() {
                    p.deck_failed(index, &deck.id, &e.to_string());
                }
                continue;
            }
        };

        if records.is_empty() {
            tracing::warn!(deck = %deck.id, "deck contained no cards after parsing");
            summary.decks_empty += 1;
            if let Some(p) = progress.as_deref_mut() {
                p.deck_empty(index, &deck.id);
            }
            continue;
        }

        // The per-deck file is a convenience copy; its loss doesn't drop the deck.
        match file::write_deck_file(&opts.output_dir, &deck.id, &records, opts.format, &mut seen) {
            Ok(path) => {
                tracing::info!(deck = %deck.id, cards = records.len(), path = %path.display(), "deck saved");
                summary.files_written.push(path);
            }
            Err(e) => tracing::error!(deck = %deck.id, "could not write deck file: {e}"),
        }

        let cards = records.len();
        dataset.push_deck(&deck.id, records);
        summary.decks_parsed += 1;
        if let Some(p) = progress.as_deref_mut() {
            p.deck_parsed(index, &deck.id, cards);
        }
    }

    summary.cards = dataset.len();
    summary.combined = file::write_combined(&opts.combined_path(), &dataset, opts.format)?;
    tracing::info!(
        path = %summary.combined.display(),
        rows = summary.cards,
        decks = dataset.decks().len(),
        "combined decklists saved"
    );

    if let Some(p) = progress.as_deref_mut() {
        p.finish(&summary);
    }
    Ok(summary)
}

/// Render one deck and classify its tables. Errors are deck-local.
pub async fn process_deck<P: DeckPage>(
    page: &mut P,
    deck: &DeckReference,
    opts: &RunOptions,
    debug_dir: Option<&std::path::Path>,
) -> Result<Vec<CardRecord>, ScrapeError> {
    let rendered = session::render(page, deck, &opts.timings, debug_dir).await?;
    if !rendered.notes.is_empty() {
        tracing::debug!(deck = %deck.id, skipped = rendered.notes.len(), "page rendered with skipped steps");
    }
    Ok(specs::deck_table::classify(&rendered.html, &rendered.deck_id, Some(&rendered.source)))
}

/// Screenshots are best-effort: an unusable directory just turns them off.
fn prepare_debug_dir(opts: &RunOptions) -> Option<PathBuf> {
    let dir = opts.debug_dir.as_ref()?;
    match ensure_directory(dir) {
        Ok(()) => Some(dir.clone()),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), "screenshots disabled: {e}");
            None
        }
    }
}

fn pause(p: &Politeness) -> Duration {
    let jitter = if p.jitter_ms > 0 { rand::rng().random_range(0..p.jitter_ms) } else { 0 };
    Duration::from_millis(p.pause_ms + jitter)
}
