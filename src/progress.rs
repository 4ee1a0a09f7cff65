// src/progress.rs
use crate::runner::RunSummary;

/// Progress reporting for a run. Frontends implement this to surface status
/// to users; every method has a no-op default.
pub trait Progress {
    /// Called once the deck list is known.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// `index` is 1-based.
    fn deck_parsed(&mut self, _index: usize, _deck_id: &str, _cards: usize) {}

    /// Rendered fine but no card rows were recovered.
    fn deck_empty(&mut self, _index: usize, _deck_id: &str) {}

    fn deck_failed(&mut self, _index: usize, _deck_id: &str, _reason: &str) {}

    /// Called at the end, after the combined export.
    fn finish(&mut self, _summary: &RunSummary) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// One line per event on stdout.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        println!("Processing {total} decks");
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn deck_parsed(&mut self, index: usize, deck_id: &str, cards: usize) {
        println!("[{index}/{}] {deck_id}: saved {cards} cards", self.total);
    }

    fn deck_empty(&mut self, index: usize, deck_id: &str) {
        println!("[{index}/{}] {deck_id}: no cards after parsing, skipped", self.total);
    }

    fn deck_failed(&mut self, index: usize, deck_id: &str, reason: &str) {
        println!("[{index}/{}] {deck_id}: failed ({reason})", self.total);
    }

    fn finish(&mut self, summary: &RunSummary) {
        println!(
            "{} of {} decks contributed {} cards ({} empty, {} failed)",
            summary.decks_parsed,
            summary.decks_total,
            summary.cards,
            summary.decks_empty,
            summary.decks_failed,
        );
        println!("Combined decklists saved as {}", summary.combined.display());
    }
}
