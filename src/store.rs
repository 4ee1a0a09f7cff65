// src/store.rs
//
// Deck aggregator: the run's combined, in-memory dataset.
//
// - Decks are appended in processing order; each deck's rows keep their order.
// - A deck with no records is not stored (and is not an error).
// - Columns are reconciled at export time: the combined view carries every
//   column that at least one record populates, plus the required ones.

use crate::export::Column;
use crate::model::CardRecord;

#[derive(Clone, Debug, Default)]
pub struct DeckDataset {
    records: Vec<CardRecord>,
    /// (deck_id, rows contributed), one entry per contributing deck.
    decks: Vec<(String, usize)>,
}

impl DeckDataset {
    pub fn new() -> Self { Self::default() }

    /// Append one deck's records. Returns `false` (and stores nothing) if empty.
    pub fn push_deck(&mut self, deck_id: &str, records: Vec<CardRecord>) -> bool {
        if records.is_empty() { return false; }
        debug_assert!(records.iter().all(|r| r.deck_id == deck_id));

        self.decks.push((s!(deck_id), records.len()));
        self.records.extend(records);
        true
    }

    pub fn records(&self) -> &[CardRecord] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Contributing decks with their row counts, in processing order.
    pub fn decks(&self) -> &[(String, usize)] { &self.decks }

    /// Column superset for the combined export.
    pub fn columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| c.is_required() || self.records.iter().any(|r| c.value(r).is_some()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CardType;

    fn card(deck: &str, name: &str) -> CardRecord {
        CardRecord { deck_id: s!(deck), name: s!(name), ..CardRecord::default() }
    }

    #[test]
    fn empty_decks_are_omitted() {
        let mut ds = DeckDataset::new();
        assert!(!ds.push_deck("a", vec![]));
        assert!(ds.push_deck("b", vec![card("b", "Sol Ring")]));
        assert_eq!(ds.decks(), &[(s!("b"), 1)]);
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn row_count_is_sum_of_deck_counts_and_order_is_kept() {
        let mut ds = DeckDataset::new();
        ds.push_deck("a", vec![card("a", "1"), card("a", "2")]);
        ds.push_deck("b", vec![]);
        ds.push_deck("c", vec![card("c", "3"), card("c", "4"), card("c", "5")]);

        let total: usize = ds.decks().iter().map(|(_, n)| n).sum();
        assert_eq!(ds.len(), total);
        let names: Vec<_> = ds.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn duplicates_across_categories_are_kept() {
        let mut ds = DeckDataset::new();
        let mut a = card("a", "Sol Ring");
        a.category = Some(s!("Artifacts"));
        let mut b = card("a", "Sol Ring");
        b.category = Some(s!("Ramp"));
        ds.push_deck("a", vec![a, b]);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn columns_are_the_populated_superset() {
        let mut ds = DeckDataset::new();
        assert_eq!(ds.columns(), [Column::DeckId, Column::Count, Column::Name]);

        let mut typed = card("a", "Bolt");
        typed.card_type = Some(CardType::Instant);
        ds.push_deck("a", vec![typed]);

        let mut priced = card("b", "Ring");
        priced.price = Some(s!("$1"));
        priced.category = Some(s!("Ramp"));
        ds.push_deck("b", vec![priced]);

        assert_eq!(
            ds.columns(),
            [Column::DeckId, Column::Category, Column::Count, Column::Name, Column::Type, Column::Price]
        );
    }
}
