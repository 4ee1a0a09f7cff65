// src/specs/deck_table.rs
//! Row classifier for the deck-preview table view.
//!
//! The table's columns are not labeled reliably and move between page versions
//! (`[Colors, CMC, Name, Type?, Price]` on one build, `[Count, Name, Price]` on
//! another), so each cell is assigned to a field by **what it looks like**:
//!
//! | field | rule                                                            |
//! |-------|-----------------------------------------------------------------|
//! | name  | first link text in the row, else first plain non-numeric cell   |
//! | count | first cell with a `×` marker (`×3` → 3)                         |
//! | type  | first cell containing a card type (`Legendary Creature — Elf`)  |
//! | cmc   | first bare one- or two-digit cell                               |
//! | price | last cell starting with `$`                                     |
//!
//! Every rule is independent and may come up empty. Only the name rule can
//! reject a row.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::config::consts::UNKNOWN_CATEGORY;
use crate::core::html::{self, is_tag, sel, text_of};
use crate::core::sanitize::is_numeric;
use crate::model::{CardRecord, CardType};

const COUNT_MARKER: char = '×';
const CURRENCY_MARKER: char = '$';
const HEADINGS: &[&str] = &["h2", "h3"];

static TR: LazyLock<Selector> = LazyLock::new(|| sel("tr"));
static LINK: LazyLock<Selector> = LazyLock::new(|| sel("a"));

/// One table row, reduced to what the rules look at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowCells {
    /// Normalized text of each `<td>`, in order.
    pub texts: Vec<String>,
    /// First non-empty link text in the row, and the cell holding it (if any).
    pub link: Option<(Option<usize>, String)>,
}

/// Extract every card row of a rendered deck page.
/// Never fails: odd markup just yields fewer records.
pub fn classify(markup: &str, deck_id: &str, deck_source: Option<&str>) -> Vec<CardRecord> {
    let doc = Html::parse_document(markup);
    let deck_title = html::first_h1(&doc);

    let mut out = Vec::new();
    let mut heading: Option<String> = None;

    // Tree order == document order, so the last heading seen precedes the table.
    for node in doc.root_element().descendants() {
        let Some(el) = ElementRef::wrap(node) else { continue };

        if is_tag(el, HEADINGS) {
            let text = text_of(el);
            if !text.is_empty() { heading = Some(text); }
            continue;
        }
        if !is_tag(el, &["table"]) { continue; }

        let category = heading.clone().unwrap_or_else(|| s!(UNKNOWN_CATEGORY));
        for tr in own_rows(el).skip(1) {
            let row = read_row(tr);
            let Some(mut rec) = classify_row(&row) else { continue };
            rec.deck_id = s!(deck_id);
            rec.deck_title = deck_title.clone();
            rec.deck_source = deck_source.map(str::to_string);
            rec.category = Some(category.clone());
            out.push(rec);
        }
    }

    out
}

/// Apply the field rules to one row. `None` when no name can be recovered.
/// Deck-level fields are left for the caller.
pub fn classify_row(row: &RowCells) -> Option<CardRecord> {
    if row.texts.is_empty() { return None; }

    let (name, name_cell) = name_rule(row)?;
    Some(CardRecord {
        name,
        count: count_rule(&row.texts),
        card_type: type_rule(&row.texts, name_cell),
        cmc: cmc_rule(&row.texts, name_cell),
        price: price_rule(&row.texts),
        ..CardRecord::default()
    })
}

/* ---------------- rules ---------------- */

/// Link text first; otherwise the first cell that is non-empty, non-numeric
/// and not already a count or price.
pub fn name_rule(row: &RowCells) -> Option<(String, Option<usize>)> {
    if let Some((cell, text)) = &row.link {
        return Some((text.clone(), *cell));
    }
    row.texts
        .iter()
        .enumerate()
        .find(|(_, t)| {
            !t.is_empty() && !is_numeric(t) && !is_count_cell(t) && !is_price_cell(t)
        })
        .map(|(i, t)| (t.clone(), Some(i)))
}

pub fn count_rule(texts: &[String]) -> Option<u32> {
    texts.iter().find(|t| is_count_cell(t)).and_then(|t| parse_count(t))
}

/// `"×3"`, `"3 ×"`, `"3"` → 3. Idempotent on its own output.
pub fn parse_count(text: &str) -> Option<u32> {
    text.replace(COUNT_MARKER, "").trim().parse().ok()
}

pub fn type_rule(texts: &[String], skip: Option<usize>) -> Option<CardType> {
    texts
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != skip)
        .find_map(|(_, t)| match_card_type(t))
}

/// Exact match, else the first vocabulary entry contained in the text
/// (case-insensitive, vocabulary order).
pub fn match_card_type(text: &str) -> Option<CardType> {
    if let Ok(t) = text.parse::<CardType>() {
        return Some(t);
    }
    let lower = text.to_ascii_lowercase();
    CardType::ALL
        .into_iter()
        .find(|t| lower.contains(&t.as_str().to_ascii_lowercase()))
}

pub fn cmc_rule(texts: &[String], skip: Option<usize>) -> Option<u32> {
    texts
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != skip)
        .map(|(_, t)| t.as_str())
        .find(|t| (1..=2).contains(&t.len()) && t.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|t| t.parse().ok())
}

/// Scanned right to left: price is the last populated column when present.
pub fn price_rule(texts: &[String]) -> Option<String> {
    texts.iter().rev().find(|t| is_price_cell(t)).cloned()
}

fn is_count_cell(text: &str) -> bool {
    text.contains(COUNT_MARKER)
}

fn is_price_cell(text: &str) -> bool {
    text.starts_with(CURRENCY_MARKER)
}

/* ---------------- markup ---------------- */

/// Rows belonging to this table, not to a table nested inside it.
fn own_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let id = table.id();
    table.select(&TR).filter(move |tr| {
        tr.ancestors()
            .filter_map(ElementRef::wrap)
            .find(|a| is_tag(*a, &["table"]))
            .is_some_and(|t| t.id() == id)
    })
}

pub fn read_row(tr: ElementRef<'_>) -> RowCells {
    let cells: Vec<ElementRef<'_>> = tr
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|c| is_tag(*c, &["td"]))
        .collect();

    let texts = cells.iter().map(|c| text_of(*c)).collect();

    let link = tr
        .select(&LINK)
        .map(|a| (a, html::trimmed_text(a)))
        .find(|(_, text)| !text.is_empty())
        .map(|(a, text)| {
            let cell = a
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|p| is_tag(*p, &["td"]))
                .and_then(|td| cells.iter().position(|c| c.id() == td.id()));
            (cell, text)
        });

    RowCells { texts, link }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(texts: &[&str]) -> RowCells {
        RowCells { texts: texts.iter().map(|t| s!(*t)).collect(), link: None }
    }

    #[test]
    fn plain_row_without_links() {
        let rec = classify_row(&row(&["×2", "Lightning Bolt", "Instant", "$0.50"])).unwrap();
        assert_eq!(rec.count, Some(2));
        assert_eq!(rec.name, "Lightning Bolt");
        assert_eq!(rec.card_type, Some(CardType::Instant));
        assert_eq!(rec.price.as_deref(), Some("$0.50"));
    }

    #[test]
    fn link_beats_earlier_text_cells() {
        let mut r = row(&["W U", "3", "Swords to Plowshares", "Instant", "$1.99"]);
        r.link = Some((Some(2), s!("Swords to Plowshares")));
        let rec = classify_row(&r).unwrap();
        assert_eq!(rec.name, "Swords to Plowshares");
        assert_eq!(rec.cmc, Some(3));
    }

    #[test]
    fn fallback_name_skips_numbers_counts_and_prices() {
        let (name, cell) = name_rule(&row(&["", "1", "×4", "$2.00", "Forest"])).unwrap();
        assert_eq!(name, "Forest");
        assert_eq!(cell, Some(4));
        assert_eq!(name_rule(&row(&["1", "2.5", "×1", "$3"])), None);
    }

    #[test]
    fn empty_row_is_rejected() {
        assert_eq!(classify_row(&RowCells::default()), None);
        assert_eq!(classify_row(&row(&["", " "])), None);
    }

    #[test]
    fn count_parsing_is_idempotent() {
        for raw in ["×1", "× 7", "12×", "3"] {
            let n = parse_count(raw).unwrap();
            assert_eq!(parse_count(&n.to_string()), Some(n));
        }
        assert_eq!(parse_count("×many"), None);
        assert_eq!(count_rule(&[s!("×x")]), None);
    }

    #[test]
    fn type_matches_exact_then_substring() {
        assert_eq!(match_card_type("creature"), Some(CardType::Creature));
        assert_eq!(match_card_type("Legendary Creature — Elf Druid"), Some(CardType::Creature));
        assert_eq!(match_card_type("Artifact Creature"), Some(CardType::Creature));
        assert_eq!(match_card_type("Basic Land — Mountain"), Some(CardType::Land));
        assert_eq!(match_card_type("Creatures"), Some(CardType::Creature));
        assert_eq!(match_card_type("ENCHANTMENTS"), Some(CardType::Enchantment));
        assert_eq!(match_card_type("Landfall"), Some(CardType::Land));
        assert_eq!(match_card_type("$0.25"), None);
    }

    #[test]
    fn type_rule_ignores_the_name_cell() {
        let texts = [s!("Artifact Mutation"), s!("Instant")];
        assert_eq!(type_rule(&texts, Some(0)), Some(CardType::Instant));
        assert_eq!(type_rule(&texts, None), Some(CardType::Artifact));
    }

    #[test]
    fn price_prefers_the_last_dollar_cell() {
        let texts = [s!("$ budget"), s!("Sol Ring"), s!("$1.25")];
        assert_eq!(price_rule(&texts).as_deref(), Some("$1.25"));
        assert_eq!(price_rule(&[s!("Sol Ring")]), None);
    }

    #[test]
    fn cmc_needs_a_short_bare_number() {
        assert_eq!(cmc_rule(&[s!("×2"), s!("Bolt"), s!("1")], None), Some(1));
        assert_eq!(cmc_rule(&[s!("100"), s!("0.5")], None), None);
        assert_eq!(cmc_rule(&[s!("7")], Some(0)), None);
    }

    #[test]
    fn category_from_nearest_heading() {
        let html = r#"
            <h1>Burn It All</h1>
            <h2>Creatures</h2>
            <table>
              <tr><th>Name</th></tr>
              <tr><td><a href="/cards/x">Ojer Axonil</a></td></tr>
            </table>
            <h3>Instants</h3>
            <div><table>
              <tr><th>Name</th></tr>
              <tr><td><a href="/cards/y">Lightning Bolt</a></td></tr>
            </table></div>
        "#;
        let recs = classify(html, "d1", Some("https://moxfield.com/decks/1"));
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].category.as_deref(), Some("Creatures"));
        assert_eq!(recs[1].category.as_deref(), Some("Instants"));
        assert!(recs.iter().all(|r| r.deck_id == "d1"));
        assert!(recs.iter().all(|r| r.deck_title.as_deref() == Some("Burn It All")));
        assert!(recs.iter().all(|r| r.deck_source.as_deref() == Some("https://moxfield.com/decks/1")));
    }

    #[test]
    fn table_without_heading_is_unknown() {
        let html = "<table><tr><td>h</td></tr><tr><td>Sol Ring</td></tr></table>";
        let recs = classify(html, "d", None);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category.as_deref(), Some(UNKNOWN_CATEGORY));
        assert_eq!(recs[0].deck_title, None);
    }

    #[test]
    fn nested_table_rows_are_not_counted_twice() {
        let html = r#"
            <table>
              <tr><th>outer</th></tr>
              <tr><td>Arcane Signet<table><tr><th>x</th></tr><tr><td>Sol Ring</td></tr></table></td></tr>
            </table>
        "#;
        let recs = classify(html, "d", None);
        let names: Vec<_> = recs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.iter().filter(|n| **n == "Sol Ring").count(), 1);
    }

    #[test]
    fn malformed_markup_degrades_quietly() {
        assert!(classify("", "d", None).is_empty());
        assert!(classify("<table><tr><td>", "d", None).is_empty()); // header row only
        assert!(classify("<table></table><table><tr></tr><tr></tr></table>", "d", None).is_empty());
    }
}
