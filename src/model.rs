// src/model.rs
//
// Records that flow between the pipeline stages.
//
// DeckReference  (locator)   → session driver
// RenderedPage   (driver)    → row classifier
// CardRecord     (classifier)→ store / export

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One deck found on the metadata endpoint. Unique by `id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckReference {
    pub id: String,
    pub detail_url: String,
    /// Scalar summary fields from the metadata entry, stringified.
    pub metadata: BTreeMap<String, String>,
}

/// A driver step that was skipped without failing the deck.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepNote {
    pub step: &'static str,
    pub detail: String,
}

/// The interacted document for one deck. Dropped after parsing.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    pub deck_id: String,
    pub html: String,
    pub source: String,
    pub notes: Vec<StepNote>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardType {
    Creature,
    Instant,
    Sorcery,
    Artifact,
    Land,
    Enchantment,
    Planeswalker,
    Battle,
}

impl CardType {
    /// Match order used by the classifier.
    pub const ALL: [CardType; 8] = [
        CardType::Creature,
        CardType::Instant,
        CardType::Sorcery,
        CardType::Artifact,
        CardType::Land,
        CardType::Enchantment,
        CardType::Planeswalker,
        CardType::Battle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Creature => "Creature",
            CardType::Instant => "Instant",
            CardType::Sorcery => "Sorcery",
            CardType::Artifact => "Artifact",
            CardType::Land => "Land",
            CardType::Enchantment => "Enchantment",
            CardType::Planeswalker => "Planeswalker",
            CardType::Battle => "Battle",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        CardType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown card type: {s}"))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardRecord {
    pub deck_id: String,
    pub deck_title: Option<String>,
    pub deck_source: Option<String>,
    pub category: Option<String>,
    pub count: Option<u32>,
    pub name: String,
    pub card_type: Option<CardType>,
    pub cmc: Option<u32>,
    pub price: Option<String>,
}

impl CardRecord {
    /// Absent counts mean a single copy.
    pub fn effective_count(&self) -> u32 {
        self.count.unwrap_or(1)
    }
}
