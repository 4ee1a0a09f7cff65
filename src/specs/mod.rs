// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific knowledge of the site: *where the data lives* and *how to read it*.
//!
//! ## What lives here
//! - `decks` – the commander's metadata JSON (`optimized.json`) → ordered
//!   [`DeckReference`](crate::model::DeckReference)s.
//! - `deck_table` – the **row classifier**: rendered deck-preview markup →
//!   [`CardRecord`](crate::model::CardRecord)s, assigning each cell to a field by
//!   the shape of its content rather than its column position.
//! - `source` – picking the deck-building-tool link out of a page's anchors.
//!
//! ## What does **not** live here
//! - Browser interaction (`session`), file output (`file`/`export`), run
//!   orchestration (`runner`).
//!
//! ## Conventions & invariants
//! - Everything except `decks::fetch` is **pure**: markup or JSON in, values out.
//! - Parsing never errors on odd markup; it yields fewer records instead.
//! - Specs are testable **offline** against inline fixtures.
//!
//! ## Typical call chain
//! ```text
//! runner → specs::decks::fetch → [DeckReference]
//!        → session::driver::render → RenderedPage
//!        → specs::deck_table::classify → [CardRecord] → store
//! ```
pub mod deck_table;
pub mod decks;
pub mod source;
