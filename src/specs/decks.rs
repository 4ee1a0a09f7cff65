// src/specs/decks.rs
//! Deck locator: the commander's `optimized.json` → ranked deck references.
//!
//! Expected shape: `{ "table": [ { "urlhash": "<id>", ...summary fields }, ... ] }`.
//! The list order is the site's own ranking and is preserved.

use std::collections::{BTreeMap, HashSet};

use reqwest::Client;
use serde_json::Value;

use crate::config::options::RunOptions;
use crate::core::net;
use crate::error::ScrapeError;
use crate::model::DeckReference;

const LIST_FIELD: &str = "table";
const ID_FIELD: &str = "urlhash";

/// One GET, no retry. Any failure here aborts the run.
pub async fn fetch(client: &Client, opts: &RunOptions) -> Result<Vec<DeckReference>, ScrapeError> {
    let url = opts.metadata_url();
    tracing::info!(%url, "fetching deck list");
    let doc = net::get_json(client, &url).await?;
    let decks = parse(&doc, opts, &url)?;
    tracing::info!(found = decks.len(), limit = opts.deck_limit, "deck list resolved");
    Ok(decks)
}

/// Build references from a decoded metadata document, truncated to `deck_limit`.
/// Entries without a string id are skipped; repeated ids keep the first entry.
pub fn parse(doc: &Value, opts: &RunOptions, url: &str) -> Result<Vec<DeckReference>, ScrapeError> {
    let entries = doc
        .get(LIST_FIELD)
        .and_then(Value::as_array)
        .ok_or_else(|| ScrapeError::MalformedMetadata {
            url: s!(url),
            reason: format!("missing `{LIST_FIELD}` list"),
        })?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::with_capacity(entries.len().min(opts.deck_limit));

    for (i, entry) in entries.iter().enumerate() {
        if out.len() >= opts.deck_limit { break; }

        let Some(id) = entry.get(ID_FIELD).and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty()) else {
            tracing::warn!(index = i, "deck entry without `{ID_FIELD}`; skipped");
            continue;
        };
        if !seen.insert(id) { continue; }

        out.push(DeckReference {
            id: s!(id),
            detail_url: opts.detail_url(id),
            metadata: scalar_fields(entry),
        });
    }

    Ok(out)
}

/// Stringify the entry's scalar fields; arrays, objects and nulls are left out.
fn scalar_fields(entry: &Value) -> BTreeMap<String, String> {
    let Some(obj) = entry.as_object() else { return BTreeMap::new() };
    obj.iter()
        .filter_map(|(k, v)| {
            let s = match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((k.clone(), s))
        })
        .collect()
}
