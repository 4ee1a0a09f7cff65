// src/error.rs
use std::time::Duration;

/// Everything that can go wrong during a run.
///
/// Run-fatal: `UpstreamUnavailable`, `MalformedMetadata`, `Browser`.
/// Deck-fatal (skip and continue): `NavigationError`, `RenderTimeout`.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("metadata endpoint unavailable: {url} ({reason})")]
    UpstreamUnavailable { url: String, reason: String },

    #[error("malformed metadata from {url}: {reason}")]
    MalformedMetadata { url: String, reason: String },

    #[error("navigation to {url} failed: {reason}")]
    NavigationError { url: String, reason: String },

    #[error("page {url} did not load within {timeout:?} ({attempts} attempts)")]
    RenderTimeout {
        url: String,
        timeout: Duration,
        attempts: u32,
    },

    #[error("browser error: {0}")]
    Browser(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    /// Errors after which the remaining decks can still be processed.
    pub fn is_deck_local(&self) -> bool {
        matches!(self, Self::NavigationError { .. } | Self::RenderTimeout { .. })
    }
}
