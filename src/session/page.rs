// src/session/page.rs
use std::path::Path;

/// Why a single page operation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("timed out")]
    Timeout,
    #[error("no element matches {0:?}")]
    NotFound(String),
    #[error("{0}")]
    Failed(String),
}

/// The handful of browser operations the session driver needs.
///
/// One instance is one live tab; calls are never concurrent. Methods do not
/// wait on their own: bounded waiting is the driver's job.
#[allow(async_fn_in_trait)]
pub trait DeckPage {
    /// Load `url` and return once the document has loaded.
    async fn goto(&mut self, url: &str) -> Result<(), PageError>;

    /// One probe: does anything match `selector` right now?
    async fn exists(&mut self, selector: &str) -> bool;

    /// Click the first element matching `selector`.
    async fn click(&mut self, selector: &str) -> Result<(), PageError>;

    /// Visible text of every element matching `selector`, in document order.
    async fn labels(&mut self, selector: &str) -> Result<Vec<String>, PageError>;

    /// Click the `index`-th element matching `selector`.
    async fn click_nth(&mut self, selector: &str, index: usize) -> Result<(), PageError>;

    /// Current serialized document.
    async fn content(&mut self) -> Result<String, PageError>;

    /// Full-page PNG capture.
    async fn screenshot(&mut self, path: &Path) -> Result<(), PageError>;
}
