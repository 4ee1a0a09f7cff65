// src/core/html.rs
// Small helpers over `scraper`'s DOM. Text is always whitespace-normalized.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| sel("a[href]"));
static H1: LazyLock<Selector> = LazyLock::new(|| sel("h1"));

/// Parse a selector known at compile time.
pub(crate) fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

/// Visible text of an element, whitespace collapsed and trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Visible text of an element, trimmed only. Inner spacing is kept as written.
pub fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub fn is_tag(el: ElementRef<'_>, names: &[&str]) -> bool {
    let name = el.value().name();
    names.iter().any(|n| n.eq_ignore_ascii_case(name))
}

/// Every `href` attribute on an anchor, in document order.
pub fn anchor_hrefs(doc: &Html) -> Vec<String> {
    doc.select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .collect()
}

/// Text of the first `<h1>`, if it has any.
pub fn first_h1(doc: &Html) -> Option<String> {
    doc.select(&H1).map(text_of).find(|t| !t.is_empty())
}
