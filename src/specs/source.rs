// src/specs/source.rs
//! Deck source: the external builder (Moxfield, Archidekt, TappedOut) the list
//! was authored in, recovered from the deck page's outbound links.

use reqwest::Url;

use crate::config::consts::{SOURCE_DOMAINS, UNKNOWN_SOURCE};

/// First href whose host is an allow-listed domain (or a subdomain of one).
/// Relative and unparsable hrefs are ignored.
pub fn find_source<S: AsRef<str>>(hrefs: &[S], domains: &[&str]) -> Option<String> {
    hrefs
        .iter()
        .map(AsRef::as_ref)
        .find(|href| host_matches(href, domains))
        .map(str::to_string)
}

/// [`find_source`] over the built-in allow-list, with the "unknown" sentinel.
pub fn resolve_deck_source<S: AsRef<str>>(hrefs: &[S]) -> String {
    find_source(hrefs, SOURCE_DOMAINS).unwrap_or_else(|| s!(UNKNOWN_SOURCE))
}

fn host_matches(href: &str, domains: &[&str]) -> bool {
    let Ok(url) = Url::parse(href) else { return false };
    let Some(host) = url.host_str() else { return false };
    let host = host.to_ascii_lowercase();
    domains.iter().any(|d| {
        host == *d
            || host
                .strip_suffix(d)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}
