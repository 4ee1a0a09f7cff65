// src/session/driver.rs
//! Per-deck session driver.
//!
//! ```text
//! Navigating ─► AwaitingTableControl ─► AwaitingTypeColumn ─► AwaitingTableContent ─► Captured
//!     │                 (skippable)          (skippable)          (bounded, 1 retry)
//!     └─ NavigationError / RenderTimeout (deck is skipped)
//! ```
//!
//! Only `Navigating` and reading the final document can fail a deck. Every
//! other step has an upper bound and, when it cannot complete, leaves a
//! [`StepNote`] and moves on.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use scraper::Html;
use tokio::time::{sleep, timeout};

use crate::config::consts::{
    COLUMN_MENU_ITEM, COLUMN_MENU_TOGGLE, TABLE_SELECTOR, TABLE_VIEW_BUTTON, TYPE_COLUMN_LABEL,
};
use crate::config::options::DriverTimings;
use crate::core::html::anchor_hrefs;
use crate::core::sanitize::sanitize_deck_filename;
use crate::error::ScrapeError;
use crate::model::{DeckReference, RenderedPage, StepNote};
use crate::specs::source::resolve_deck_source;

use super::page::{DeckPage, PageError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Navigating,
    AwaitingTableControl,
    AwaitingTypeColumn,
    AwaitingTableContent,
    Captured,
}

impl DriverState {
    pub fn label(&self) -> &'static str {
        match self {
            DriverState::Navigating => "navigating",
            DriverState::AwaitingTableControl => "table-control",
            DriverState::AwaitingTypeColumn => "type-column",
            DriverState::AwaitingTableContent => "table-content",
            DriverState::Captured => "captured",
        }
    }
}

/// Drive `page` through one deck and capture its markup.
/// With `debug_dir` set, a full-page screenshot is attempted before returning.
pub async fn render<P: DeckPage>(
    page: &mut P,
    deck: &DeckReference,
    timings: &DriverTimings,
    debug_dir: Option<&Path>,
) -> Result<RenderedPage, ScrapeError> {
    use DriverState::*;

    let mut notes: Vec<StepNote> = Vec::new();
    let mut state = Navigating;

    loop {
        tracing::debug!(deck = %deck.id, state = state.label(), "driver step");
        state = match state {
            Navigating => {
                navigate(page, &deck.detail_url, timings).await?;
                AwaitingTableControl
            }
            AwaitingTableControl => {
                if let Err(detail) = switch_to_table(page, timings).await {
                    notes.push(skipped(state, &deck.id, detail));
                }
                AwaitingTypeColumn
            }
            AwaitingTypeColumn => {
                if let Err(detail) = enable_type_column(page, timings).await {
                    notes.push(skipped(state, &deck.id, detail));
                }
                AwaitingTableContent
            }
            AwaitingTableContent => {
                if !wait_for_table(page, timings).await {
                    notes.push(skipped(
                        state,
                        &deck.id,
                        format!("no table after {} bounded waits; capturing as-is", timings.table_content_retries + 1),
                    ));
                }
                Captured
            }
            Captured => return capture(page, deck, timings, debug_dir, notes).await,
        };
    }
}

fn skipped(state: DriverState, deck_id: &str, detail: String) -> StepNote {
    tracing::warn!(deck = %deck_id, step = state.label(), "{detail}");
    StepNote { step: state.label(), detail }
}

/* ---------------- steps ---------------- */

/// A timeout is retried within the same call; anything else fails at once.
async fn navigate<P: DeckPage>(page: &mut P, url: &str, t: &DriverTimings) -> Result<(), ScrapeError> {
    let attempts = t.nav_attempts.max(1);
    for attempt in 1..=attempts {
        match bounded(t.nav_timeout, page.goto(url)).await {
            Ok(()) => return Ok(()),
            Err(PageError::Timeout) => {
                tracing::warn!(%url, attempt, attempts, "navigation timed out");
            }
            Err(e) => {
                return Err(ScrapeError::NavigationError { url: s!(url), reason: e.to_string() });
            }
        }
    }
    Err(ScrapeError::RenderTimeout { url: s!(url), timeout: t.nav_timeout, attempts })
}

async fn switch_to_table<P: DeckPage>(page: &mut P, t: &DriverTimings) -> Result<(), String> {
    if !wait_for(page, TABLE_VIEW_BUTTON, t.table_control_wait, t.poll_interval).await {
        return Err(s!("table view control not found"));
    }
    bounded(t.table_control_wait, page.click(TABLE_VIEW_BUTTON))
        .await
        .map_err(|e| format!("table view click failed: {e}"))?;
    tracing::debug!("switched to table view");
    Ok(())
}

async fn enable_type_column<P: DeckPage>(page: &mut P, t: &DriverTimings) -> Result<(), String> {
    let bound = t.column_menu_wait;

    if !wait_for(page, COLUMN_MENU_TOGGLE, bound, t.poll_interval).await {
        return Err(s!("column menu not found"));
    }
    bounded(bound, page.click(COLUMN_MENU_TOGGLE))
        .await
        .map_err(|e| format!("column menu click failed: {e}"))?;

    if !wait_for(page, COLUMN_MENU_ITEM, bound, t.poll_interval).await {
        return Err(s!("column menu did not open"));
    }
    let labels = bounded(bound, page.labels(COLUMN_MENU_ITEM))
        .await
        .map_err(|e| format!("column menu unreadable: {e}"))?;
    let Some(index) = labels.iter().position(|l| l.trim().contains(TYPE_COLUMN_LABEL)) else {
        return Err(format!("no {TYPE_COLUMN_LABEL:?} entry among {} menu items", labels.len()));
    };
    bounded(bound, page.click_nth(COLUMN_MENU_ITEM, index))
        .await
        .map_err(|e| format!("type column toggle failed: {e}"))?;

    sleep(t.column_settle).await;
    tracing::debug!("type column toggled on");
    Ok(())
}

/// One bounded wait plus `table_content_retries` more.
async fn wait_for_table<P: DeckPage>(page: &mut P, t: &DriverTimings) -> bool {
    for round in 0..=t.table_content_retries {
        if wait_for(page, TABLE_SELECTOR, t.table_content_wait, t.poll_interval).await {
            return true;
        }
        tracing::debug!(round, "table not rendered yet");
    }
    false
}

async fn capture<P: DeckPage>(
    page: &mut P,
    deck: &DeckReference,
    t: &DriverTimings,
    debug_dir: Option<&Path>,
    notes: Vec<StepNote>,
) -> Result<RenderedPage, ScrapeError> {
    let html = bounded(t.nav_timeout, page.content())
        .await
        .map_err(|e| ScrapeError::NavigationError {
            url: deck.detail_url.clone(),
            reason: format!("could not read document: {e}"),
        })?;

    let source = resolve_deck_source(&anchor_hrefs(&Html::parse_document(&html)));

    if let Some(dir) = debug_dir {
        let path = dir.join(format!("{}.png", sanitize_deck_filename(&deck.id)));
        match bounded(t.nav_timeout, page.screenshot(&path)).await {
            Ok(()) => tracing::debug!(path = %path.display(), "screenshot saved"),
            Err(e) => tracing::warn!(deck = %deck.id, path = %path.display(), "screenshot failed: {e}"),
        }
    }

    Ok(RenderedPage { deck_id: deck.id.clone(), html, source, notes })
}

/* ---------------- waiting ---------------- */

/// Poll `exists(selector)` until it holds or `bound` elapses.
async fn wait_for<P: DeckPage>(page: &mut P, selector: &str, bound: Duration, poll: Duration) -> bool {
    let probe = async {
        loop {
            if page.exists(selector).await {
                return true;
            }
            sleep(poll).await;
        }
    };
    timeout(bound, probe).await.unwrap_or(false)
}

async fn bounded<T>(bound: Duration, op: impl Future<Output = Result<T, PageError>>) -> Result<T, PageError> {
    timeout(bound, op).await.unwrap_or(Err(PageError::Timeout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_labels_are_distinct() {
        use DriverState::*;
        let labels: std::collections::HashSet<_> =
            [Navigating, AwaitingTableControl, AwaitingTypeColumn, AwaitingTableContent, Captured]
                .iter()
                .map(DriverState::label)
                .collect();
        assert_eq!(labels.len(), 5);
    }
}
