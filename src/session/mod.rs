// src/session/mod.rs
//! Browser side of the pipeline.
//!
//! - `page`   – the [`DeckPage`] seam: the few operations the driver needs.
//! - `chrome` – [`ChromeSession`], a headless Chromium tab implementing it.
//! - `driver` – the per-deck state machine that walks a page from navigation
//!   to captured markup, skipping any UI step the page version lacks.

pub mod chrome;
pub mod driver;
pub mod page;

pub use chrome::ChromeSession;
pub use driver::{DriverState, render};
pub use page::{DeckPage, PageError};
