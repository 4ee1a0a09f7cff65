// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

/// Upper bounds for every wait the session driver performs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverTimings {
    pub nav_timeout: Duration,
    pub nav_attempts: u32,
    pub table_control_wait: Duration,
    pub column_menu_wait: Duration,
    pub column_settle: Duration,
    pub table_content_wait: Duration,
    pub table_content_retries: u32,
    pub poll_interval: Duration,
}

impl Default for DriverTimings {
    fn default() -> Self {
        Self {
            nav_timeout: NAV_TIMEOUT,
            nav_attempts: NAV_ATTEMPTS,
            table_control_wait: TABLE_CONTROL_WAIT,
            column_menu_wait: COLUMN_MENU_WAIT,
            column_settle: COLUMN_SETTLE,
            table_content_wait: TABLE_CONTENT_WAIT,
            table_content_retries: TABLE_CONTENT_RETRIES,
            poll_interval: POLL_INTERVAL,
        }
    }
}

/// Pause between two decks: `pause_ms + rand(0..jitter_ms)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Politeness {
    pub pause_ms: u64,
    pub jitter_ms: u64,
}

impl Default for Politeness {
    fn default() -> Self {
        Self { pause_ms: REQUEST_PAUSE_MS, jitter_ms: JITTER_MS }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub commander_slug: String,
    pub deck_limit: usize,
    /// Per-deck files land here.
    pub output_dir: PathBuf,
    /// Combined file; `None` derives `<slug>_combined_decklists.<ext>`.
    pub combined: Option<PathBuf>,
    pub format: ExportFormat,
    /// Screenshots are only taken when set.
    pub debug_dir: Option<PathBuf>,
    pub headed: bool,
    pub site_root: String,
    pub json_root: String,
    pub timings: DriverTimings,
    pub politeness: Politeness,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            commander_slug: s!(DEFAULT_COMMANDER),
            deck_limit: DEFAULT_DECK_LIMIT,
            output_dir: PathBuf::from(DEFAULT_OUT_DIR),
            combined: None,
            format: ExportFormat::Csv,
            debug_dir: None,
            headed: false,
            site_root: s!(SITE_ROOT),
            json_root: s!(JSON_ROOT),
            timings: DriverTimings::default(),
            politeness: Politeness::default(),
        }
    }
}

impl RunOptions {
    pub fn metadata_url(&self) -> String {
        format!(
            "{}/pages/decks/{}/optimized.json",
            self.json_root.trim_end_matches('/'),
            self.commander_slug
        )
    }

    pub fn detail_url(&self, deck_id: &str) -> String {
        format!("{}/deckpreview/{}", self.site_root.trim_end_matches('/'), deck_id)
    }

    pub fn combined_path(&self) -> PathBuf {
        match &self.combined {
            Some(p) => p.clone(),
            None => PathBuf::from(format!(
                "{}{}.{}",
                self.commander_slug,
                COMBINED_SUFFIX,
                self.format.ext()
            )),
        }
    }

    /// Metadata sample sits next to the combined file.
    pub fn sample_path(&self) -> PathBuf {
        let file = format!("{}{}.{}", self.commander_slug, SAMPLE_SUFFIX, self.format.ext());
        match self.combined_path().parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(file),
            _ => PathBuf::from(file),
        }
    }
}
