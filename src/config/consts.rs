// src/config/consts.rs
use std::time::Duration;

// Net config
pub const SITE_ROOT: &str = "https://edhrec.com";
pub const JSON_ROOT: &str = "https://json.edhrec.com";
pub const USER_AGENT: &str = "Mozilla/5.0";
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// Defaults
pub const DEFAULT_COMMANDER: &str = "ojer-axonil-deepest-might";
pub const DEFAULT_DECK_LIMIT: usize = 10;
pub const DEFAULT_OUT_DIR: &str = "decklists_html";
pub const DEFAULT_LOG_FILE: &str = ".store/debug.log";
pub const COMBINED_SUFFIX: &str = "_combined_decklists";
pub const SAMPLE_SUFFIX: &str = "_deck_sample";

// Session driver
pub const NAV_TIMEOUT: Duration = Duration::from_secs(90);
pub const NAV_ATTEMPTS: u32 = 2;
pub const TABLE_CONTROL_WAIT: Duration = Duration::from_secs(5);
pub const COLUMN_MENU_WAIT: Duration = Duration::from_secs(2);
pub const COLUMN_SETTLE: Duration = Duration::from_secs(1);
pub const TABLE_CONTENT_WAIT: Duration = Duration::from_secs(20);
pub const TABLE_CONTENT_RETRIES: u32 = 1;
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

// Selectors on the deck preview page
pub const TABLE_VIEW_BUTTON: &str = r#"button.nav-link[aria-controls*="table"]"#;
pub const COLUMN_MENU_TOGGLE: &str = "button#dropdown-item-button.dropdown-toggle";
pub const COLUMN_MENU_ITEM: &str = "button.dropdown-item";
pub const TYPE_COLUMN_LABEL: &str = "Type";
pub const TABLE_SELECTOR: &str = "table";

// Deck source
pub const SOURCE_DOMAINS: &[&str] = &["moxfield.com", "archidekt.com", "tappedout.net"];
pub const UNKNOWN_SOURCE: &str = "Unknown Source";
pub const UNKNOWN_CATEGORY: &str = "Unknown";

// Politeness between decks
pub const REQUEST_PAUSE_MS: u64 = 1_500;
pub const JITTER_MS: u64 = 1_000; // extra 0..1000 ms
