// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use edh_scrape::model::DeckReference;
use edh_scrape::session::{DeckPage, PageError};

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("edh_it_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

pub fn deck(id: &str) -> DeckReference {
    DeckReference {
        id: id.to_string(),
        detail_url: format!("https://edhrec.com/deckpreview/{id}"),
        metadata: BTreeMap::new(),
    }
}

/// What one `goto` call does.
#[derive(Clone, Debug)]
pub enum Goto {
    Load,
    /// Never resolves; the caller's bound decides.
    Hang,
    Fail(String),
}

/// Scripted stand-in for a browser tab.
#[derive(Default)]
pub struct FakePage {
    /// Selectors that match from the first probe on.
    pub present: HashSet<String>,
    /// Per-URL `goto` script; an exhausted or missing script loads.
    pub script: HashMap<String, VecDeque<Goto>>,
    /// Per-URL document returned by `content`.
    pub documents: HashMap<String, String>,
    pub menu_labels: Vec<String>,
    pub content_fails: bool,

    pub current: Option<String>,
    pub gotos: Vec<String>,
    pub clicks: Vec<String>,
    pub probes: HashMap<String, usize>,
    pub screenshots: Vec<PathBuf>,
}

impl FakePage {
    /// A page version with every control and a table.
    pub fn full_ui() -> Self {
        let mut page = FakePage::default();
        for sel in [
            edh_scrape::config::consts::TABLE_VIEW_BUTTON,
            edh_scrape::config::consts::COLUMN_MENU_TOGGLE,
            edh_scrape::config::consts::COLUMN_MENU_ITEM,
            edh_scrape::config::consts::TABLE_SELECTOR,
        ] {
            page.present.insert(sel.to_string());
        }
        page.menu_labels = vec!["Name".into(), "Type".into(), "Price".into()];
        page
    }

    pub fn with_document(mut self, deck: &DeckReference, html: &str) -> Self {
        self.documents.insert(deck.detail_url.clone(), html.to_string());
        self
    }

    pub fn with_script(mut self, deck: &DeckReference, steps: &[Goto]) -> Self {
        self.script.insert(deck.detail_url.clone(), steps.iter().cloned().collect());
        self
    }

    pub fn probes_of(&self, selector: &str) -> usize {
        self.probes.get(selector).copied().unwrap_or(0)
    }
}

impl DeckPage for FakePage {
    async fn goto(&mut self, url: &str) -> Result<(), PageError> {
        self.gotos.push(url.to_string());
        let step = self.script.get_mut(url).and_then(VecDeque::pop_front).unwrap_or(Goto::Load);
        match step {
            Goto::Load => {
                self.current = Some(url.to_string());
                Ok(())
            }
            Goto::Hang => std::future::pending().await,
            Goto::Fail(reason) => Err(PageError::Failed(reason)),
        }
    }

    async fn exists(&mut self, selector: &str) -> bool {
        *self.probes.entry(selector.to_string()).or_insert(0) += 1;
        self.present.contains(selector)
    }

    async fn click(&mut self, selector: &str) -> Result<(), PageError> {
        if !self.present.contains(selector) {
            return Err(PageError::NotFound(selector.to_string()));
        }
        self.clicks.push(selector.to_string());
        Ok(())
    }

    async fn labels(&mut self, _selector: &str) -> Result<Vec<String>, PageError> {
        Ok(self.menu_labels.clone())
    }

    async fn click_nth(&mut self, selector: &str, index: usize) -> Result<(), PageError> {
        if index >= self.menu_labels.len() {
            return Err(PageError::NotFound(format!("{selector}[{index}]")));
        }
        self.clicks.push(format!("{selector}#{index}"));
        Ok(())
    }

    async fn content(&mut self) -> Result<String, PageError> {
        if self.content_fails {
            return Err(PageError::Failed("target closed".into()));
        }
        let url = self.current.clone().unwrap_or_default();
        Ok(self.documents.get(&url).cloned().unwrap_or_else(|| "<html><body></body></html>".into()))
    }

    async fn screenshot(&mut self, path: &Path) -> Result<(), PageError> {
        self.screenshots.push(path.to_path_buf());
        Ok(())
    }
}

/// A deck page with two categorized tables and a Moxfield link.
pub const DECK_PAGE: &str = r#"
<html><body>
  <h1>Ojer Axonil Burn</h1>
  <a href="https://www.moxfield.com/decks/abc">View on Moxfield</a>
  <h3>Instants</h3>
  <table>
    <tr><th>Count</th><th>Name</th><th>Type</th><th>Price</th></tr>
    <tr><td>×2</td><td><a href="/cards/lightning-bolt">Lightning Bolt</a></td><td>Instant</td><td>$0.50</td></tr>
  </table>
  <h3>Artifacts</h3>
  <table>
    <tr><th>Name</th><th>CMC</th><th>Price</th></tr>
    <tr><td>Sol Ring</td><td>1</td><td>$1.00</td></tr>
    <tr><td>Arcane Signet</td><td>2</td><td>$0.80</td></tr>
  </table>
</body></html>
"#;
