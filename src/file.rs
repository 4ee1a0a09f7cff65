// src/file.rs

use std::{
    collections::{BTreeSet, HashMap},
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use crate::config::options::ExportFormat;
use crate::core::sanitize::sanitize_deck_filename;
use crate::error::ScrapeError;
use crate::export::{self, Column};
use crate::model::{CardRecord, DeckReference};
use crate::store::DeckDataset;

pub fn ensure_directory(dir: &Path) -> Result<(), ScrapeError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::Io(std::io::Error::other(format!(
            "path exists but is not a directory: {}",
            dir.display()
        ))));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), ScrapeError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, ScrapeError> {
    ensure_parent(path)?;
    Ok(BufWriter::new(File::create(path)?)) // truncate/overwrite
}

/// Duplicate handling **only within this run**:
/// first `<stem>.ext`, then `<stem> (2).ext`, `<stem> (3).ext`, …
pub fn resolve_deck_filename(
    dir: &Path,
    stem: &str,
    seen_names: &mut HashMap<String, usize>,
    ext: &str,
) -> PathBuf {
    let count = seen_names.entry(s!(stem)).or_insert(0);
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };
    *count += 1;
    dir.join(filename)
}

/// One deck's records with the full, stable column list.
pub fn write_deck_file(
    dir: &Path,
    deck_id: &str,
    records: &[CardRecord],
    format: ExportFormat,
    seen_names: &mut HashMap<String, usize>,
) -> Result<PathBuf, ScrapeError> {
    let path = resolve_deck_filename(dir, &sanitize_deck_filename(deck_id), seen_names, format.ext());
    export::write_records(create(&path)?, &Column::ALL, records, format)?;
    Ok(path)
}

/// The combined dataset with its populated column superset. Written even when empty.
pub fn write_combined(path: &Path, dataset: &DeckDataset, format: ExportFormat) -> Result<PathBuf, ScrapeError> {
    export::write_records(create(path)?, &dataset.columns(), dataset.records(), format)?;
    Ok(path.to_path_buf())
}

/// Located decks: `deck_id, detail_url`, then the sorted union of metadata keys.
pub fn write_deck_sample(path: &Path, decks: &[DeckReference], format: ExportFormat) -> Result<PathBuf, ScrapeError> {
    let keys: BTreeSet<&str> = decks
        .iter()
        .flat_map(|d| d.metadata.keys().map(String::as_str))
        .collect();

    let mut headers = vec![s!("deck_id"), s!("detail_url")];
    headers.extend(keys.iter().map(|k| s!(*k)));

    let rows: Vec<Vec<String>> = decks
        .iter()
        .map(|d| {
            let mut row = vec![d.id.clone(), d.detail_url.clone()];
            row.extend(keys.iter().map(|k| d.metadata.get(*k).cloned().unwrap_or_default()));
            row
        })
        .collect();

    export::write_table(create(path)?, &headers, &rows, format)?;
    Ok(path.to_path_buf())
}
