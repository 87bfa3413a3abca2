//! Append-only journal log.
//!
//! Journal entries are appended to a JSONL (JSON Lines) file with file locking
//! to ensure safe concurrent access. Re-recording a date appends a new line;
//! readers fold the lines into one entry per date.

use crate::{JournalEntry, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Journal sink trait for persisting entries
pub trait JournalSink {
    fn append(&mut self, entry: &JournalEntry) -> Result<()>;
}

/// JSONL-based journal with file locking
pub struct JsonlJournal {
    path: PathBuf,
}

impl JsonlJournal {
    /// Create a new JSONL journal for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl JournalSink for JsonlJournal {
    fn append(&mut self, entry: &JournalEntry) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended journal entry {} for {}", entry.id, entry.date);
        Ok(())
    }
}

/// Read every line of a journal file, oldest first
///
/// Malformed lines are logged and skipped.
pub fn read_entries(path: &Path) -> Result<Vec<JournalEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.split(b'\n').enumerate() {
        let line = match String::from_utf8(line_result?) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Skipping non-UTF-8 journal line {}: {}", line_num + 1, e);
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<JournalEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Failed to parse journal entry at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} journal lines", entries.len());
    Ok(entries)
}

/// Fold log lines into one entry per date, sorted by date
///
/// A later line for the same date replaces symptoms and notes, and replaces
/// the mood only when it records one. The first line's id is kept.
pub fn latest_by_date(entries: Vec<JournalEntry>) -> Vec<JournalEntry> {
    let mut by_date: BTreeMap<NaiveDate, JournalEntry> = BTreeMap::new();

    for entry in entries {
        match by_date.get_mut(&entry.date) {
            Some(existing) => {
                if entry.mood.is_some() {
                    existing.mood = entry.mood;
                }
                existing.symptoms = entry.symptoms;
                existing.notes = entry.notes;
            }
            None => {
                by_date.insert(entry.date, entry);
            }
        }
    }

    by_date.into_values().collect()
}

/// Load the journal with one entry per date
pub fn load_journal(path: &Path) -> Result<Vec<JournalEntry>> {
    let entries = latest_by_date(read_entries(path)?);
    tracing::info!("Loaded {} journal days", entries.len());
    Ok(entries)
}

/// The folded entry for a single date, if any
pub fn entry_for_date(path: &Path, date: NaiveDate) -> Result<Option<JournalEntry>> {
    Ok(load_journal(path)?.into_iter().find(|e| e.date == date))
}

/// Remove the journal file, returning whether one existed
pub fn remove_journal(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::info!("Removed journal {:?}", path);
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
