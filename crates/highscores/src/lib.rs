//! High-score table - sorted insertion into a fixed-size list
//!
//! The table is kept in descending score order and never holds more than
//! [`CAPACITY`] entries. Storage is the host's business: this crate only
//! converts tables to and from JSON.
//!
//! ```
//! use tetris_max_highscores::{HighScoreEntry, HighScoreTable};
//!
//! let mut table = HighScoreTable::new();
//! assert_eq!(table.qualifies(500), Some(0));
//! table.insert(HighScoreEntry::new("ada", 500, 4, "2024-01-01"));
//! table.insert(HighScoreEntry::new("bob", 900, 8, "2024-01-02"));
//! assert_eq!(table.entries()[0].name, "bob");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of entries kept
pub const CAPACITY: usize = 10;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("table holds {0} entries, capacity is {cap}", cap = CAPACITY)]
    Capacity(usize),
}

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    /// Lines cleared
    pub rows: u32,
    /// Free-form date string supplied by the host
    pub date: String,
}

impl HighScoreEntry {
    pub fn new(name: impl Into<String>, score: u32, rows: u32, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score,
            rows,
            date: date.into(),
        }
    }
}

/// Entries ordered by descending score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from entries in any order.
    ///
    /// Equal scores keep their given order.
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Result<Self, HighScoreError> {
        if entries.len() > CAPACITY {
            return Err(HighScoreError::Capacity(entries.len()));
        }
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index a score would be inserted at, or `None` if it does not make the
    /// table. A score must beat an entry to go above it.
    pub fn qualifies(&self, score: u32) -> Option<usize> {
        match self.entries.iter().position(|e| score > e.score) {
            Some(index) => Some(index),
            None if self.entries.len() < CAPACITY => Some(self.entries.len()),
            None => None,
        }
    }

    /// Insert an entry, pushing lower entries down and dropping the overflow.
    ///
    /// Returns the index it landed at, or `None` if it did not qualify.
    pub fn insert(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let index = self.qualifies(entry.score)?;
        self.entries.insert(index, entry);
        self.entries.truncate(CAPACITY);
        Some(index)
    }

    pub fn from_json(s: &str) -> Result<Self, HighScoreError> {
        let entries: Vec<HighScoreEntry> = serde_json::from_str(s)?;
        Self::from_entries(entries)
    }

    pub fn to_json(&self) -> Result<String, HighScoreError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}
