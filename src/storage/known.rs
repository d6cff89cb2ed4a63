//! Persistent store of previously seen press-release identifiers
//!
//! The set lives in a small JSON file. Loading is tolerant: a missing or
//! corrupt file starts an empty set instead of failing the run, since a
//! lost set only means known records are re-reported once. Saving writes
//! to a temp file and renames so a crash mid-write never truncates the
//! existing file.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Identifier set carried between runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownIds {
    /// Canonical press-release links seen in any previous run
    identifiers: HashSet<String>,

    /// When the set was last written
    updated_at: DateTime<Utc>,

    #[serde(skip)]
    path: PathBuf,
}

impl KnownIds {
    /// Load the set from disk, starting empty when nothing usable exists
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let mut loaded = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(ids) => {
                    debug!(count = ids.identifiers.len(), path = %path.display(), "known identifiers loaded");
                    ids
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "known-identifier file unreadable, starting empty");
                    Self::empty()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "no known-identifier file, starting empty");
                Self::empty()
            }
        };

        loaded.path = path;
        loaded
    }

    fn empty() -> Self {
        Self {
            identifiers: HashSet::new(),
            updated_at: Utc::now(),
            path: PathBuf::new(),
        }
    }

    /// Persist the set atomically
    ///
    /// # Errors
    ///
    /// Returns an error when the file or its parent directory cannot be
    /// written.
    pub fn save(&mut self) -> anyhow::Result<()> {
        self.updated_at = Utc::now();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(count = self.identifiers.len(), path = %self.path.display(), "known identifiers saved");
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    /// Merge a batch of identifiers into the set
    pub fn insert_all<I, S>(&mut self, identifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifiers.extend(identifiers.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Borrow the underlying set for reconciliation
    #[must_use]
    pub fn as_set(&self) -> &HashSet<String> {
        &self.identifiers
    }
}

impl Default for KnownIds {
    fn default() -> Self {
        Self::empty()
    }
}
