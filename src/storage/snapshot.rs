//! Record sink and JSON snapshot output
//!
//! The sink trait decouples the scanner from where reconciled records
//! end up. The bundled implementation writes one JSON document per run,
//! replaced atomically, which the `show` command reads back.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::ReconciledRecord;

/// Destination for one run's reconciled output
///
/// Implementations receive the ordered record sequence plus the
/// positions of new records so a presentation layer can highlight them.
pub trait RecordSink {
    /// Persist or forward the batch
    ///
    /// # Errors
    ///
    /// Returns an error when the batch cannot be delivered.
    fn accept(&self, records: &[ReconciledRecord], new_positions: &[usize]) -> anyhow::Result<()>;
}

/// One record as it appears in the snapshot document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub title: String,
    pub date: String,
    pub link: String,
    pub category: String,
    pub description: String,

    /// When this run extracted the record
    pub scraped_on: String,

    pub is_new: bool,
}

/// Full snapshot document written per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub press_releases: Vec<SnapshotRow>,

    /// Indices into `press_releases` of records new this run
    pub new_positions: Vec<usize>,

    pub generated_at: DateTime<Utc>,
}

/// Sink writing the whole run to a single JSON file
pub struct JsonSnapshot {
    path: PathBuf,
}

impl JsonSnapshot {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read a previously written snapshot
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing or not a snapshot.
    pub fn load(&self) -> anyhow::Result<Snapshot> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl RecordSink for JsonSnapshot {
    fn accept(&self, records: &[ReconciledRecord], new_positions: &[usize]) -> anyhow::Result<()> {
        let generated_at = Utc::now();
        let scraped_on = generated_at.format("%Y-%m-%d %H:%M:%S").to_string();

        let snapshot = Snapshot {
            press_releases: records
                .iter()
                .map(|r| SnapshotRow {
                    title: r.record.title.clone(),
                    date: r.record.date.clone(),
                    link: r.record.link.clone(),
                    category: r.record.category.clone(),
                    description: r.record.description.clone(),
                    scraped_on: scraped_on.clone(),
                    is_new: r.is_new,
                })
                .collect(),
            new_positions: new_positions.to_vec(),
            generated_at,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&snapshot)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        info!(records = records.len(), path = %self.path.display(), "snapshot written");
        Ok(())
    }
}
