//! Persistence between runs

pub mod known;
pub mod snapshot;

pub use known::KnownIds;
pub use snapshot::{JsonSnapshot, RecordSink, Snapshot, SnapshotRow};
