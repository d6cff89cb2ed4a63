//! Single-slot run tracking
//!
//! At most one scan runs at a time. The tracker is a small state machine
//! that callers consult before starting a run and update when it ends,
//! so overlap attempts are rejected up front instead of racing.

use std::sync::{Mutex, PoisonError};

use crate::error::ScanError;
use crate::models::ScanReport;

/// Lifecycle of the single scan slot
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    /// No scan has run yet
    Idle,

    /// A scan is in progress
    Running,

    /// The last scan finished and left its report
    Completed(ScanReport),

    /// The last scan failed with this message
    Failed(String),
}

/// Thread-safe tracker for the single scan slot
#[derive(Debug, Default)]
pub struct RunTracker {
    state: Mutex<Option<RunState>>,
}

impl RunTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the scan slot
    ///
    /// # Errors
    ///
    /// Returns `ScanError::AlreadyRunning` when a scan holds the slot.
    pub fn try_begin(&self) -> Result<(), ScanError> {
        let mut state = self.lock();
        if matches!(state.as_ref(), Some(RunState::Running)) {
            return Err(ScanError::AlreadyRunning);
        }
        *state = Some(RunState::Running);
        Ok(())
    }

    /// Release the slot with a finished report
    pub fn complete(&self, report: ScanReport) {
        *self.lock() = Some(RunState::Completed(report));
    }

    /// Release the slot with a failure message
    pub fn fail(&self, message: impl Into<String>) {
        *self.lock() = Some(RunState::Failed(message.into()));
    }

    /// Current state of the slot
    #[must_use]
    pub fn snapshot(&self) -> RunState {
        self.lock().clone().unwrap_or(RunState::Idle)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.snapshot(), RunState::Running)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<RunState>> {
        // A panicked holder leaves plain data behind; keep going with it
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
