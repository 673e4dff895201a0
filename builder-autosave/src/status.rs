//! Observable auto-save state.

use serde::Serialize;

/// Where the controller is in its save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// Nothing pending.
    Idle,
    /// An attempt is running.
    Saving,
    /// The last attempt succeeded; shown briefly before `Idle`.
    Saved,
    /// An attempt failed and a retry is scheduled.
    Retrying,
    /// Retries are exhausted.
    Error,
    /// Connectivity is down; changes are queued.
    Offline,
}

impl std::fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Saving => "saving",
            Self::Saved => "saved",
            Self::Retrying => "retrying",
            Self::Error => "error",
            Self::Offline => "offline",
        };
        f.write_str(s)
    }
}

/// Snapshot of the controller's state, published on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSaveState {
    /// Current status.
    pub status: SaveStatus,
    /// Whether the host reports connectivity.
    pub is_online: bool,
    /// Whether saving is enabled.
    pub enabled: bool,
    /// Milliseconds since the Unix epoch of the last successful save.
    pub last_saved_at: Option<u64>,
    /// Failed attempts in the current retry sequence.
    pub retry_count: u32,
    /// Message of the last failure, cleared on success.
    pub error: Option<String>,
    /// Successful saves since start.
    pub save_count: u64,
    /// Whether the latest snapshot differs from the last saved one.
    pub has_unsaved_changes: bool,
}

impl AutoSaveState {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            status: SaveStatus::Idle,
            is_online: true,
            enabled,
            last_saved_at: None,
            retry_count: 0,
            error: None,
            save_count: 0,
            has_unsaved_changes: false,
        }
    }
}

/// How a [`flush`](crate::AutoSaveHandle::flush) ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Unsaved data was written.
    Saved,
    /// The latest snapshot was already saved.
    NothingToSave,
    /// The save failed after exhausting retries.
    Failed(String),
    /// The controller is offline; data stays queued.
    Offline,
    /// Saving is disabled.
    Disabled,
    /// The controller stopped before the save settled.
    Cancelled,
}
