//! The audit log: one entry per committed transition.

use jiff::Timestamp;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Action, LogEntry, Mover};
use crate::storage::LogStore;

/// Read and reset access to the mission log.
///
/// Writing happens through [`entry`] plus a mover save, so an entry exists
/// exactly when its transition was committed.
pub struct AuditLog<'a, S> {
    store: &'a S,
}

impl<'a, S: LogStore> AuditLog<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All entries, most recent first.
    pub fn entries(&self) -> Result<Vec<LogEntry>> {
        Ok(self.store.list_entries()?)
    }

    /// Administrative reset. Returns how many entries were removed.
    pub fn clear(&self) -> Result<usize> {
        let removed = self.store.clear_entries()?;
        tracing::info!(removed, "mission log cleared");
        Ok(removed)
    }
}

/// Builds the entry recording `action` on `mover`, snapshotting `items`.
pub fn entry(mover: &Mover, action: Action, items: &[Uuid]) -> LogEntry {
    LogEntry {
        id: Uuid::new_v4(),
        mover_id: mover.id,
        item_ids: items.to_vec(),
        action,
        timestamp: Timestamp::now(),
    }
}
