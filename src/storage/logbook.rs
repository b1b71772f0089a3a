//! Logbook storage: list and clear mission log entries.
//!
//! Entries are inserted only from inside a mover save transaction
//! (see [`insert_entry`]), never on their own.

use rusqlite::Connection;

use crate::model::{Action, LogEntry};

use super::{LogStore, Result, Storage, StorageError, parse_id, parse_ids, parse_timestamp};

impl LogStore for Storage {
    fn list_entries(&self) -> Result<Vec<LogEntry>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, mover_id, item_ids, action, timestamp FROM logs ORDER BY seq DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, mover_id, item_ids, action, timestamp) = row?;
            let action = Action::parse(&action)
                .ok_or_else(|| StorageError::Corrupt(format!("unknown log action: {action}")))?;
            entries.push(LogEntry {
                id: parse_id(&id, "log id")?,
                mover_id: parse_id(&mover_id, "log mover id")?,
                item_ids: parse_ids(&item_ids)?,
                action,
                timestamp: parse_timestamp(&timestamp, "log timestamp")?,
            });
        }

        // Stable: entries sharing a timestamp stay newest-inserted first.
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    fn clear_entries(&self) -> Result<usize> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM logs", [])?)
    }
}

/// Appends one entry using the caller's connection or transaction.
pub(super) fn insert_entry(conn: &Connection, entry: &LogEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO logs (id, mover_id, item_ids, action, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            entry.id.to_string(),
            entry.mover_id.to_string(),
            serde_json::to_string(&entry.item_ids)?,
            entry.action.as_str(),
            entry.timestamp.to_string(),
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("fleet.sqlite")).unwrap();
        (dir, storage)
    }

    fn sample_entry(action: Action, timestamp: Timestamp) -> LogEntry {
        LogEntry {
            id: Uuid::new_v4(),
            mover_id: Uuid::new_v4(),
            item_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
            action,
            timestamp,
        }
    }

    #[test]
    fn list_entries_empty() {
        let (_dir, storage) = test_storage();
        assert!(storage.list_entries().unwrap().is_empty());
    }

    #[test]
    fn list_entries_most_recent_first() {
        let (_dir, storage) = test_storage();
        let conn = storage.open().unwrap();

        let early = sample_entry(Action::Loading, Timestamp::new(1_000_000_000, 0).unwrap());
        let late = sample_entry(
            Action::StartingMission,
            Timestamp::new(2_000_000_000, 500).unwrap(),
        );

        // Insert the later one first to verify sorting by timestamp.
        insert_entry(&conn, &late).unwrap();
        insert_entry(&conn, &early).unwrap();

        assert_eq!(storage.list_entries().unwrap(), vec![late, early]);
    }

    #[test]
    fn same_timestamp_falls_back_to_insertion_order() {
        let (_dir, storage) = test_storage();
        let conn = storage.open().unwrap();
        let at = Timestamp::new(1_500_000_000, 0).unwrap();

        let first = sample_entry(Action::Loading, at);
        let second = sample_entry(Action::StartingMission, at);
        insert_entry(&conn, &first).unwrap();
        insert_entry(&conn, &second).unwrap();

        assert_eq!(storage.list_entries().unwrap(), vec![second, first]);
    }

    #[test]
    fn clear_entries_reports_count() {
        let (_dir, storage) = test_storage();
        let conn = storage.open().unwrap();
        insert_entry(&conn, &sample_entry(Action::Loading, Timestamp::now())).unwrap();
        insert_entry(&conn, &sample_entry(Action::EndingMission, Timestamp::now())).unwrap();

        assert_eq!(storage.clear_entries().unwrap(), 2);
        assert!(storage.list_entries().unwrap().is_empty());
    }
}
