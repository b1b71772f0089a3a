//! Mover storage: insert, load, conditional save, list, and clear.

use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior};
use uuid::Uuid;

use crate::model::{LogEntry, Mover, QuestState, Weight};

use super::{
    MoverStore, Result, Storage, StorageError, logbook::insert_entry, parse_id, parse_ids,
    parse_timestamp,
};

const COLUMNS: &str =
    "id, name, weight_limit, quest_state, completed_missions, carried_items, created_at";

impl MoverStore for Storage {
    fn insert_mover(&self, mover: &Mover) -> Result<()> {
        let conn = self.open()?;
        let result = conn.execute(
            "INSERT INTO movers
             (id, name, weight_limit, quest_state, completed_missions, carried_items, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                mover.id.to_string(),
                &mover.name,
                mover.weight_limit.get(),
                mover.state.as_str(),
                to_sql_count(mover.completed_missions)?,
                serde_json::to_string(&mover.carried_items)?,
                mover.created_at.to_string(),
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(StorageError::MoverAlreadyExists(mover.id)),
            Err(e) => Err(e.into()),
        }
    }

    fn load_mover(&self, id: Uuid) -> Result<Option<Mover>> {
        let conn = self.open()?;
        load_mover_row(&conn, id)
    }

    fn save_mover(&self, prior: &Mover, next: &Mover, entry: &LogEntry) -> Result<()> {
        let mut conn = self.open()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows = tx.execute(
            "UPDATE movers
             SET name = ?1, quest_state = ?2, completed_missions = ?3, carried_items = ?4
             WHERE id = ?5 AND quest_state = ?6 AND completed_missions = ?7",
            rusqlite::params![
                &next.name,
                next.state.as_str(),
                to_sql_count(next.completed_missions)?,
                serde_json::to_string(&next.carried_items)?,
                prior.id.to_string(),
                prior.state.as_str(),
                to_sql_count(prior.completed_missions)?,
            ],
        )?;
        if rows == 0 {
            // Dropping the transaction rolls it back.
            return Err(StorageError::Conflict(prior.id));
        }

        insert_entry(&tx, entry)?;
        tx.commit()?;

        tracing::debug!(mover = %next.id, state = %next.state, "mover saved");
        Ok(())
    }

    fn list_movers(&self) -> Result<Vec<Mover>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM movers ORDER BY completed_missions DESC, rowid ASC"
        ))?;
        let rows = stmt.query_map([], RawMover::from_row)?;
        let mut movers = Vec::new();
        for raw in rows {
            movers.push(raw?.into_mover()?);
        }
        Ok(movers)
    }

    fn clear_movers(&self) -> Result<usize> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM movers", [])?)
    }
}

/// Reads one mover by id from an open connection.
fn load_mover_row(conn: &Connection, id: Uuid) -> Result<Option<Mover>> {
    let raw = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM movers WHERE id = ?1"),
            [id.to_string()],
            RawMover::from_row,
        )
        .optional()?;
    raw.map(RawMover::into_mover).transpose()
}

/// Column values of a mover row, before validation.
struct RawMover {
    id: String,
    name: String,
    weight_limit: f64,
    quest_state: String,
    completed_missions: i64,
    carried_items: String,
    created_at: String,
}

impl RawMover {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            weight_limit: row.get(2)?,
            quest_state: row.get(3)?,
            completed_missions: row.get(4)?,
            carried_items: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn into_mover(self) -> Result<Mover> {
        let state = QuestState::parse(&self.quest_state).ok_or_else(|| {
            StorageError::Corrupt(format!("unknown quest state: {}", self.quest_state))
        })?;
        let weight_limit = Weight::try_from(self.weight_limit)
            .map_err(|e| StorageError::Corrupt(format!("invalid weight_limit: {e}")))?;
        let completed_missions = u64::try_from(self.completed_missions).map_err(|_| {
            StorageError::Corrupt(format!(
                "negative completed_missions: {}",
                self.completed_missions
            ))
        })?;

        Ok(Mover {
            id: parse_id(&self.id, "mover id")?,
            name: self.name,
            weight_limit,
            state,
            completed_missions,
            carried_items: parse_ids(&self.carried_items)?,
            created_at: parse_timestamp(&self.created_at, "created_at")?,
        })
    }
}

fn to_sql_count(n: u64) -> Result<i64> {
    i64::try_from(n).map_err(|_| StorageError::Corrupt(format!("mission count too large: {n}")))
}

pub(super) fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
