//! Persistence for movers, items, and the mission log.
//!
//! The core depends only on the three repository traits below. [`Storage`]
//! implements all of them on a single `SQLite` file:
//!
//! ```text
//! ~/.fleet/fleet.sqlite
//!   movers   # one row per mover, carried items as a JSON array
//!   items    # cargo catalog
//!   logs     # append-only mission log
//! ```
//!
//! Every operation opens its own connection, so a `Storage` can be shared
//! across threads freely. Writers serialize through `BEGIN IMMEDIATE`
//! transactions and wait on the busy timeout rather than failing.

mod item;
mod logbook;
mod mover;

use std::{fs, io, path::PathBuf, time::Duration};

use rusqlite::Connection;
use uuid::Uuid;

use crate::model::{Item, LogEntry, Mover};

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS movers (
        id                 TEXT PRIMARY KEY,
        name               TEXT NOT NULL,
        weight_limit       REAL NOT NULL CHECK (weight_limit > 0),
        quest_state        TEXT NOT NULL,
        completed_missions INTEGER NOT NULL DEFAULT 0,
        carried_items      TEXT NOT NULL DEFAULT '[]',
        created_at         TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS items (
        id         TEXT PRIMARY KEY,
        name       TEXT NOT NULL,
        weight     REAL NOT NULL CHECK (weight > 0),
        created_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS logs (
        seq       INTEGER PRIMARY KEY AUTOINCREMENT,
        id        TEXT NOT NULL UNIQUE,
        mover_id  TEXT NOT NULL,
        item_ids  TEXT NOT NULL,
        action    TEXT NOT NULL,
        timestamp TEXT NOT NULL
    );
";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The mover changed between read and commit; nothing was written.
    #[error("mover {0} was modified concurrently")]
    Conflict(Uuid),

    #[error("mover already exists: {0}")]
    MoverAlreadyExists(Uuid),

    #[error("item already exists: {0}")]
    ItemAlreadyExists(Uuid),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Mover records.
pub trait MoverStore {
    /// Stores a new mover.
    fn insert_mover(&self, mover: &Mover) -> Result<()>;

    /// Looks up a mover by id. `None` if there is no such mover.
    fn load_mover(&self, id: Uuid) -> Result<Option<Mover>>;

    /// Replaces `prior` with `next` and appends `entry` to the log, atomically.
    ///
    /// The replace only happens if the stored mover still has `prior`'s state
    /// and mission count. Otherwise nothing is written and
    /// [`StorageError::Conflict`] is returned.
    fn save_mover(&self, prior: &Mover, next: &Mover, entry: &LogEntry) -> Result<()>;

    /// All movers, most completed missions first.
    fn list_movers(&self) -> Result<Vec<Mover>>;

    /// Deletes every mover, returning how many were removed.
    fn clear_movers(&self) -> Result<usize>;
}

/// The cargo catalog.
pub trait ItemStore {
    fn insert_item(&self, item: &Item) -> Result<()>;

    /// Looks up the items whose ids are in `ids`. Unknown ids are skipped.
    fn find_items(&self, ids: &[Uuid]) -> Result<Vec<Item>>;

    /// All items, in creation order.
    fn list_items(&self) -> Result<Vec<Item>>;

    fn clear_items(&self) -> Result<usize>;
}

/// The mission log.
///
/// There is no standalone append: entries are only ever written by
/// [`MoverStore::save_mover`], together with the transition they record.
pub trait LogStore {
    /// All entries, most recent first.
    fn list_entries(&self) -> Result<Vec<LogEntry>>;

    fn clear_entries(&self) -> Result<usize>;
}

/// Local `SQLite`-backed storage for the whole fleet.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    ///
    /// The parent directory is created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let storage = Self { path };
        storage.open()?.execute_batch(SCHEMA)?;
        tracing::debug!(path = %storage.path.display(), "storage ready");
        Ok(storage)
    }

    /// Returns the default database path: `~/.fleet/fleet.sqlite`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".fleet").join("fleet.sqlite"))
    }

    fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}

/// Parses a stored UUID column.
fn parse_id(s: &str, what: &str) -> Result<Uuid> {
    s.parse::<Uuid>()
        .map_err(|e| StorageError::Corrupt(format!("invalid {what}: {e}")))
}

/// Parses a stored timestamp column.
fn parse_timestamp(s: &str, what: &str) -> Result<jiff::Timestamp> {
    s.parse::<jiff::Timestamp>()
        .map_err(|e| StorageError::Corrupt(format!("invalid {what}: {e}")))
}

/// Parses a JSON array of UUIDs, as stored for carried and logged items.
fn parse_ids(s: &str) -> Result<Vec<Uuid>> {
    Ok(serde_json::from_str(s)?)
}
