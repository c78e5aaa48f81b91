//! SQLite-backed record store.
//!
//! Every entity is kept as a JSON document in a single `records` table keyed
//! by `(kind, id)`. Time blocks additionally carry their start timestamp in
//! `starts_at` so week queries stay an indexed range scan.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use super::{data_dir, Record, RecordStore, StoreResult, Table};
use crate::error::StoreError;
use crate::schedule::{week_bounds, TimeBlock};

/// Timestamp layout stored in `starts_at`; sorts lexicographically.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// SQLite database for planner records.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at `~/.config/studyplan/studyplan.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> StoreResult<Self> {
        let dir = data_dir().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::open_at(dir.join("studyplan.db"))
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                seq        INTEGER PRIMARY KEY AUTOINCREMENT,
                kind       TEXT NOT NULL,
                id         TEXT NOT NULL,
                body       TEXT NOT NULL,
                starts_at  TEXT,
                UNIQUE(kind, id)
            );

            CREATE INDEX IF NOT EXISTS idx_records_kind_starts_at ON records(kind, starts_at);",
        )?;
        Ok(())
    }

    fn encode<T: Record>(item: &T) -> StoreResult<String> {
        serde_json::to_string(item).map_err(|e| StoreError::Corrupt {
            kind: T::KIND,
            id: item.id().to_string(),
            message: e.to_string(),
        })
    }

    fn decode<T: Record>(id: &str, body: &str) -> StoreResult<T> {
        serde_json::from_str(body).map_err(|e| StoreError::Corrupt {
            kind: T::KIND,
            id: id.to_string(),
            message: e.to_string(),
        })
    }

    fn insert<T: Record>(conn: &Connection, item: &T) -> StoreResult<()> {
        conn.execute(
            "INSERT INTO records (kind, id, body, starts_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(kind, id) DO UPDATE SET body = excluded.body, starts_at = excluded.starts_at",
            params![
                T::KIND,
                item.id(),
                Self::encode(item)?,
                item.starts_at().map(format_timestamp),
            ],
        )?;
        Ok(())
    }
}

impl<T: Record> Table<T> for SqliteStore {
    fn get_all(&self) -> StoreResult<Vec<T>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM records WHERE kind = ?1 ORDER BY seq")?;
        let rows = stmt.query_map(params![T::KIND], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut items = Vec::new();
        for row in rows {
            let (id, body) = row?;
            items.push(Self::decode(&id, &body)?);
        }
        Ok(items)
    }

    fn add(&mut self, item: T) -> StoreResult<()> {
        Self::insert(&self.conn, &item)
    }

    fn update(&mut self, item: T) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE records SET body = ?3, starts_at = ?4 WHERE kind = ?1 AND id = ?2",
            params![
                T::KIND,
                item.id(),
                Self::encode(&item)?,
                item.starts_at().map(format_timestamp),
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: T::KIND,
                id: item.id().to_string(),
            });
        }
        Ok(())
    }

    fn remove(&mut self, id: &str) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM records WHERE kind = ?1 AND id = ?2",
            params![T::KIND, id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

impl RecordStore for SqliteStore {
    fn blocks_by_week(&self, week_start: NaiveDate) -> StoreResult<Vec<TimeBlock>> {
        let (from, to) = week_bounds(week_start);
        let mut stmt = self.conn.prepare(
            "SELECT id, body FROM records
             WHERE kind = ?1 AND starts_at >= ?2 AND starts_at < ?3
             ORDER BY starts_at, seq",
        )?;
        let rows = stmt.query_map(
            params![TimeBlock::KIND, format_timestamp(from), format_timestamp(to)],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )?;

        let mut blocks = Vec::new();
        for row in rows {
            let (id, body) = row?;
            blocks.push(Self::decode(&id, &body)?);
        }
        Ok(blocks)
    }

    fn replace_week_blocks(&mut self, week_start: NaiveDate, blocks: &[TimeBlock]) -> StoreResult<()> {
        let (from, to) = week_bounds(week_start);
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM records WHERE kind = ?1 AND starts_at >= ?2 AND starts_at < ?3",
            params![TimeBlock::KIND, format_timestamp(from), format_timestamp(to)],
        )?;
        for block in blocks {
            Self::insert(&tx, block)?;
        }
        tx.commit()?;
        Ok(())
    }
}
