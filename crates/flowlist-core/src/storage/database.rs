//! SQLite-backed key-value storage.

use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, Storage};
use crate::error::StorageError;

/// SQLite database holding the key-value table.
///
/// Lives at `~/.config/flowlist/flowlist.db`; created on first open.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database in the data directory, creating file and schema
    /// if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("flowlist.db");
        let conn = Connection::open(&path)
            .map_err(|source| StorageError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (tests and ephemeral runs).
    ///
    /// # Errors
    /// Returns an error if the connection cannot be created.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl Storage for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get("tasks").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let db = Database::open_in_memory().unwrap();
        db.set("darkMode", "true").unwrap();
        assert_eq!(db.get("darkMode").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn set_overwrites_whole_value() {
        let db = Database::open_in_memory().unwrap();
        db.set("timerSettings", r#"{"workMinutes":25}"#).unwrap();
        db.set("timerSettings", r#"{"workMinutes":50}"#).unwrap();
        assert_eq!(
            db.get("timerSettings").unwrap().as_deref(),
            Some(r#"{"workMinutes":50}"#)
        );
    }

    #[test]
    fn remove_deletes_the_key() {
        let db = Database::open_in_memory().unwrap();
        db.set("tasks", "[]").unwrap();
        db.remove("tasks").unwrap();
        assert_eq!(db.get("tasks").unwrap(), None);
    }
}
