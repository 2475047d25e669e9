//! Key-value persistence.
//!
//! All application state is serialized whole-object under a small fixed key
//! space; there is no schema versioning and no migration. Storage is a
//! best-effort collaborator: callers log a failed read or write and keep
//! going with their in-memory state.

mod database;
mod memory;

pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Ordered task collection.
pub const KEY_TASKS: &str = "tasks";
/// Daily aggregates, streaks and weekly data.
pub const KEY_ANALYTICS: &str = "analytics";
/// Timer configuration, whole object.
pub const KEY_TIMER_SETTINGS: &str = "timerSettings";
/// Dark-mode preference flag.
pub const KEY_DARK_MODE: &str = "darkMode";
/// Daily mood check-in reminder flag.
pub const KEY_DAILY_REMINDERS: &str = "dailyReminders";

/// Opaque key-value storage.
///
/// Values are whole serialized objects; partial-field writes do not exist
/// at this seam.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Returns `~/.config/flowlist[-dev]/` based on FLOWLIST_ENV.
///
/// Set FLOWLIST_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FLOWLIST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("flowlist-dev")
    } else {
        base_dir.join("flowlist")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// Read and deserialize a stored value. Any failure is logged and collapses
/// to `None`; the in-memory default takes over.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Option<T> {
    match storage.get(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, "unparsable stored value, falling back to defaults: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(key, "storage read failed, falling back to defaults: {e}");
            None
        }
    }
}

/// Serialize and persist a value. Failures are logged; the caller's
/// in-memory state stands either way.
pub(crate) fn write_json<T: serde::Serialize>(storage: &dyn Storage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => {
            if let Err(e) = storage.set(key, &json) {
                tracing::warn!(key, "storage write failed, keeping in-memory state: {e}");
            }
        }
        Err(e) => tracing::warn!(key, "serialization failed, keeping in-memory state: {e}"),
    }
}
