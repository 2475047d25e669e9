pub mod config;
pub mod export;
pub mod remind;
pub mod stats;
pub mod task;
pub mod timer;

use std::sync::Arc;

use flowlist_core::{Database, Storage};

/// Open the shared key-value database every command works against.
pub fn open_storage() -> Result<Arc<dyn Storage>, Box<dyn std::error::Error>> {
    Ok(Arc::new(Database::open()?))
}
