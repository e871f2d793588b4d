//! Key-value persistence port.
//!
//! Stores serialize their whole state into one string value per key and hand
//! it to a [`Storage`]. Production uses [`SqliteStorage`]; tests use
//! an in-memory fake that records every call.

#[cfg(test)]
mod memory;
mod schema;
mod sqlite;

use anyhow::Result;

#[cfg(test)]
pub(crate) use memory::{MemoryStorage, StorageCall};
pub(crate) use sqlite::SqliteStorage;

pub(crate) trait Storage {
    /// Returns `Ok(None)` when nothing has been stored under `key`.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}
