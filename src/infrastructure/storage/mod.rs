//! Key-Value Storage
//!
//! Small string key-value stores used to persist the session across
//! restarts.
//!
//! - **JsonFileStore**: JSON file on disk
//! - **MemoryStore**: process-local map, for tests and ephemeral sessions

mod file_store;
mod memory_store;

pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;

use crate::shared::error::ClientError;

/// String key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;

    /// Store a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), ClientError>;
}
