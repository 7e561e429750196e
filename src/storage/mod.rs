//! Durable key-value storage used by the admin service.
//!
//! The service never assumes multi-key transactions: every key is read, written, or removed
//! on its own, and the service sequences writes and compensates on partial failure.

use crate::errors::Result;
use async_trait::async_trait;

/// `SeaORM`-backed store persisting each key as one row
pub mod database;
/// Process-local store for tests and embedding
pub mod memory;

pub use database::SeaOrmStore;
pub use memory::MemoryStore;

/// Storage key holding the serialized `AdminSettings`
pub const SETTINGS_KEY: &str = "anilytics_admin_settings";
/// Storage key holding the active municipality list
pub const MUNICIPALITIES_KEY: &str = "anilytics_regions_data";
/// Storage key holding the per-municipality yield datasets
pub const YIELD_DATA_KEY: &str = "anilytics_yield_data";
/// Storage key holding the soft-delete ledger
pub const DELETED_KEY: &str = "anilytics_deleted_regions";
/// Storage key holding the backup ledger
pub const BACKUP_KEY: &str = "anilytics_backup";

/// A string-keyed store of serialized values.
///
/// Each call either completes or fails with [`crate::errors::Error::Persistence`].
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
