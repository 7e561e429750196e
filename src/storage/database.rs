//! `SeaORM`-backed key-value store.
//!
//! Each key maps to one row of the `admin_storage` table. Writes follow a
//! find-then-update-or-insert pattern so `updated_at` always reflects the last write.

use super::KeyValueStore;
use crate::{
    entities::{StorageEntry, storage_entry},
    errors::Result,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use tracing::{debug, instrument};

/// Key-value store over a `SeaORM` database connection.
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    /// Wraps an open connection. The `admin_storage` table must already exist
    /// (see [`crate::config::database::create_tables`]).
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl KeyValueStore for SeaOrmStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = StorageEntry::find_by_id(key.to_string())
            .one(&self.db)
            .await?;
        debug!(found = entry.is_some(), "Read storage key");
        Ok(entry.map(|e| e.value))
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().naive_utc();

        let existing = StorageEntry::find_by_id(key.to_string())
            .one(&self.db)
            .await?;

        if let Some(entry) = existing {
            let mut active_model: storage_entry::ActiveModel = entry.into();
            active_model.value = Set(value.to_string());
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_entry = storage_entry::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
            };
            new_entry.insert(&self.db).await?;
        }

        debug!("Wrote storage key");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<()> {
        let result = StorageEntry::delete_by_id(key.to_string())
            .exec(&self.db)
            .await?;
        debug!(rows = result.rows_affected, "Removed storage key");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_set_and_get_new_key() -> Result<()> {
        let store = SeaOrmStore::new(setup_test_db().await?);

        store.set("test_key_1", "test_value_1").await?;

        assert_eq!(
            store.get("test_key_1").await?,
            Some("test_value_1".to_string()),
            "Retrieved value should match the set value for a new key."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_set_updates_existing_key() -> Result<()> {
        let store = SeaOrmStore::new(setup_test_db().await?);

        store.set("test_key_update", "initial_value").await?;
        store.set("test_key_update", "updated_value").await?;

        assert_eq!(
            store.get("test_key_update").await?,
            Some("updated_value".to_string())
        );
        let rows = StorageEntry::find().all(store.connection()).await?;
        assert_eq!(rows.len(), 1, "Upsert must not duplicate rows");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_non_existent_key() -> Result<()> {
        let store = SeaOrmStore::new(setup_test_db().await?);
        assert!(store.get("this_key_does_not_exist").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_key() -> Result<()> {
        let store = SeaOrmStore::new(setup_test_db().await?);

        store.set("gone", "soon").await?;
        store.remove("gone").await?;
        assert!(store.get("gone").await?.is_none());

        // Removing twice is fine
        store.remove("gone").await?;
        Ok(())
    }
}
