//! Storage entry entity - one row per durable key.
//!
//! The admin service treats this table as a plain key-value store: each key holds one
//! JSON-serialized collection (settings, municipalities, yield data, deleted ledger,
//! backups), replaced wholesale on every write.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_storage")]
pub struct Model {
    /// Storage key (e.g., `"anilytics_admin_settings"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized value
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTime,
}

/// `StorageEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
