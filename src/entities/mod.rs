//! Entity module - SeaORM entity definitions for the database.
//! The admin data lives in a single key-value table; each key holds one serialized collection.

/// Key-value rows backing the admin storage keys
pub mod storage_entry;

pub use storage_entry::{
    Column as StorageEntryColumn, Entity as StorageEntry, Model as StorageEntryModel,
};
