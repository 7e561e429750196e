//! Shared test utilities.
//!
//! Sample data, service setup, and a store that fails writes on demand so rollback paths
//! can be exercised.

use crate::{
    config::{Defaults, EditNamePolicy},
    core::service::AdminService,
    errors::{Error, Result},
    models::{AdminSettings, Municipality, MunicipalityYieldData, YieldRecord},
    storage::{KeyValueStore, MemoryStore},
};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Routes tracing output to the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Two municipalities: `alpha` (green) and `beta` (blue).
pub fn sample_municipalities() -> Vec<Municipality> {
    vec![
        Municipality::new("alpha", "Alpha", "#4CAF50"),
        Municipality::new("beta", "Beta", "#2196F3"),
    ]
}

/// Three years of data for each sample municipality.
pub fn sample_yield_data() -> Vec<MunicipalityYieldData> {
    let series = |id: &str, yields: [f64; 3]| MunicipalityYieldData {
        municipality_id: id.to_string(),
        historical_data: yields
            .iter()
            .zip(2020..)
            .map(|(&yield_value, year)| YieldRecord { year, yield_value })
            .collect(),
        average_yield: (yields.iter().sum::<f64>() / 3.0 * 100.0).round() / 100.0,
    };
    vec![
        series("alpha", [0.5, 0.55, 0.6]),
        series("beta", [0.42, 0.4, 0.38]),
    ]
}

/// Defaults built from the sample data.
pub fn sample_defaults() -> Defaults {
    Defaults {
        settings: AdminSettings::default(),
        municipalities: sample_municipalities(),
        yield_data: sample_yield_data(),
    }
}

/// A service over a fresh [`MemoryStore`], plus a handle to that store.
pub async fn setup_service() -> Result<(AdminService, Arc<MemoryStore>)> {
    let store = Arc::new(MemoryStore::new());
    let service =
        AdminService::load(store.clone(), sample_defaults(), EditNamePolicy::Rename).await?;
    Ok((service, store))
}

/// A [`MemoryStore`] whose writes to selected keys fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: Mutex<HashSet<String>>,
}

impl FlakyStore {
    /// An empty store with no failing keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later `set`/`remove` on `key` fail.
    pub async fn fail_writes_to(&self, key: &str) {
        self.failing.lock().await.insert(key.to_string());
    }

    /// Clears every injected failure.
    pub async fn allow_all_writes(&self) {
        self.failing.lock().await.clear();
    }

    /// The stored value, bypassing failure injection.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.ok().flatten()
    }

    async fn check(&self, key: &str) -> Result<()> {
        if self.failing.lock().await.contains(key) {
            return Err(Error::Persistence {
                message: format!("injected failure writing '{key}'"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check(key).await?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.check(key).await?;
        self.inner.remove(key).await
    }
}
