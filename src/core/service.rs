//! Admin Facade - the single entry point for admin data.
//!
//! `AdminService` owns settings, the Entity Store, the soft-delete ledger, and the backup
//! ledger behind one async mutex. Each mutating operation holds the lock for its whole
//! read-modify-persist cycle:
//!
//! 1. compute the next state from a copy of the current one,
//! 2. write every affected storage key in sequence,
//! 3. swap the next state in.
//!
//! When a write fails partway, the keys already written are re-written with their previous
//! values and the in-memory state is left untouched, so memory is never ahead of storage.

use crate::{
    config::{Defaults, EditNamePolicy},
    errors::{Error, Result},
    models::{
        AdminSettings, BackupSnapshot, DeletedMunicipality, Municipality,
        MunicipalityYieldData, SettingsPatch,
    },
    storage::{
        BACKUP_KEY, DELETED_KEY, KeyValueStore, MUNICIPALITIES_KEY, SETTINGS_KEY, YIELD_DATA_KEY,
    },
};
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::{
    backup::BackupLedger,
    compare::{self, Comparison},
    dataset::{self, ExportFormat, ImportMode},
    deleted::DeletedLedger,
    municipality::EntityStore,
    prediction::{self, Prediction},
    settings,
};

/// Everything the facade owns.
#[derive(Debug, Clone)]
struct AdminState {
    settings: AdminSettings,
    entities: EntityStore,
    deleted: DeletedLedger,
    backups: BackupLedger,
}

impl AdminState {
    fn from_defaults(defaults: &Defaults) -> Self {
        Self {
            settings: defaults.settings,
            entities: EntityStore::new(defaults.municipalities.clone(), defaults.yield_data.clone()),
            deleted: DeletedLedger::default(),
            backups: BackupLedger::default(),
        }
    }
}

/// One planned storage write: `value = None` removes the key.
/// `previous` is what the key is restored to if a later write fails.
struct KeyWrite {
    key: &'static str,
    value: Option<String>,
    previous: Option<String>,
}

impl KeyWrite {
    fn set<T: Serialize + ?Sized>(key: &'static str, next: &T, current: &T) -> Result<Self> {
        Ok(Self {
            key,
            value: Some(serde_json::to_string(next)?),
            previous: Some(serde_json::to_string(current)?),
        })
    }

    fn remove<T: Serialize + ?Sized>(key: &'static str, current: &T) -> Result<Self> {
        Ok(Self {
            key,
            value: None,
            previous: Some(serde_json::to_string(current)?),
        })
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

async fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// The admin data service.
///
/// Construct one per application with [`AdminService::load`] and share it via `Arc`.
pub struct AdminService {
    store: Arc<dyn KeyValueStore>,
    defaults: Defaults,
    edit_policy: EditNamePolicy,
    state: Mutex<AdminState>,
}

impl std::fmt::Debug for AdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminService")
            .field("edit_policy", &self.edit_policy)
            .finish_non_exhaustive()
    }
}

impl AdminService {
    /// Reads every storage key once. Absent keys fall back to `defaults` (or empty ledgers).
    ///
    /// # Errors
    /// `Persistence` if a key cannot be read or holds unreadable data.
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        defaults: Defaults,
        edit_policy: EditNamePolicy,
    ) -> Result<Self> {
        let settings: AdminSettings = read_json(store.as_ref(), SETTINGS_KEY)
            .await?
            .unwrap_or(defaults.settings);
        let municipalities: Vec<Municipality> = read_json(store.as_ref(), MUNICIPALITIES_KEY)
            .await?
            .unwrap_or_else(|| defaults.municipalities.clone());
        let yield_data: Vec<MunicipalityYieldData> = read_json(store.as_ref(), YIELD_DATA_KEY)
            .await?
            .unwrap_or_else(|| defaults.yield_data.clone());
        let deleted: Vec<DeletedMunicipality> = read_json(store.as_ref(), DELETED_KEY)
            .await?
            .unwrap_or_default();
        let backups: Vec<BackupSnapshot> = read_json(store.as_ref(), BACKUP_KEY)
            .await?
            .unwrap_or_default();

        settings::validate(&settings).map_err(|e| Error::Persistence {
            message: format!("stored settings are out of range: {e}"),
        })?;

        let state = AdminState {
            settings,
            entities: EntityStore::new(municipalities, yield_data),
            deleted: DeletedLedger::new(deleted),
            backups: BackupLedger::new(backups),
        };
        info!(
            municipalities = state.entities.municipalities().len(),
            datasets = state.entities.yield_data().len(),
            deleted = state.deleted.entries().len(),
            backups = state.backups.snapshots().len(),
            "Loaded admin data"
        );

        Ok(Self {
            store,
            defaults,
            edit_policy,
            state: Mutex::new(state),
        })
    }

    /// The configured edit behavior for municipality names.
    #[must_use]
    pub const fn edit_policy(&self) -> EditNamePolicy {
        self.edit_policy
    }

    // --- Reads ---

    /// Active municipalities.
    pub async fn list_municipalities(&self) -> Vec<Municipality> {
        self.state.lock().await.entities.municipalities().to_vec()
    }

    /// All yield datasets.
    pub async fn list_yield_data(&self) -> Vec<MunicipalityYieldData> {
        self.state.lock().await.entities.yield_data().to_vec()
    }

    /// Current settings.
    pub async fn get_settings(&self) -> AdminSettings {
        self.state.lock().await.settings
    }

    /// Soft-deleted municipalities.
    pub async fn list_deleted(&self) -> Vec<DeletedMunicipality> {
        self.state.lock().await.deleted.entries().to_vec()
    }

    /// Backups, oldest first.
    pub async fn list_backups(&self) -> Vec<BackupSnapshot> {
        self.state.lock().await.backups.snapshots().to_vec()
    }

    /// Yield prediction for an active municipality.
    pub async fn predict(&self, municipality_id: &str) -> Result<Prediction> {
        let state = self.state.lock().await;
        if !state.entities.contains(municipality_id) {
            return Err(Error::not_found("Municipality", municipality_id));
        }
        prediction::predict(municipality_id, state.entities.yield_data())
    }

    /// Trend comparison for active municipalities, bounded by the settings.
    pub async fn compare(&self, municipality_ids: &[String]) -> Result<Comparison> {
        let state = self.state.lock().await;
        compare::compare(municipality_ids, &state.entities, &state.settings)
    }

    /// Renders the yield datasets as CSV or JSON.
    pub async fn export_yield_data(&self, format: ExportFormat) -> Result<String> {
        let state = self.state.lock().await;
        dataset::export(state.entities.yield_data(), format)
    }

    // --- Settings ---

    /// Merges `patch` into the settings after validating the result.
    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<AdminSettings> {
        let mut state = self.state.lock().await;
        let next = settings::apply_patch(&state.settings, &patch)?;

        self.apply_writes(&[KeyWrite::set(SETTINGS_KEY, &next, &state.settings)?])
            .await?;
        state.settings = next;
        info!(?next, "Updated admin settings");
        Ok(next)
    }

    /// Restores the default settings record.
    pub async fn reset_settings(&self) -> Result<AdminSettings> {
        let mut state = self.state.lock().await;
        let next = self.defaults.settings;

        self.apply_writes(&[KeyWrite::set(SETTINGS_KEY, &next, &state.settings)?])
            .await?;
        state.settings = next;
        info!("Reset admin settings to defaults");
        Ok(next)
    }

    // --- Municipalities ---

    /// Replaces the whole active set. Soft-deleted entries whose id becomes active again are
    /// dropped from the ledger.
    pub async fn replace_municipalities(&self, municipalities: Vec<Municipality>) -> Result<()> {
        let mut state = self.state.lock().await;
        let next = state.entities.with_municipalities(municipalities)?;
        let next_deleted = state.deleted.without_active(&next);

        let mut writes = vec![KeyWrite::set(
            MUNICIPALITIES_KEY,
            next.municipalities(),
            state.entities.municipalities(),
        )?];
        if let Some(ledger) = &next_deleted {
            writes.push(KeyWrite::set(DELETED_KEY, ledger.entries(), state.deleted.entries())?);
        }
        self.apply_writes(&writes).await?;

        info!(count = next.municipalities().len(), "Replaced municipalities");
        state.entities = next;
        if let Some(ledger) = next_deleted {
            state.deleted = ledger;
        }
        Ok(())
    }

    /// Adds a municipality. Ids already active or awaiting restore are rejected.
    pub async fn add_municipality(&self, municipality: Municipality) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.deleted.contains(&municipality.id) {
            return Err(Error::validation(
                "id",
                format!(
                    "municipality '{}' is soft-deleted; restore it instead",
                    municipality.id
                ),
            ));
        }
        let id = municipality.id.clone();
        let next = state.entities.with_added(municipality)?;

        self.apply_writes(&[KeyWrite::set(
            MUNICIPALITIES_KEY,
            next.municipalities(),
            state.entities.municipalities(),
        )?])
        .await?;
        state.entities = next;
        info!(%id, "Added municipality");
        Ok(())
    }

    /// Changes the display name of an active municipality, per the configured policy.
    pub async fn edit_municipality_name(
        &self,
        municipality_id: &str,
        new_display_name: &str,
    ) -> Result<Municipality> {
        let mut state = self.state.lock().await;
        let (next, edited) =
            state
                .entities
                .with_renamed(municipality_id, new_display_name, self.edit_policy)?;

        self.apply_writes(&[KeyWrite::set(
            MUNICIPALITIES_KEY,
            next.municipalities(),
            state.entities.municipalities(),
        )?])
        .await?;
        state.entities = next;
        info!(id = %municipality_id, policy = ?self.edit_policy, "Edited municipality");
        Ok(edited)
    }

    /// Soft-deletes an active municipality together with its yield dataset.
    pub async fn delete_municipality(&self, municipality_id: &str) -> Result<DeletedMunicipality> {
        let mut state = self.state.lock().await;
        let (next_entities, removed) = state.entities.without(municipality_id)?;
        let (next_deleted, record) = state.deleted.with_recorded(removed, now_millis());

        self.apply_writes(&[
            KeyWrite::set(
                MUNICIPALITIES_KEY,
                next_entities.municipalities(),
                state.entities.municipalities(),
            )?,
            KeyWrite::set(
                YIELD_DATA_KEY,
                next_entities.yield_data(),
                state.entities.yield_data(),
            )?,
            KeyWrite::set(DELETED_KEY, next_deleted.entries(), state.deleted.entries())?,
        ])
        .await?;

        state.entities = next_entities;
        state.deleted = next_deleted;
        info!(id = %municipality_id, "Soft-deleted municipality");
        Ok(record)
    }

    /// Moves a soft-deleted municipality back into the active set.
    /// Its yield dataset is not regenerated.
    pub async fn restore_municipality(&self, municipality_id: &str) -> Result<Municipality> {
        let mut state = self.state.lock().await;
        let (next_deleted, record) = state.deleted.take(municipality_id)?;
        let restored = record.municipality;
        let next_entities = state.entities.with_restored(restored.clone())?;

        self.apply_writes(&[
            KeyWrite::set(
                MUNICIPALITIES_KEY,
                next_entities.municipalities(),
                state.entities.municipalities(),
            )?,
            KeyWrite::set(DELETED_KEY, next_deleted.entries(), state.deleted.entries())?,
        ])
        .await?;

        state.entities = next_entities;
        state.deleted = next_deleted;
        info!(id = %municipality_id, "Restored municipality");
        Ok(restored)
    }

    // --- Yield data ---

    /// Imports yield datasets, appending to or replacing the current collection.
    /// Returns the number of datasets imported.
    pub async fn import_yield_data(
        &self,
        data: Vec<MunicipalityYieldData>,
        mode: ImportMode,
    ) -> Result<usize> {
        let incoming = dataset::normalize(data)?;
        let count = incoming.len();

        let mut state = self.state.lock().await;
        let merged = dataset::merge(state.entities.yield_data(), incoming, mode);
        let next = state.entities.with_yield_data(merged);

        self.apply_writes(&[KeyWrite::set(
            YIELD_DATA_KEY,
            next.yield_data(),
            state.entities.yield_data(),
        )?])
        .await?;
        state.entities = next;
        info!(count, ?mode, "Imported yield data");
        Ok(count)
    }

    // --- Backups ---

    /// Snapshots settings, municipalities, and yield data.
    pub async fn create_backup(&self) -> Result<BackupSnapshot> {
        let mut state = self.state.lock().await;
        let snapshot = state
            .backups
            .capture(&state.settings, &state.entities, now_millis());
        let next = state.backups.with_snapshot(snapshot.clone());

        self.apply_writes(&[KeyWrite::set(
            BACKUP_KEY,
            next.snapshots(),
            state.backups.snapshots(),
        )?])
        .await?;
        state.backups = next;
        info!(timestamp = snapshot.timestamp, "Created backup");
        Ok(snapshot)
    }

    /// Overwrites settings, municipalities, and yield data with a backup's contents.
    /// The backup ledger is left as it is; soft-deleted entries whose id the backup brings
    /// back into the active set are dropped.
    pub async fn restore_backup(&self, timestamp: i64) -> Result<()> {
        let mut state = self.state.lock().await;
        let snapshot = state.backups.find(timestamp)?.clone();
        let next_entities = EntityStore::new(snapshot.municipalities, snapshot.yield_data);
        let next_deleted = state.deleted.without_active(&next_entities);

        let mut writes = vec![
            KeyWrite::set(SETTINGS_KEY, &snapshot.settings, &state.settings)?,
            KeyWrite::set(
                MUNICIPALITIES_KEY,
                next_entities.municipalities(),
                state.entities.municipalities(),
            )?,
            KeyWrite::set(
                YIELD_DATA_KEY,
                next_entities.yield_data(),
                state.entities.yield_data(),
            )?,
        ];
        if let Some(ledger) = &next_deleted {
            writes.push(KeyWrite::set(DELETED_KEY, ledger.entries(), state.deleted.entries())?);
        }
        self.apply_writes(&writes).await?;

        state.settings = snapshot.settings;
        state.entities = next_entities;
        if let Some(ledger) = next_deleted {
            state.deleted = ledger;
        }
        info!(timestamp, "Restored backup");
        Ok(())
    }

    // --- Reset ---

    /// Clears settings, municipalities, yield data, and the soft-delete ledger from storage and
    /// reloads the built-in defaults. Backups are kept.
    pub async fn reset_to_defaults(&self) -> Result<()> {
        let mut state = self.state.lock().await;

        self.apply_writes(&[
            KeyWrite::remove(SETTINGS_KEY, &state.settings)?,
            KeyWrite::remove(MUNICIPALITIES_KEY, state.entities.municipalities())?,
            KeyWrite::remove(YIELD_DATA_KEY, state.entities.yield_data())?,
            KeyWrite::remove(DELETED_KEY, state.deleted.entries())?,
        ])
        .await?;

        let backups = std::mem::take(&mut state.backups);
        *state = AdminState {
            backups,
            ..AdminState::from_defaults(&self.defaults)
        };
        info!("Reset admin data to defaults");
        Ok(())
    }

    // --- Write-through ---

    async fn write_key(&self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.store.set(key, value).await,
            None => self.store.remove(key).await,
        }
    }

    /// Applies `writes` in order; on failure restores the keys already written.
    async fn apply_writes(&self, writes: &[KeyWrite]) -> Result<()> {
        for (applied, write) in writes.iter().enumerate() {
            if let Err(err) = self.write_key(write.key, write.value.as_deref()).await {
                warn!(
                    key = write.key,
                    error = %err,
                    "Storage write failed, rolling back {applied} earlier write(s)"
                );
                self.roll_back(&writes[..applied]).await;
                return Err(err);
            }
            debug!(key = write.key, "Persisted");
        }
        Ok(())
    }

    async fn roll_back(&self, applied: &[KeyWrite]) {
        for write in applied.iter().rev() {
            if let Err(err) = self.write_key(write.key, write.previous.as_deref()).await {
                // Nothing left to compensate with; storage stays ahead of memory for this key
                error!(key = write.key, error = %err, "Rollback write failed");
            }
        }
    }
}
