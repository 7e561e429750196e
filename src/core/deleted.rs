//! Soft-Delete Ledger - municipalities removed from the active set.
//!
//! Entries keep the full municipality snapshot so a restore brings back the original id and
//! color. Repeated delete/restore cycles may leave several entries for one id; a restore
//! consumes the oldest.

use crate::{
    errors::{Error, Result},
    models::{DeletedMunicipality, Municipality},
};

use super::municipality::EntityStore;

/// Soft-deleted municipalities in deletion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeletedLedger {
    entries: Vec<DeletedMunicipality>,
}

impl DeletedLedger {
    /// Wraps entries loaded from storage.
    #[must_use]
    pub const fn new(entries: Vec<DeletedMunicipality>) -> Self {
        Self { entries }
    }

    /// Entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[DeletedMunicipality] {
        &self.entries
    }

    /// Returns `true` if some entry holds a municipality with this id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|d| d.municipality.id == id)
    }

    /// Appends a deletion record, returning the next ledger and the new entry.
    #[must_use]
    pub fn with_recorded(
        &self,
        municipality: Municipality,
        deleted_at: i64,
    ) -> (Self, DeletedMunicipality) {
        let record = DeletedMunicipality {
            municipality,
            deleted_at,
        };
        let mut entries = self.entries.clone();
        entries.push(record.clone());
        (Self { entries }, record)
    }

    /// Drops entries whose id is active in `entities`.
    ///
    /// Returns `None` when nothing would change.
    #[must_use]
    pub fn without_active(&self, entities: &EntityStore) -> Option<Self> {
        let entries: Vec<DeletedMunicipality> = self
            .entries
            .iter()
            .filter(|d| !entities.contains(&d.municipality.id))
            .cloned()
            .collect();
        (entries.len() != self.entries.len()).then_some(Self { entries })
    }

    /// Removes the first entry for `id`, returning it.
    pub fn take(&self, id: &str) -> Result<(Self, DeletedMunicipality)> {
        let position = self
            .entries
            .iter()
            .position(|d| d.municipality.id == id)
            .ok_or_else(|| Error::not_found("Deleted municipality", id))?;

        let mut entries = self.entries.clone();
        let taken = entries.remove(position);
        Ok((Self { entries }, taken))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_record_then_take() {
        let ledger = DeletedLedger::default();
        let alpha = Municipality::new("alpha", "Alpha", "#111111");

        let (ledger, record) = ledger.with_recorded(alpha.clone(), 1_000);
        assert!(ledger.contains("alpha"));
        assert_eq!(ledger.entries().to_vec(), vec![record]);

        let (after, taken) = ledger.take("alpha").unwrap();
        assert_eq!(taken.municipality, alpha);
        assert_eq!(taken.deleted_at, 1_000);
        assert!(!after.contains("alpha"));
        assert!(matches!(after.take("alpha"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_take_consumes_oldest_duplicate() {
        let alpha = Municipality::new("alpha", "Alpha", "#111111");
        let (ledger, _) = DeletedLedger::default().with_recorded(alpha.clone(), 1);
        let (ledger, _) = ledger.with_recorded(alpha, 2);

        let (after, taken) = ledger.take("alpha").unwrap();
        assert_eq!(taken.deleted_at, 1);
        assert_eq!(after.entries().len(), 1);
        assert_eq!(after.entries()[0].deleted_at, 2);
    }

    #[test]
    fn test_without_active_drops_reactivated_ids() {
        let alpha = Municipality::new("alpha", "Alpha", "#111111");
        let gamma = Municipality::new("gamma", "Gamma", "#333333");
        let (ledger, _) = DeletedLedger::default().with_recorded(alpha.clone(), 1);
        let (ledger, _) = ledger.with_recorded(gamma, 2);

        let entities = EntityStore::new(vec![alpha], Vec::new());
        let pruned = ledger.without_active(&entities).unwrap();
        assert!(!pruned.contains("alpha"));
        assert!(pruned.contains("gamma"));

        assert!(pruned.without_active(&entities).is_none());
    }
}
