//! Backup Ledger - append-only full-state snapshots.
//!
//! Snapshot timestamps double as lookup keys, so they must be unique: a new snapshot is
//! stamped with the current time in milliseconds, bumped past the newest existing timestamp
//! when the clock has not advanced.

use crate::{
    errors::{Error, Result},
    models::{AdminSettings, BackupSnapshot},
};

use super::municipality::EntityStore;

/// Backups in creation order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackupLedger {
    snapshots: Vec<BackupSnapshot>,
}

impl BackupLedger {
    /// Wraps snapshots loaded from storage.
    #[must_use]
    pub const fn new(snapshots: Vec<BackupSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Snapshots in creation order, oldest first.
    #[must_use]
    pub fn snapshots(&self) -> &[BackupSnapshot] {
        &self.snapshots
    }

    /// A timestamp strictly greater than every existing one and not earlier than `now_millis`.
    #[must_use]
    pub fn next_timestamp(&self, now_millis: i64) -> i64 {
        self.snapshots
            .iter()
            .map(|s| s.timestamp)
            .max()
            .map_or(now_millis, |latest| now_millis.max(latest + 1))
    }

    /// Captures a deep copy of the given state, stamped via [`Self::next_timestamp`].
    #[must_use]
    pub fn capture(
        &self,
        settings: &AdminSettings,
        entities: &EntityStore,
        now_millis: i64,
    ) -> BackupSnapshot {
        BackupSnapshot {
            settings: *settings,
            municipalities: entities.municipalities().to_vec(),
            yield_data: entities.yield_data().to_vec(),
            timestamp: self.next_timestamp(now_millis),
        }
    }

    /// Appends a snapshot.
    #[must_use]
    pub fn with_snapshot(&self, snapshot: BackupSnapshot) -> Self {
        let mut snapshots = self.snapshots.clone();
        snapshots.push(snapshot);
        Self { snapshots }
    }

    /// The snapshot with exactly this timestamp.
    pub fn find(&self, timestamp: i64) -> Result<&BackupSnapshot> {
        self.snapshots
            .iter()
            .find(|s| s.timestamp == timestamp)
            .ok_or_else(|| Error::not_found("Backup", timestamp))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{sample_municipalities, sample_yield_data};

    #[test]
    fn test_timestamps_strictly_increase_within_one_tick() {
        let entities = EntityStore::new(sample_municipalities(), sample_yield_data());
        let settings = AdminSettings::default();
        let mut ledger = BackupLedger::default();

        let mut stamps = Vec::new();
        for _ in 0..3 {
            let snapshot = ledger.capture(&settings, &entities, 5_000);
            stamps.push(snapshot.timestamp);
            ledger = ledger.with_snapshot(snapshot);
        }
        assert_eq!(stamps, vec![5_000, 5_001, 5_002]);

        // Clock going backwards still yields a fresh key
        assert_eq!(ledger.next_timestamp(100), 5_003);
        // Clock moving forward is used as-is
        assert_eq!(ledger.next_timestamp(9_000), 9_000);
    }

    #[test]
    fn test_capture_is_a_deep_copy() {
        let entities = EntityStore::new(sample_municipalities(), sample_yield_data());
        let snapshot = BackupLedger::default().capture(&AdminSettings::default(), &entities, 1);

        let (changed, _) = entities.without("alpha").unwrap();
        assert_ne!(changed.municipalities(), snapshot.municipalities.as_slice());
        assert_eq!(entities.municipalities(), snapshot.municipalities.as_slice());
        assert_eq!(entities.yield_data(), snapshot.yield_data.as_slice());
    }

    #[test]
    fn test_find() {
        let entities = EntityStore::default();
        let ledger = BackupLedger::default();
        let snapshot = ledger.capture(&AdminSettings::default(), &entities, 42);
        let ledger = ledger.with_snapshot(snapshot.clone());

        assert_eq!(ledger.find(42).unwrap(), &snapshot);
        assert!(matches!(ledger.find(43), Err(Error::NotFound { .. })));
    }
}
