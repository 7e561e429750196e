//! Entity Store - the active municipalities and their yield datasets.
//!
//! Every mutation is expressed as a method returning the *next* store, leaving `self`
//! untouched. The admin service persists the next store and only then swaps it in, so a
//! failed write never leaves memory ahead of durable storage.

use crate::{
    config::EditNamePolicy,
    errors::{Error, Result},
    models::{Municipality, MunicipalityYieldData},
};
use std::collections::HashSet;

/// Active municipalities plus their yield datasets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityStore {
    municipalities: Vec<Municipality>,
    yield_data: Vec<MunicipalityYieldData>,
}

impl EntityStore {
    /// Builds a store from already-validated collections.
    #[must_use]
    pub const fn new(
        municipalities: Vec<Municipality>,
        yield_data: Vec<MunicipalityYieldData>,
    ) -> Self {
        Self {
            municipalities,
            yield_data,
        }
    }

    /// The active municipalities, in insertion order.
    #[must_use]
    pub fn municipalities(&self) -> &[Municipality] {
        &self.municipalities
    }

    /// All yield datasets.
    #[must_use]
    pub fn yield_data(&self) -> &[MunicipalityYieldData] {
        &self.yield_data
    }

    /// Looks up an active municipality.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Municipality> {
        self.municipalities.iter().find(|m| m.id == id)
    }

    /// The dataset owned by `id`, if any.
    #[must_use]
    pub fn yield_data_for(&self, id: &str) -> Option<&MunicipalityYieldData> {
        self.yield_data.iter().find(|d| d.municipality_id == id)
    }

    /// Returns `true` if `id` is in the active set.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn require(&self, id: &str) -> Result<&Municipality> {
        self.get(id).ok_or_else(|| Error::not_found("Municipality", id))
    }

    /// Replaces the whole active set. Yield data is kept as-is.
    pub fn with_municipalities(&self, municipalities: Vec<Municipality>) -> Result<Self> {
        let mut seen = HashSet::new();
        for m in &municipalities {
            validate_municipality(m)?;
            if !seen.insert(m.id.as_str()) {
                return Err(Error::validation(
                    "id",
                    format!("duplicate municipality id '{}'", m.id),
                ));
            }
        }
        Ok(Self {
            municipalities,
            yield_data: self.yield_data.clone(),
        })
    }

    /// Appends a new municipality.
    pub fn with_added(&self, municipality: Municipality) -> Result<Self> {
        validate_municipality(&municipality)?;
        if self.contains(&municipality.id) {
            return Err(Error::validation(
                "id",
                format!("municipality '{}' already exists", municipality.id),
            ));
        }
        let mut next = self.clone();
        next.municipalities.push(municipality);
        Ok(next)
    }

    /// Updates the display name of `id` according to `policy`. The color never changes.
    pub fn with_renamed(
        &self,
        id: &str,
        new_display_name: &str,
        policy: EditNamePolicy,
    ) -> Result<(Self, Municipality)> {
        self.require(id)?;
        let new_display_name = new_display_name.trim();
        if new_display_name.is_empty() {
            return Err(Error::validation("displayName", "must not be empty"));
        }

        let mut next = self.clone();
        let mut edited = None;
        for m in &mut next.municipalities {
            if m.id == id {
                if policy == EditNamePolicy::Rename {
                    m.display_name = new_display_name.to_string();
                }
                edited = Some(m.clone());
            }
        }
        let edited = edited.ok_or_else(|| Error::not_found("Municipality", id))?;
        Ok((next, edited))
    }

    /// Removes `id` and its dataset, returning the removed municipality.
    pub fn without(&self, id: &str) -> Result<(Self, Municipality)> {
        let removed = self.require(id)?.clone();
        let next = Self {
            municipalities: self
                .municipalities
                .iter()
                .filter(|m| m.id != id)
                .cloned()
                .collect(),
            yield_data: self
                .yield_data
                .iter()
                .filter(|d| d.municipality_id != id)
                .cloned()
                .collect(),
        };
        Ok((next, removed))
    }

    /// Re-inserts a previously deleted municipality. Its dataset is not regenerated.
    pub fn with_restored(&self, municipality: Municipality) -> Result<Self> {
        if self.contains(&municipality.id) {
            return Err(Error::validation(
                "id",
                format!("municipality '{}' is already active", municipality.id),
            ));
        }
        let mut next = self.clone();
        next.municipalities.push(municipality);
        Ok(next)
    }

    /// Replaces the yield datasets.
    #[must_use]
    pub fn with_yield_data(&self, yield_data: Vec<MunicipalityYieldData>) -> Self {
        Self {
            municipalities: self.municipalities.clone(),
            yield_data,
        }
    }
}

/// Checks that a municipality has an id, a name, and a `#RGB`/`#RRGGBB` color.
pub fn validate_municipality(municipality: &Municipality) -> Result<()> {
    if municipality.id.trim().is_empty() {
        return Err(Error::validation("id", "must not be empty"));
    }
    if municipality.display_name.trim().is_empty() {
        return Err(Error::validation("displayName", "must not be empty"));
    }

    let valid_color = municipality.color.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    });
    if !valid_color {
        return Err(Error::validation(
            "color",
            format!("'{}' is not a hex color", municipality.color),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{sample_municipalities, sample_yield_data};

    fn sample_store() -> EntityStore {
        EntityStore::new(sample_municipalities(), sample_yield_data())
    }

    #[test]
    fn test_rename_changes_only_display_name() {
        let store = sample_store();
        let (next, edited) = store
            .with_renamed("alpha", "  Alpha City ", EditNamePolicy::Rename)
            .unwrap();

        assert_eq!(edited.display_name, "Alpha City");
        assert_eq!(edited.color, store.get("alpha").unwrap().color);
        assert_eq!(next.get("alpha").unwrap(), &edited);
        assert_eq!(next.get("beta"), store.get("beta"));
        // Original untouched
        assert_eq!(store.get("alpha").unwrap().display_name, "Alpha");
    }

    #[test]
    fn test_preserve_policy_keeps_name() {
        let store = sample_store();
        let (next, edited) = store
            .with_renamed("alpha", "Alpha City", EditNamePolicy::Preserve)
            .unwrap();
        assert_eq!(edited.display_name, "Alpha");
        assert_eq!(next, store);
    }

    #[test]
    fn test_rename_errors() {
        let store = sample_store();
        assert!(matches!(
            store.with_renamed("nope", "X", EditNamePolicy::Rename),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            store.with_renamed("alpha", "   ", EditNamePolicy::Rename),
            Err(Error::Validation {
                field: "displayName",
                ..
            })
        ));
    }

    #[test]
    fn test_without_removes_dataset_too() {
        let store = sample_store();
        let (next, removed) = store.without("alpha").unwrap();

        assert_eq!(removed.id, "alpha");
        assert!(!next.contains("alpha"));
        assert!(next.yield_data_for("alpha").is_none());
        assert!(next.yield_data_for("beta").is_some());
        assert!(matches!(next.without("alpha"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_with_municipalities_rejects_duplicates() {
        let store = sample_store();
        let dup = vec![
            Municipality::new("x", "X", "#000"),
            Municipality::new("x", "X2", "#111"),
        ];
        assert!(matches!(
            store.with_municipalities(dup),
            Err(Error::Validation { field: "id", .. })
        ));
    }

    #[test]
    fn test_add_and_restore_reject_active_ids() {
        let store = sample_store();
        let alpha = store.get("alpha").unwrap().clone();
        assert!(store.with_added(alpha.clone()).is_err());
        assert!(store.with_restored(alpha).is_err());

        let added = store
            .with_added(Municipality::new("gamma", "Gamma", "#ABCDEF"))
            .unwrap();
        assert_eq!(added.municipalities().len(), store.municipalities().len() + 1);
    }

    #[test]
    fn test_validate_color() {
        assert!(validate_municipality(&Municipality::new("a", "A", "#fff")).is_ok());
        assert!(validate_municipality(&Municipality::new("a", "A", "#4CAF50")).is_ok());
        for bad in ["4CAF50", "#4CAF5", "#GGGGGG", ""] {
            assert!(matches!(
                validate_municipality(&Municipality::new("a", "A", bad)),
                Err(Error::Validation { field: "color", .. })
            ));
        }
    }
}
