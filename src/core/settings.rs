//! Settings Store - validation and merging for the `AdminSettings` singleton.
//!
//! The settings record is always replaced wholesale: a patch is merged into a copy of the
//! current record, the copy is validated, and only a valid copy is persisted.

use crate::{
    errors::{Error, Result},
    models::{AdminSettings, SettingsPatch},
};

/// Highest allowed value for `maxCompareMunicipalities`.
pub const MAX_COMPARE_LIMIT: u32 = 20;

/// Checks `1 ≤ maxCompareMunicipalities ≤ 20` and
/// `1 ≤ performanceThreshold ≤ maxCompareMunicipalities`.
pub fn validate(settings: &AdminSettings) -> Result<()> {
    if !(1..=MAX_COMPARE_LIMIT).contains(&settings.max_compare_municipalities) {
        return Err(Error::validation(
            "maxCompareMunicipalities",
            format!(
                "must be between 1 and {MAX_COMPARE_LIMIT}, got {}",
                settings.max_compare_municipalities
            ),
        ));
    }

    if !(1..=settings.max_compare_municipalities).contains(&settings.performance_threshold) {
        return Err(Error::validation(
            "performanceThreshold",
            format!(
                "must be between 1 and {}, got {}",
                settings.max_compare_municipalities, settings.performance_threshold
            ),
        ));
    }

    Ok(())
}

/// Merges `patch` over `current` without validating.
#[must_use]
pub fn merge(current: &AdminSettings, patch: &SettingsPatch) -> AdminSettings {
    AdminSettings {
        max_compare_municipalities: patch
            .max_compare_municipalities
            .unwrap_or(current.max_compare_municipalities),
        performance_threshold: patch
            .performance_threshold
            .unwrap_or(current.performance_threshold),
        enable_smoothing_by_default: patch
            .enable_smoothing_by_default
            .unwrap_or(current.enable_smoothing_by_default),
    }
}

/// Merges and validates, returning the record to persist.
pub fn apply_patch(current: &AdminSettings, patch: &SettingsPatch) -> Result<AdminSettings> {
    let merged = merge(current, patch);
    validate(&merged)?;
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&AdminSettings::default()).is_ok());
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let current = AdminSettings::default();
        let merged = merge(
            &current,
            &SettingsPatch {
                enable_smoothing_by_default: Some(true),
                ..SettingsPatch::default()
            },
        );
        assert_eq!(merged.max_compare_municipalities, 8);
        assert_eq!(merged.performance_threshold, 6);
        assert!(merged.enable_smoothing_by_default);
    }

    #[test]
    fn test_max_compare_bounds() {
        let current = AdminSettings::default();
        for bad in [0, 21, 25] {
            let result = apply_patch(
                &current,
                &SettingsPatch {
                    max_compare_municipalities: Some(bad),
                    ..SettingsPatch::default()
                },
            );
            assert!(matches!(
                result,
                Err(Error::Validation {
                    field: "maxCompareMunicipalities",
                    ..
                })
            ));
        }

        let ok = apply_patch(
            &current,
            &SettingsPatch {
                max_compare_municipalities: Some(20),
                ..SettingsPatch::default()
            },
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_threshold_bounded_by_max() {
        let current = AdminSettings::default();

        // Lowering max below the current threshold is rejected on the threshold
        let result = apply_patch(
            &current,
            &SettingsPatch {
                max_compare_municipalities: Some(4),
                ..SettingsPatch::default()
            },
        );
        assert!(matches!(
            result,
            Err(Error::Validation {
                field: "performanceThreshold",
                ..
            })
        ));

        let result = apply_patch(
            &current,
            &SettingsPatch {
                performance_threshold: Some(0),
                ..SettingsPatch::default()
            },
        );
        assert!(result.is_err());

        let updated = apply_patch(
            &current,
            &SettingsPatch {
                max_compare_municipalities: Some(4),
                performance_threshold: Some(4),
                enable_smoothing_by_default: None,
            },
        );
        assert_eq!(
            updated.ok(),
            Some(AdminSettings {
                max_compare_municipalities: 4,
                performance_threshold: 4,
                enable_smoothing_by_default: false,
            })
        );
    }
}
