//! Admin data model.
//!
//! Field names serialize in camelCase, matching the JSON records the mobile app keeps
//! under each storage key.

use serde::{Deserialize, Serialize};

/// A named, colored region users can select for yield comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Municipality {
    /// Stable identifier (e.g., `"cabanatuan"`)
    pub id: String,
    /// Human-readable name
    pub display_name: String,
    /// Chart color as a hex string (e.g., `"#4CAF50"`)
    pub color: String,
}

impl Municipality {
    /// Convenience constructor.
    #[must_use]
    pub fn new(id: &str, display_name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            color: color.to_string(),
        }
    }
}

/// Yield for one municipality in one year, in tons per hectare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldRecord {
    /// Harvest year
    pub year: i32,
    /// Tons per hectare
    #[serde(rename = "yield")]
    pub yield_value: f64,
}

/// The historical yield series of one municipality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MunicipalityYieldData {
    /// Owning [`Municipality::id`]
    pub municipality_id: String,
    /// Records ordered by year ascending
    pub historical_data: Vec<YieldRecord>,
    /// Admin-supplied average; not recomputed when `historical_data` changes
    pub average_yield: f64,
}

impl MunicipalityYieldData {
    /// Mean of the historical yields rounded to two decimals, or 0 for an empty series.
    #[must_use]
    pub fn computed_average(&self) -> f64 {
        if self.historical_data.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)] // Series are a few dozen years at most
        let mean = self
            .historical_data
            .iter()
            .map(|r| r.yield_value)
            .sum::<f64>()
            / self.historical_data.len() as f64;
        (mean * 100.0).round() / 100.0
    }
}

/// App-wide admin settings. Singleton, replaced wholesale on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettings {
    /// Upper bound on municipalities compared at once
    pub max_compare_municipalities: u32,
    /// Comparisons above this count carry a performance warning
    pub performance_threshold: u32,
    /// Whether comparison series are smoothed
    pub enable_smoothing_by_default: bool,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            max_compare_municipalities: 8,
            performance_threshold: 6,
            enable_smoothing_by_default: false,
        }
    }
}

/// A partial settings update. `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    /// New `max_compare_municipalities`
    pub max_compare_municipalities: Option<u32>,
    /// New `performance_threshold`
    pub performance_threshold: Option<u32>,
    /// New `enable_smoothing_by_default`
    pub enable_smoothing_by_default: Option<bool>,
}

/// A municipality removed from the active set, kept so it can be restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedMunicipality {
    /// The municipality as it was when deleted
    pub municipality: Municipality,
    /// Unix time in milliseconds
    pub deleted_at: i64,
}

/// A point-in-time copy of settings, municipalities, and yield data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    /// Settings at capture time
    pub settings: AdminSettings,
    /// Active municipalities at capture time
    pub municipalities: Vec<Municipality>,
    /// Yield datasets at capture time
    pub yield_data: Vec<MunicipalityYieldData>,
    /// Unix time in milliseconds; strictly increasing across the ledger
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_serializes_in_app_format() {
        let data = MunicipalityYieldData {
            municipality_id: "iba".to_string(),
            historical_data: vec![YieldRecord {
                year: 2020,
                yield_value: 0.5,
            }],
            average_yield: 0.5,
        };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(
            json,
            r#"{"municipalityId":"iba","historicalData":[{"year":2020,"yield":0.5}],"averageYield":0.5}"#
        );

        let settings: AdminSettings = serde_json::from_str(
            r#"{"maxCompareMunicipalities":8,"performanceThreshold":6,"enableSmoothingByDefault":false}"#,
        )
        .unwrap();
        assert_eq!(settings, AdminSettings::default());
    }

    #[test]
    fn test_computed_average() {
        let mut data = MunicipalityYieldData {
            municipality_id: "iba".to_string(),
            historical_data: vec![],
            average_yield: 0.0,
        };
        assert_eq!(data.computed_average(), 0.0);

        data.historical_data = vec![
            YieldRecord {
                year: 2020,
                yield_value: 0.5,
            },
            YieldRecord {
                year: 2021,
                yield_value: 0.6,
            },
            YieldRecord {
                year: 2022,
                yield_value: 0.62,
            },
        ];
        assert_eq!(data.computed_average(), 0.57);
    }
}
