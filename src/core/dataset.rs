//! Yield dataset import and export.
//!
//! Imports are normalized before they reach the Entity Store: records sorted by year,
//! duplicate years and negative yields rejected. `averageYield` is taken as supplied.

use crate::{
    errors::{Error, Result},
    models::MunicipalityYieldData,
};
use serde::Deserialize;
use std::collections::HashSet;

/// How imported datasets combine with the existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Imported datasets replace same-id datasets; other existing datasets stay
    Append,
    /// Imported datasets become the whole collection
    Replace,
}

/// Output format for [`export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// One row per yearly record
    Csv,
    /// Pretty-printed array of datasets
    Json,
}

/// CSV header row of an export.
pub const CSV_HEADER: [&str; 4] = ["MunicipalityID", "Year", "Yield", "AverageYield"];

/// Validates and sorts incoming datasets.
pub fn normalize(mut data: Vec<MunicipalityYieldData>) -> Result<Vec<MunicipalityYieldData>> {
    let mut ids = HashSet::new();
    for dataset in &mut data {
        if dataset.municipality_id.trim().is_empty() {
            return Err(Error::validation("municipalityId", "must not be empty"));
        }
        if !ids.insert(dataset.municipality_id.clone()) {
            return Err(Error::validation(
                "municipalityId",
                format!("duplicate dataset for '{}'", dataset.municipality_id),
            ));
        }
        if !dataset.average_yield.is_finite() || dataset.average_yield < 0.0 {
            return Err(Error::validation(
                "averageYield",
                format!("invalid average for '{}'", dataset.municipality_id),
            ));
        }

        dataset.historical_data.sort_by_key(|r| r.year);
        for pair in dataset.historical_data.windows(2) {
            if pair[0].year == pair[1].year {
                return Err(Error::validation(
                    "year",
                    format!(
                        "year {} appears twice for '{}'",
                        pair[0].year, dataset.municipality_id
                    ),
                ));
            }
        }
        if let Some(bad) = dataset
            .historical_data
            .iter()
            .find(|r| !r.yield_value.is_finite() || r.yield_value < 0.0)
        {
            return Err(Error::validation(
                "yield",
                format!(
                    "{} for '{}' in {} is not a non-negative number",
                    bad.yield_value, dataset.municipality_id, bad.year
                ),
            ));
        }
    }
    Ok(data)
}

/// Combines `existing` and already-normalized `incoming` datasets.
#[must_use]
pub fn merge(
    existing: &[MunicipalityYieldData],
    incoming: Vec<MunicipalityYieldData>,
    mode: ImportMode,
) -> Vec<MunicipalityYieldData> {
    match mode {
        ImportMode::Replace => incoming,
        ImportMode::Append => {
            let mut merged: Vec<MunicipalityYieldData> = existing.to_vec();
            for dataset in incoming {
                if let Some(slot) = merged
                    .iter_mut()
                    .find(|d| d.municipality_id == dataset.municipality_id)
                {
                    *slot = dataset;
                } else {
                    merged.push(dataset);
                }
            }
            merged
        }
    }
}

/// Renders datasets in the requested format.
pub fn export(data: &[MunicipalityYieldData], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(CSV_HEADER)?;
            for dataset in data {
                for record in &dataset.historical_data {
                    writer.write_record([
                        dataset.municipality_id.clone(),
                        record.year.to_string(),
                        record.yield_value.to_string(),
                        dataset.average_yield.to_string(),
                    ])?;
                }
            }
            let bytes = writer.into_inner().map_err(|e| Error::Export {
                message: e.to_string(),
            })?;
            String::from_utf8(bytes).map_err(|e| Error::Export {
                message: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::YieldRecord;
    use crate::test_utils::sample_yield_data;

    fn dataset(id: &str, records: &[(i32, f64)]) -> MunicipalityYieldData {
        MunicipalityYieldData {
            municipality_id: id.to_string(),
            historical_data: records
                .iter()
                .map(|&(year, yield_value)| YieldRecord { year, yield_value })
                .collect(),
            average_yield: 0.5,
        }
    }

    #[test]
    fn test_normalize_sorts_years() {
        let data = normalize(vec![dataset("alpha", &[(2022, 0.6), (2020, 0.4)])]).unwrap();
        let years: Vec<i32> = data[0].historical_data.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2020, 2022]);
    }

    #[test]
    fn test_normalize_rejects_bad_input() {
        let negative = normalize(vec![dataset("alpha", &[(2020, -0.1)])]);
        assert!(matches!(negative, Err(Error::Validation { field: "yield", .. })));

        let dup_year = normalize(vec![dataset("alpha", &[(2020, 0.1), (2020, 0.2)])]);
        assert!(matches!(dup_year, Err(Error::Validation { field: "year", .. })));

        let dup_id = normalize(vec![dataset("alpha", &[]), dataset("alpha", &[])]);
        assert!(matches!(
            dup_id,
            Err(Error::Validation {
                field: "municipalityId",
                ..
            })
        ));
    }

    #[test]
    fn test_merge_modes() {
        let existing = sample_yield_data();
        let incoming = vec![dataset("alpha", &[(2024, 0.9)]), dataset("gamma", &[])];

        let appended = merge(&existing, incoming.clone(), ImportMode::Append);
        assert_eq!(appended.len(), existing.len() + 1);
        let alpha = appended
            .iter()
            .find(|d| d.municipality_id == "alpha")
            .unwrap();
        assert_eq!(alpha.historical_data.len(), 1);
        assert!(appended.iter().any(|d| d.municipality_id == "beta"));

        let replaced = merge(&existing, incoming.clone(), ImportMode::Replace);
        assert_eq!(replaced, incoming);
    }

    #[test]
    fn test_export_csv() {
        let data = vec![dataset("alpha", &[(2020, 0.4), (2021, 0.6)])];
        let csv = export(&data, ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "MunicipalityID,Year,Yield,AverageYield",
                "alpha,2020,0.4,0.5",
                "alpha,2021,0.6,0.5",
            ]
        );
    }

    #[test]
    fn test_export_json_parses_back() {
        let data = sample_yield_data();
        let json = export(&data, ExportFormat::Json).unwrap();
        let parsed: Vec<MunicipalityYieldData> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, data);
    }
}
