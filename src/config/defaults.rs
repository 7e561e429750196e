//! Built-in reference data.
//!
//! The seed lives in `defaults.toml` at the crate root and is embedded into the binary, so
//! "reset to defaults" never depends on the filesystem. A deployment can point
//! `defaults_file` in config.toml at its own seed instead.

use crate::{
    errors::{Error, Result},
    models::{AdminSettings, Municipality, MunicipalityYieldData, YieldRecord},
};
use serde::Deserialize;
use std::path::Path;

const BUILTIN_SEED: &str = include_str!("../../defaults.toml");

/// Structure of the seed file
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    settings: Option<SeedSettings>,
    municipalities: Vec<SeedMunicipality>,
}

#[derive(Debug, Deserialize)]
struct SeedSettings {
    max_compare_municipalities: u32,
    performance_threshold: u32,
    enable_smoothing_by_default: bool,
}

#[derive(Debug, Deserialize)]
struct SeedMunicipality {
    id: String,
    display_name: String,
    color: String,
    #[serde(default)]
    history: Vec<SeedYield>,
}

#[derive(Debug, Deserialize)]
struct SeedYield {
    year: i32,
    #[serde(rename = "yield")]
    yield_value: f64,
}

/// The default settings, municipality list, and yield data.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    /// Default settings record
    pub settings: AdminSettings,
    /// Default active municipalities
    pub municipalities: Vec<Municipality>,
    /// One dataset per default municipality, years ascending
    pub yield_data: Vec<MunicipalityYieldData>,
}

impl Defaults {
    /// The seed compiled into the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_SEED)
    }

    /// Loads a seed from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        tracing::debug!("Loading defaults seed from: {:?}", path_ref);
        let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
            message: format!("Failed to read defaults file {}: {e}", path_ref.display()),
        })?;
        Self::from_toml(&contents)
    }

    /// Parses a seed from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let seed: SeedFile = toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse defaults seed: {e}"),
        })?;

        let settings = seed.settings.map_or_else(AdminSettings::default, |s| AdminSettings {
            max_compare_municipalities: s.max_compare_municipalities,
            performance_threshold: s.performance_threshold,
            enable_smoothing_by_default: s.enable_smoothing_by_default,
        });
        crate::core::settings::validate(&settings)?;

        let mut municipalities = Vec::with_capacity(seed.municipalities.len());
        let mut yield_data = Vec::with_capacity(seed.municipalities.len());
        for entry in seed.municipalities {
            if municipalities.iter().any(|m: &Municipality| m.id == entry.id) {
                return Err(Error::Config {
                    message: format!("Duplicate municipality id in defaults seed: {}", entry.id),
                });
            }

            let mut historical_data: Vec<YieldRecord> = entry
                .history
                .into_iter()
                .map(|y| YieldRecord {
                    year: y.year,
                    yield_value: y.yield_value,
                })
                .collect();
            historical_data.sort_by_key(|r| r.year);

            let mut data = MunicipalityYieldData {
                municipality_id: entry.id.clone(),
                historical_data,
                average_yield: 0.0,
            };
            data.average_yield = data.computed_average();

            municipalities.push(Municipality {
                id: entry.id,
                display_name: entry.display_name,
                color: entry.color,
            });
            yield_data.push(data);
        }

        Ok(Self {
            settings,
            municipalities,
            yield_data,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_builtin_seed_parses() {
        let defaults = Defaults::builtin().unwrap();
        assert_eq!(defaults.settings, AdminSettings::default());
        assert_eq!(defaults.municipalities.len(), 8);
        assert_eq!(defaults.yield_data.len(), defaults.municipalities.len());

        for (m, data) in defaults.municipalities.iter().zip(&defaults.yield_data) {
            assert_eq!(m.id, data.municipality_id);
            assert!(m.color.starts_with('#'));
            assert!(data.historical_data.windows(2).all(|w| w[0].year < w[1].year));
        }
    }

    #[test]
    fn test_seed_sorts_history_and_computes_average() {
        let defaults = Defaults::from_toml(
            r##"
            [[municipalities]]
            id = "alpha"
            display_name = "Alpha"
            color = "#000000"
            history = [
                { year = 2021, yield = 0.6 },
                { year = 2020, yield = 0.4 },
            ]
            "##,
        )
        .unwrap();

        assert_eq!(defaults.settings, AdminSettings::default());
        let data = &defaults.yield_data[0];
        assert_eq!(data.historical_data[0].year, 2020);
        assert_eq!(data.average_yield, 0.5);
    }

    #[test]
    fn test_seed_rejects_duplicates_and_bad_settings() {
        let duplicate = r##"
            [[municipalities]]
            id = "alpha"
            display_name = "Alpha"
            color = "#000000"

            [[municipalities]]
            id = "alpha"
            display_name = "Alpha Again"
            color = "#111111"
        "##;
        assert!(matches!(
            Defaults::from_toml(duplicate),
            Err(Error::Config { .. })
        ));

        let bad_settings = r"
            municipalities = []

            [settings]
            max_compare_municipalities = 4
            performance_threshold = 9
            enable_smoothing_by_default = true
        ";
        assert!(matches!(
            Defaults::from_toml(bad_settings),
            Err(Error::Validation {
                field: "performanceThreshold",
                ..
            })
        ));
    }
}
