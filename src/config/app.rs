//! Application configuration loaded from config.toml.
//!
//! Every section is optional; a missing file yields [`AppConfig::default`]. Secrets (bot token,
//! database URL, admin ids) come from the environment instead, see [`super::database`] and
//! [`super::admins`].

use super::defaults::Defaults;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// How `edit_municipality_name` treats the supplied name.
///
/// `Preserve` is for deployments where display names must stay fixed once published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditNamePolicy {
    /// Replace the display name with the supplied one
    #[default]
    Rename,
    /// Validate the id and persist, but keep the existing display name
    Preserve,
}

/// Admin behavior switches
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminSection {
    /// Edit behavior for municipality names
    #[serde(default)]
    pub edit_name_policy: EditNamePolicy,
    /// Optional seed file replacing the built-in defaults
    #[serde(default)]
    pub defaults_file: Option<PathBuf>,
}

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Admin data settings
    #[serde(default)]
    pub admin: AdminSection,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the TOML is invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
        let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
            message: format!("Failed to read config file {}: {e}", path_ref.display()),
        })?;
        Self::from_toml(&contents)
    }

    /// Loads configuration from `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if path_ref.exists() {
            Self::load(path_ref)
        } else {
            tracing::warn!(
                "No config file at {}, using default configuration",
                path_ref.display()
            );
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })
    }

    /// The configured seed, or the built-in one.
    pub fn defaults(&self) -> Result<Defaults> {
        self.admin
            .defaults_file
            .as_ref()
            .map_or_else(Defaults::builtin, Defaults::load)
    }
}

/// Path of the config file: `ANILYTICS_CONFIG` or `./config.toml`.
#[must_use]
pub fn config_path() -> PathBuf {
    std::env::var("ANILYTICS_CONFIG").map_or_else(|_| PathBuf::from("config.toml"), PathBuf::from)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_app_config() {
        let config = AppConfig::from_toml(
            r#"
            [admin]
            edit_name_policy = "preserve"
            defaults_file = "seed.toml"
        "#,
        )
        .unwrap();
        assert_eq!(config.admin.edit_name_policy, EditNamePolicy::Preserve);
        assert_eq!(config.admin.defaults_file, Some(PathBuf::from("seed.toml")));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.admin.edit_name_policy, EditNamePolicy::Rename);
        assert!(config.admin.defaults_file.is_none());
        assert_eq!(config.defaults().unwrap(), Defaults::builtin().unwrap());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = AppConfig::from_toml("[admin]\nedit_name_policy = \"guess\"\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = AppConfig::load_or_default("definitely/not/here/config.toml").unwrap();
        assert_eq!(config.admin.edit_name_policy, EditNamePolicy::Rename);
    }
}
