use std::path::PathBuf;

use crate::version::{SchemaVersion, VersionParseError};

pub const SCHEMA_DIR_ENV: &str = "STRATA_SCHEMA_DIR";
pub const MAX_VERSION_ENV: &str = "STRATA_MAX_SCHEMA_VERSION";

#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Directory holding the `*.json` rule documents.
    pub schema_dir: PathBuf,
    /// Schemas newer than this are not loaded; `None` loads everything.
    pub max_version: Option<SchemaVersion>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from("block_state_upgrade_schema"),
            max_version: None,
        }
    }
}

impl ChainConfig {
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            ..Self::default()
        }
    }

    /// Build config from `STRATA_SCHEMA_DIR` / `STRATA_MAX_SCHEMA_VERSION`, falling back to defaults.
    pub fn from_env() -> Result<Self, VersionParseError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, VersionParseError> {
        let mut config = Self::default();
        if let Some(dir) = var(SCHEMA_DIR_ENV) {
            config.schema_dir = PathBuf::from(dir);
        }
        if let Some(version) = var(MAX_VERSION_ENV) {
            config.max_version = Some(version.parse()?);
        }
        Ok(config)
    }

    pub fn with_max_version(mut self, version: SchemaVersion) -> Self {
        self.max_version = Some(version);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_vars_give_defaults() {
        let config = ChainConfig::from_vars(|_| None).unwrap();
        assert_eq!(config.schema_dir, PathBuf::from("block_state_upgrade_schema"));
        assert!(config.max_version.is_none());
    }

    #[test]
    fn vars_override_dir_and_cap() {
        let config = ChainConfig::from_vars(|key| match key {
            SCHEMA_DIR_ENV => Some("/data/schemas".into()),
            MAX_VERSION_ENV => Some("1.21.0".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.schema_dir, PathBuf::from("/data/schemas"));
        assert_eq!(config.max_version, Some(SchemaVersion::new(1, 21, 0, 0)));
    }

    #[test]
    fn bad_cap_is_an_error() {
        let err = ChainConfig::from_vars(|key| (key == MAX_VERSION_ENV).then(|| "latest".into()))
            .unwrap_err();
        assert!(matches!(err, VersionParseError::ComponentCount(_)));
    }
}
