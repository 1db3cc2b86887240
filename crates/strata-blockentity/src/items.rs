use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemMappingsError {
    #[error("failed to read item mappings {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("item mappings must be a JSON object of identifier to identifier: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source item identifier to destination item identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ItemMappings {
    entries: HashMap<String, String>,
}

impl ItemMappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self, ItemMappingsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ItemMappingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| ItemMappingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mappings = Self::from_json(&text)?;
        log::debug!("loaded {} item mappings from {}", mappings.len(), path.display());
        Ok(mappings)
    }

    pub fn insert(&mut self, source: impl Into<String>, destination: impl Into<String>) {
        self.entries.insert(source.into(), destination.into());
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>, D: Into<String>> FromIterator<(S, D)> for ItemMappings {
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(source, destination)| (source.into(), destination.into()))
                .collect(),
        }
    }
}
