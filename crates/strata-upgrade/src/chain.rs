use std::path::{Path, PathBuf};

use strata_nbt::CompoundTag;
use thiserror::Error;
use walkdir::WalkDir;

use crate::compile::{Schema, SchemaFormatError, compile};
use crate::config::ChainConfig;
use crate::model::RuleDocument;
use crate::state::StateRecord;
use crate::version::SchemaVersion;

#[derive(Debug, Error)]
pub enum ChainLoadError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to walk schema directory {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("invalid rule document {path:?}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaFormatError,
    },
}

/// Compiled schemas in ascending version order.
///
/// Immutable once built; share it behind `&` or `Arc` across workers.
#[derive(Debug, Clone, Default)]
pub struct SchemaChain {
    schemas: Vec<Schema>,
}

impl SchemaChain {
    /// Orders `schemas` by version. Schemas with equal versions keep their given order.
    pub fn new(mut schemas: Vec<Schema>) -> Self {
        schemas.sort_by_key(Schema::version);
        Self { schemas }
    }

    pub fn from_documents<'a>(
        documents: impl IntoIterator<Item = &'a RuleDocument>,
    ) -> Result<Self, SchemaFormatError> {
        let schemas = documents
            .into_iter()
            .map(compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(schemas))
    }

    /// Loads every `*.json` rule document under `config.schema_dir`, in file-name order.
    pub fn load_dir(config: &ChainConfig) -> Result<Self, ChainLoadError> {
        let root = config.schema_dir.as_path();
        let mut schemas = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|source| ChainLoadError::Walk {
                path: root.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_rule_document(path) {
                continue;
            }
            schemas.push(load_file(path)?);
        }

        let mut chain = Self::new(schemas);
        if let Some(max) = config.max_version {
            let before = chain.len();
            chain.schemas.retain(|schema| schema.version() <= max);
            let dropped = before - chain.len();
            if dropped > 0 {
                log::info!("skipped {dropped} upgrade schemas newer than {max}");
            }
        }
        log::info!(
            "loaded {} block state upgrade schemas from {}",
            chain.len(),
            root.display()
        );
        Ok(chain)
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Version of the newest schema in the chain.
    pub fn latest_version(&self) -> Option<SchemaVersion> {
        self.schemas.last().map(Schema::version)
    }

    /// Brings `record` up to date with every schema newer than `source_version`.
    ///
    /// Returns the version the record conforms to afterwards.
    pub fn upgrade(&self, record: &mut StateRecord, source_version: SchemaVersion) -> SchemaVersion {
        record.normalize();
        record.pending_rename = None;
        let start = self
            .schemas
            .partition_point(|schema| schema.version() <= source_version);
        let mut version = source_version;
        for schema in &self.schemas[start..] {
            schema.apply(record);
            version = schema.version();
        }
        version
    }

    /// Upgrades a block-state tag in place (`name`, `states`, packed `version`).
    ///
    /// A tag without a string `name` is left untouched and `None` is returned.
    /// A missing `version` is treated as older than every schema, and is only
    /// added when at least one schema applied.
    pub fn upgrade_tag(&self, tag: &mut CompoundTag) -> Option<SchemaVersion> {
        let Some(mut record) = StateRecord::from_tag(tag) else {
            log::warn!("block state without a name cannot be upgraded");
            return None;
        };
        let packed = tag.get_int("version");
        let source = packed
            .map(|packed| SchemaVersion::from_packed(packed as u32))
            .unwrap_or_default();
        let version = self.upgrade(&mut record, source);
        record.write_to_tag(tag);
        if packed.is_some() || version != source {
            tag.put_int("version", version.to_packed() as i32);
        }
        Some(version)
    }
}

fn is_rule_document(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn load_file(path: &Path) -> Result<Schema, ChainLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| ChainLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let schema = Schema::from_json(&text).map_err(|source| ChainLoadError::Schema {
        path: path.to_path_buf(),
        source,
    })?;
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    log::debug!("loaded upgrade schema {} from {}", schema.version(), label);
    Ok(schema.with_label(label))
}
