//! Serde model of one block-state upgrade rule document.
//!
//! Every map is an `IndexMap` so document order survives parsing; the compiler
//! relies on it for first-match-wins semantics.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type Identifier = String;
pub type PropertyName = String;
pub type LookupName = String;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDocument {
    pub max_version_major: u8,
    pub max_version_minor: u8,
    pub max_version_patch: u8,
    pub max_version_revision: u8,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub remapped_property_values_index: IndexMap<LookupName, Vec<ValueRemapLit>>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub remapped_states: IndexMap<Identifier, Vec<RemappedStateRule>>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub renamed_ids: IndexMap<Identifier, Identifier>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub flattened_properties: IndexMap<Identifier, FlattenedNameRule>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub added_properties: IndexMap<Identifier, IndexMap<PropertyName, ValueLit>>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub removed_properties: IndexMap<Identifier, Vec<PropertyName>>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub remapped_property_values: IndexMap<Identifier, IndexMap<PropertyName, LookupName>>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub renamed_properties: IndexMap<Identifier, IndexMap<PropertyName, PropertyName>>,
}

/// Property value literal: exactly one of `{"int": ..}`, `{"byte": ..}`, `{"string": ..}`.
///
/// Parsed permissively; the compiler rejects literals with no recognised kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueLit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte: Option<i8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
}

impl ValueLit {
    pub fn int(value: i32) -> Self {
        Self {
            int: Some(value),
            ..Self::default()
        }
    }

    pub fn byte(value: i8) -> Self {
        Self {
            byte: Some(value),
            ..Self::default()
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self {
            string: Some(value.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueRemapLit {
    pub old: ValueLit,
    pub new: ValueLit,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemappedStateRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_state: Option<IndexMap<PropertyName, ValueLit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_state: Option<IndexMap<PropertyName, ValueLit>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub copied_state: Vec<PropertyName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_flattened_name: Option<FlattenedNameRule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedNameRule {
    pub prefix: String,
    pub flattened_property: PropertyName,
    pub suffix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flattened_value_remaps: Option<IndexMap<String, String>>,
}
