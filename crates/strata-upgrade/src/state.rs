use std::fmt;

use indexmap::IndexMap;
use strata_nbt::{CompoundTag, Tag};

/// Ordered block-state property map.
pub type Properties = IndexMap<String, PropertyValue>;

/// Value of a single block-state property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    Int(i32),
    Byte(i8),
    String(String),
}

impl PropertyValue {
    /// Lowercases string payloads; numeric values are returned as-is.
    pub fn normalized(self) -> Self {
        match self {
            PropertyValue::String(value) => PropertyValue::String(value.to_lowercase()),
            other => other,
        }
    }

    pub fn from_tag(tag: &Tag) -> Option<Self> {
        match tag {
            Tag::Int(value) => Some(PropertyValue::Int(*value)),
            Tag::Byte(value) => Some(PropertyValue::Byte(*value)),
            Tag::String(value) => Some(PropertyValue::String(value.clone())),
            _ => None,
        }
    }
}

/// Renders the raw payload (`1`, `true`, `north`), which is what flattened names embed.
impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Int(value) => write!(f, "{value}"),
            PropertyValue::Byte(value) => write!(f, "{value}"),
            PropertyValue::String(value) => f.write_str(value),
        }
    }
}

impl From<PropertyValue> for Tag {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::Int(value) => Tag::Int(value),
            PropertyValue::Byte(value) => Tag::Byte(value),
            PropertyValue::String(value) => Tag::String(value),
        }
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<i8> for PropertyValue {
    fn from(value: i8) -> Self {
        PropertyValue::Byte(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

/// One block variant being migrated: identifier, optional property map, and the
/// rename deferred until the end of the schema currently being applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateRecord {
    pub identifier: String,
    pub properties: Option<Properties>,
    pub pending_rename: Option<String>,
}

impl StateRecord {
    /// Record with an empty property map.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            properties: Some(Properties::new()),
            pending_rename: None,
        }
    }

    /// Record that carries no property map at all.
    pub fn without_properties(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            properties: None,
            pending_rename: None,
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.as_ref()?.get(name)
    }

    /// Lowercases the identifier and every string property value.
    pub fn normalize(&mut self) {
        self.identifier = self.identifier.to_lowercase();
        if let Some(properties) = self.properties.as_mut() {
            for value in properties.values_mut() {
                if let PropertyValue::String(text) = value {
                    *text = text.to_lowercase();
                }
            }
        }
    }

    /// Moves the pending rename, if any, onto the identifier.
    pub fn apply_pending_rename(&mut self) {
        if let Some(name) = self.pending_rename.take() {
            self.identifier = name;
        }
    }

    /// Reads a block-state tag (`name` plus optional `states` compound).
    ///
    /// Returns `None` when `name` is missing or not a string. State entries of kinds
    /// other than int/byte/string are dropped with a warning.
    pub fn from_tag(tag: &CompoundTag) -> Option<Self> {
        let identifier = tag.get_string("name")?.to_string();
        let properties = tag.get_compound("states").map(|states| {
            let mut properties = Properties::with_capacity(states.len());
            for (key, value) in states {
                match PropertyValue::from_tag(value) {
                    Some(value) => {
                        properties.insert(key.clone(), value);
                    }
                    None => log::warn!(
                        "dropping {} state '{}' of block {}",
                        value.kind(),
                        key,
                        identifier
                    ),
                }
            }
            properties
        });
        Some(Self {
            identifier,
            properties,
            pending_rename: None,
        })
    }

    /// Writes `name` and `states` back onto a block-state tag.
    pub fn write_to_tag(&self, tag: &mut CompoundTag) {
        tag.put_string("name", self.identifier.clone());
        match &self.properties {
            Some(properties) => {
                let states: CompoundTag = properties
                    .iter()
                    .map(|(key, value)| (key.clone(), Tag::from(value.clone())))
                    .collect();
                tag.put("states", states);
            }
            None => {
                tag.remove("states");
            }
        }
    }
}
