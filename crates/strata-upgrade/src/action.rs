use std::sync::Arc;

use indexmap::IndexMap;

use crate::state::{Properties, PropertyValue, StateRecord};

/// Outcome of applying one action to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    Continue,
    /// Skip the remaining rule actions of the current schema.
    StopSchema,
}

/// Shared old → new value table, referenced by name from many identifiers.
pub type ValueTable = Arc<[ValueRemap]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRemap {
    pub old: PropertyValue,
    pub new: PropertyValue,
}

/// Computes an identifier from the value of one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenRule {
    pub prefix: String,
    pub property: String,
    pub suffix: String,
    pub value_remaps: IndexMap<String, String>,
}

impl FlattenRule {
    /// `None` when the record has no value for the flattened property.
    pub fn resolve(&self, properties: &Properties) -> Option<String> {
        let value = properties.get(&self.property)?.to_string();
        let middle = self
            .value_remaps
            .get(&value)
            .map(String::as_str)
            .unwrap_or(value.as_str());
        Some(format!("{}{}{}", self.prefix, middle, self.suffix).to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameResolver {
    Literal(String),
    Flattened(FlattenRule),
}

impl NameResolver {
    pub fn resolve(&self, properties: &Properties) -> Option<String> {
        match self {
            NameResolver::Literal(name) => Some(name.clone()),
            NameResolver::Flattened(rule) => rule.resolve(properties),
        }
    }
}

/// One candidate replacement for a block identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapEntry {
    /// Properties that must be present with these exact values; others are unconstrained.
    pub old_state: Properties,
    pub new_state: Properties,
    pub copied_state: Vec<String>,
    pub name: NameResolver,
}

impl RemapEntry {
    pub fn matches(&self, properties: &Properties) -> bool {
        self.old_state
            .iter()
            .all(|(key, expected)| properties.get(key) == Some(expected))
    }
}

/// A compiled, data-only mutation. Every variant except the finalizer filters on the
/// record identifier as it was when the schema started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RemapStates {
        identifier: String,
        entries: Vec<RemapEntry>,
    },
    RenameIds {
        renames: IndexMap<String, String>,
    },
    Flatten {
        identifier: String,
        rule: FlattenRule,
    },
    AddProperties {
        identifier: String,
        properties: Properties,
    },
    RemoveProperties {
        identifier: String,
        properties: Vec<String>,
    },
    RemapPropertyValues {
        identifier: String,
        properties: IndexMap<String, ValueTable>,
    },
    RenameProperties {
        identifier: String,
        renames: IndexMap<String, String>,
    },
    ApplyPendingRename,
}

impl Action {
    pub fn category(&self) -> &'static str {
        match self {
            Action::RemapStates { .. } => "remappedStates",
            Action::RenameIds { .. } => "renamedIds",
            Action::Flatten { .. } => "flattenedProperties",
            Action::AddProperties { .. } => "addedProperties",
            Action::RemoveProperties { .. } => "removedProperties",
            Action::RemapPropertyValues { .. } => "remappedPropertyValues",
            Action::RenameProperties { .. } => "renamedProperties",
            Action::ApplyPendingRename => "applyPendingRename",
        }
    }

    pub fn is_finalizer(&self) -> bool {
        matches!(self, Action::ApplyPendingRename)
    }

    pub fn apply(&self, record: &mut StateRecord) -> ControlSignal {
        match self {
            Action::RemapStates {
                identifier,
                entries,
            } => remap_states(record, identifier, entries),
            Action::RenameIds { renames } => {
                if let Some(name) = renames.get(&record.identifier) {
                    record.pending_rename = Some(name.clone());
                }
                ControlSignal::Continue
            }
            Action::Flatten { identifier, rule } => {
                if record.identifier != *identifier {
                    return ControlSignal::Continue;
                }
                if let Some(properties) = record.properties.as_mut()
                    && let Some(name) = rule.resolve(properties)
                {
                    record.pending_rename = Some(name);
                    properties.shift_remove(&rule.property);
                }
                ControlSignal::Continue
            }
            Action::AddProperties {
                identifier,
                properties: added,
            } => {
                if let Some(properties) = matching_properties(record, identifier) {
                    for (key, value) in added {
                        properties.insert(key.clone(), value.clone());
                    }
                }
                ControlSignal::Continue
            }
            Action::RemoveProperties {
                identifier,
                properties: removed,
            } => {
                if let Some(properties) = matching_properties(record, identifier) {
                    for key in removed {
                        properties.shift_remove(key);
                    }
                }
                ControlSignal::Continue
            }
            Action::RemapPropertyValues {
                identifier,
                properties: tables,
            } => {
                if let Some(properties) = matching_properties(record, identifier) {
                    for (key, table) in tables {
                        remap_value(properties, key, table);
                    }
                }
                ControlSignal::Continue
            }
            Action::RenameProperties {
                identifier,
                renames,
            } => {
                if let Some(properties) = matching_properties(record, identifier) {
                    for (old, new) in renames {
                        if let Some(value) = properties.shift_remove(old) {
                            properties.insert(new.clone(), value);
                        }
                    }
                }
                ControlSignal::Continue
            }
            Action::ApplyPendingRename => {
                record.apply_pending_rename();
                ControlSignal::Continue
            }
        }
    }
}

fn matching_properties<'a>(
    record: &'a mut StateRecord,
    identifier: &str,
) -> Option<&'a mut Properties> {
    if record.identifier != identifier {
        return None;
    }
    record.properties.as_mut()
}

fn remap_states(record: &mut StateRecord, identifier: &str, entries: &[RemapEntry]) -> ControlSignal {
    if record.identifier != identifier {
        return ControlSignal::Continue;
    }
    let Some(current) = record.properties.as_ref() else {
        return ControlSignal::Continue;
    };
    let Some(entry) = entries.iter().find(|entry| entry.matches(current)) else {
        return ControlSignal::Continue;
    };

    let mut replacement = entry.new_state.clone();
    for key in &entry.copied_state {
        if let Some(value) = current.get(key) {
            replacement.insert(key.clone(), value.clone());
        }
    }
    if let Some(name) = entry.name.resolve(current) {
        record.pending_rename = Some(name);
    }
    record.properties = Some(replacement);
    ControlSignal::StopSchema
}

// When a table lists the same old value twice, the later entry wins.
fn remap_value(properties: &mut Properties, key: &str, table: &[ValueRemap]) {
    let Some(current) = properties.get(key) else {
        return;
    };
    let replacement = table
        .iter()
        .rev()
        .find(|remap| remap.old == *current)
        .map(|remap| remap.new.clone());
    if let Some(value) = replacement {
        properties.insert(key.to_string(), value);
    }
}
