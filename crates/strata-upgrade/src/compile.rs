use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::action::{Action, ControlSignal, FlattenRule, NameResolver, RemapEntry, ValueRemap, ValueTable};
use crate::model::{FlattenedNameRule, RuleDocument, ValueLit};
use crate::state::{Properties, PropertyValue, StateRecord};
use crate::version::SchemaVersion;

/// Structural defect in a rule document, detected while compiling it.
#[derive(Debug, Error)]
pub enum SchemaFormatError {
    #[error("malformed rule document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no new name or flattened name specified for {identifier}")]
    MissingNewName { identifier: String },
    #[error("unknown value kind in {context} (expected one of int, byte, string)")]
    UnknownValueKind { context: String },
    #[error("{identifier} property {property} references unknown value lookup '{lookup}'")]
    UnknownLookup {
        identifier: String,
        property: String,
        lookup: String,
    },
}

/// One compiled rule document: a version plus its ordered action list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    version: SchemaVersion,
    actions: Vec<Action>,
    label: Option<String>,
}

impl Schema {
    /// Parses and compiles a JSON rule document.
    pub fn from_json(text: &str) -> Result<Self, SchemaFormatError> {
        let document: RuleDocument = serde_json::from_str(text)?;
        compile(&document)
    }

    /// Attaches a diagnostic label, usually the file the document came from.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Runs the action list against `record`.
    ///
    /// After a `StopSchema` the remaining rule actions are skipped, but the
    /// pending-rename finalizer still runs.
    pub fn apply(&self, record: &mut StateRecord) {
        let mut stopped = false;
        for action in &self.actions {
            if stopped && !action.is_finalizer() {
                continue;
            }
            if action.apply(record) == ControlSignal::StopSchema {
                stopped = true;
            }
        }
    }
}

/// Compiles a rule document into a [`Schema`].
///
/// Action groups are emitted in a fixed order: remapped states, renamed ids,
/// flattened properties, added properties, removed properties, remapped property
/// values, renamed properties, and finally the pending-rename finalizer.
pub fn compile(document: &RuleDocument) -> Result<Schema, SchemaFormatError> {
    let version = SchemaVersion::new(
        document.max_version_major,
        document.max_version_minor,
        document.max_version_patch,
        document.max_version_revision,
    );
    let lookups = compile_lookups(document)?;
    let mut actions = Vec::new();

    for (identifier, rules) in &document.remapped_states {
        let identifier = identifier.to_lowercase();
        let mut entries = Vec::with_capacity(rules.len());
        for rule in rules {
            let name = if let Some(new_name) = &rule.new_name {
                NameResolver::Literal(new_name.to_lowercase())
            } else if let Some(flattened) = &rule.new_flattened_name {
                NameResolver::Flattened(flatten_rule(flattened))
            } else {
                return Err(SchemaFormatError::MissingNewName { identifier });
            };
            entries.push(RemapEntry {
                old_state: property_literals(rule.old_state.as_ref(), &identifier, "oldState")?,
                new_state: property_literals(rule.new_state.as_ref(), &identifier, "newState")?,
                copied_state: rule.copied_state.clone(),
                name,
            });
        }
        actions.push(Action::RemapStates {
            identifier,
            entries,
        });
    }

    if !document.renamed_ids.is_empty() {
        let renames = document
            .renamed_ids
            .iter()
            .map(|(old, new)| (old.to_lowercase(), new.to_lowercase()))
            .collect();
        actions.push(Action::RenameIds { renames });
    }

    for (identifier, rule) in &document.flattened_properties {
        actions.push(Action::Flatten {
            identifier: identifier.to_lowercase(),
            rule: flatten_rule(rule),
        });
    }

    for (identifier, added) in &document.added_properties {
        let identifier = identifier.to_lowercase();
        let properties = property_literals(Some(added), &identifier, "addedProperties")?;
        actions.push(Action::AddProperties {
            identifier,
            properties,
        });
    }

    for (identifier, removed) in &document.removed_properties {
        actions.push(Action::RemoveProperties {
            identifier: identifier.to_lowercase(),
            properties: removed.clone(),
        });
    }

    for (identifier, remapped) in &document.remapped_property_values {
        let identifier = identifier.to_lowercase();
        let mut properties = IndexMap::with_capacity(remapped.len());
        for (property, lookup) in remapped {
            let table = lookups
                .get(lookup.as_str())
                .ok_or_else(|| SchemaFormatError::UnknownLookup {
                    identifier: identifier.clone(),
                    property: property.clone(),
                    lookup: lookup.clone(),
                })?;
            properties.insert(property.clone(), Arc::clone(table));
        }
        actions.push(Action::RemapPropertyValues {
            identifier,
            properties,
        });
    }

    for (identifier, renames) in &document.renamed_properties {
        actions.push(Action::RenameProperties {
            identifier: identifier.to_lowercase(),
            renames: renames.clone(),
        });
    }

    // Identifier changes land last; every rule above matches on the old name.
    actions.push(Action::ApplyPendingRename);

    log::debug!("compiled schema {} with {} actions", version, actions.len());
    Ok(Schema {
        version,
        actions,
        label: None,
    })
}

fn compile_lookups(document: &RuleDocument) -> Result<HashMap<&str, ValueTable>, SchemaFormatError> {
    let mut lookups = HashMap::with_capacity(document.remapped_property_values_index.len());
    for (name, remaps) in &document.remapped_property_values_index {
        let context = format!("remappedPropertyValuesIndex.{name}");
        let table = remaps
            .iter()
            .map(|remap| {
                Ok(ValueRemap {
                    old: value_literal(&remap.old, &context)?,
                    new: value_literal(&remap.new, &context)?,
                })
            })
            .collect::<Result<Vec<_>, SchemaFormatError>>()?;
        lookups.insert(name.as_str(), ValueTable::from(table));
    }
    Ok(lookups)
}

fn flatten_rule(rule: &FlattenedNameRule) -> FlattenRule {
    FlattenRule {
        prefix: rule.prefix.clone(),
        property: rule.flattened_property.clone(),
        suffix: rule.suffix.clone(),
        value_remaps: rule
            .flattened_value_remaps
            .iter()
            .flatten()
            .map(|(from, to)| (from.to_lowercase(), to.clone()))
            .collect(),
    }
}

fn property_literals(
    literals: Option<&IndexMap<String, ValueLit>>,
    identifier: &str,
    section: &str,
) -> Result<Properties, SchemaFormatError> {
    let Some(literals) = literals else {
        return Ok(Properties::new());
    };
    literals
        .iter()
        .map(|(key, literal)| {
            let context = format!("{identifier} {section}.{key}");
            Ok((key.clone(), value_literal(literal, &context)?))
        })
        .collect()
}

// Kinds are checked in int, byte, string order.
fn value_literal(literal: &ValueLit, context: &str) -> Result<PropertyValue, SchemaFormatError> {
    let value = if let Some(value) = literal.int {
        PropertyValue::Int(value)
    } else if let Some(value) = literal.byte {
        PropertyValue::Byte(value)
    } else if let Some(value) = &literal.string {
        PropertyValue::String(value.clone())
    } else {
        return Err(SchemaFormatError::UnknownValueKind {
            context: context.to_string(),
        });
    };
    Ok(value.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Raw text keeps key order; a `json!` map would sort it.
    fn document(body: &str) -> RuleDocument {
        let separator = if body.trim().is_empty() { "" } else { "," };
        serde_json::from_str(&format!(
            r#"{{"maxVersionMajor": 1, "maxVersionMinor": 20, "maxVersionPatch": 10, "maxVersionRevision": 1{separator}{body}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn empty_document_compiles_to_finalizer_only() {
        let schema = compile(&document("")).unwrap();
        assert_eq!(schema.version(), SchemaVersion::new(1, 20, 10, 1));
        assert_eq!(schema.actions(), &[Action::ApplyPendingRename]);
    }

    #[test]
    fn categories_are_emitted_in_fixed_order() {
        let schema = compile(&document(r#"
            "renamedProperties": {"x:a": {"a": "b"}},
            "remappedPropertyValues": {"x:a": {"f": "t"}},
            "remappedPropertyValuesIndex": {"t": [{"old": {"int": 1}, "new": {"int": 2}}]},
            "removedProperties": {"x:a": ["r"]},
            "addedProperties": {"x:a": {"n": {"byte": 1}}},
            "flattenedProperties": {"x:a": {"prefix": "x:", "flattenedProperty": "c", "suffix": ""}},
            "renamedIds": {"x:b": "x:c"},
            "remappedStates": {"x:d": [{"newName": "x:e"}]}
        "#))
        .unwrap();
        let categories: Vec<_> = schema.actions().iter().map(Action::category).collect();
        assert_eq!(
            categories,
            vec![
                "remappedStates",
                "renamedIds",
                "flattenedProperties",
                "addedProperties",
                "removedProperties",
                "remappedPropertyValues",
                "renamedProperties",
                "applyPendingRename",
            ]
        );
    }

    #[test]
    fn identifiers_names_and_string_literals_are_lowercased() {
        let schema = compile(&document(r#"
            "remappedStates": {"X:Door": [{
                "oldState": {"Facing": {"string": "NORTH"}},
                "newName": "X:New_Door"
            }]},
            "renamedIds": {"X:Old": "X:NEW"}
        "#))
        .unwrap();
        match &schema.actions()[0] {
            Action::RemapStates {
                identifier,
                entries,
            } => {
                assert_eq!(identifier, "x:door");
                assert_eq!(entries[0].name, NameResolver::Literal("x:new_door".into()));
                assert_eq!(entries[0].old_state["Facing"], PropertyValue::from("north"));
            }
            other => panic!("unexpected {other:?}"),
        }
        match &schema.actions()[1] {
            Action::RenameIds { renames } => assert_eq!(renames["x:old"], "x:new"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn remap_entry_without_any_name_is_rejected() {
        let err = compile(&document(r#"
            "remappedStates": {"minecraft:Torch": [
                {"newName": "minecraft:torch"},
                {"oldState": {"a": {"int": 1}}, "newState": {}}
            ]}
        "#))
        .unwrap_err();
        assert!(
            matches!(err, SchemaFormatError::MissingNewName { ref identifier } if identifier == "minecraft:torch")
        );
        assert!(err.to_string().contains("minecraft:torch"));
    }

    #[test]
    fn literal_without_known_kind_is_rejected() {
        let err = compile(&document(r#"
            "addedProperties": {"x:a": {"n": {"long": 1}}}
        "#))
        .unwrap_err();
        assert!(
            matches!(err, SchemaFormatError::UnknownValueKind { ref context } if context.contains("x:a"))
        );

        let err = compile(&document(r#"
            "remappedPropertyValuesIndex": {"t": [{"old": {"int": 1}, "new": {}}]}
        "#))
        .unwrap_err();
        assert!(matches!(err, SchemaFormatError::UnknownValueKind { .. }));
    }

    #[test]
    fn literal_kind_precedence_is_int_then_byte_then_string() {
        let schema = compile(&document(r#"
            "addedProperties": {"x:a": {"n": {"string": "s", "byte": 2, "int": 1}, "m": {"string": "s", "byte": 2}}}
        "#))
        .unwrap();
        match &schema.actions()[0] {
            Action::AddProperties { properties, .. } => {
                assert_eq!(properties["n"], PropertyValue::Int(1));
                assert_eq!(properties["m"], PropertyValue::Byte(2));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_lookup_is_rejected() {
        let err = compile(&document(r#"
            "remappedPropertyValues": {"x:a": {"facing": "nope"}}
        "#))
        .unwrap_err();
        assert!(
            matches!(err, SchemaFormatError::UnknownLookup { ref lookup, .. } if lookup == "nope")
        );
    }

    #[test]
    fn lookup_tables_are_shared_between_identifiers() {
        let schema = compile(&document(r#"
            "remappedPropertyValuesIndex": {"t": [{"old": {"int": 1}, "new": {"int": 2}}]},
            "remappedPropertyValues": {"x:a": {"f": "t"}, "x:b": {"g": "t"}}
        "#))
        .unwrap();
        let tables: Vec<_> = schema
            .actions()
            .iter()
            .filter_map(|action| match action {
                Action::RemapPropertyValues { properties, .. } => properties.values().next().cloned(),
                _ => None,
            })
            .collect();
        assert_eq!(tables.len(), 2);
        assert!(Arc::ptr_eq(&tables[0], &tables[1]));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            Schema::from_json("{\"maxVersionMajor\": 1"),
            Err(SchemaFormatError::Malformed(_))
        ));
        assert!(matches!(
            Schema::from_json("{\"maxVersionMajor\": 1}"),
            Err(SchemaFormatError::Malformed(_))
        ));
    }

    #[test]
    fn document_order_survives_into_actions() {
        let schema = Schema::from_json(
            r#"{
              "maxVersionMajor": 1, "maxVersionMinor": 0, "maxVersionPatch": 0, "maxVersionRevision": 0,
              "remappedStates": {
                "x:z": [{"newName": "x:from_z"}],
                "x:a": [{"newName": "x:from_a"}]
              },
              "renamedProperties": {
                "x:z": {"p": "q"},
                "x:a": {"a": "b", "b": "c"}
              }
            }"#,
        )
        .unwrap();
        let identifiers: Vec<_> = schema
            .actions()
            .iter()
            .filter_map(|action| match action {
                Action::RemapStates { identifier, .. } | Action::RenameProperties { identifier, .. } => {
                    Some(identifier.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(identifiers, vec!["x:z", "x:a", "x:z", "x:a"]);

        let mut record = StateRecord::new("x:a").with_property("a", 1);
        let rename = schema
            .actions()
            .iter()
            .find(|action| matches!(action, Action::RenameProperties { identifier, .. } if identifier == "x:a"))
            .unwrap();
        rename.apply(&mut record);
        // a -> b runs before b -> c, so the value ends up under c.
        assert_eq!(record.property("c"), Some(&PropertyValue::Int(1)));
        assert_eq!(record.properties.as_ref().map(|p| p.len()), Some(1));
    }

    #[test]
    fn rules_match_on_identifier_from_before_the_rename() {
        let schema = compile(&document(r#"
            "renamedIds": {"x:a": "x:renamed"},
            "removedProperties": {"x:a": ["gone"], "x:renamed": ["kept"]},
            "renamedProperties": {"x:a": {"old": "new"}}
        "#))
        .unwrap();
        let mut record = StateRecord::new("x:a")
            .with_property("gone", 1)
            .with_property("kept", 2)
            .with_property("old", 3);
        schema.apply(&mut record);
        assert_eq!(record.identifier, "x:renamed");
        assert_eq!(record.property("gone"), None);
        assert_eq!(record.property("kept"), Some(&PropertyValue::Int(2)));
        assert_eq!(record.property("new"), Some(&PropertyValue::Int(3)));
        assert!(record.pending_rename.is_none());
    }

    #[test]
    fn flatten_overrides_an_earlier_id_rename() {
        let schema = compile(&document(r#"
            "renamedIds": {"x:a": "x:renamed"},
            "flattenedProperties": {"x:a": {"prefix": "x:", "flattenedProperty": "kind", "suffix": "_a"}}
        "#))
        .unwrap();
        let mut record = StateRecord::new("x:a").with_property("kind", "big");
        schema.apply(&mut record);
        assert_eq!(record.identifier, "x:big_a");
    }

    #[test]
    fn stop_schema_skips_rules_but_still_applies_rename() {
        let schema = compile(&document(r#"
            "remappedStates": {"x:a": [{"oldState": {}, "newState": {"k": {"int": 1}}, "newName": "x:b"}]},
            "addedProperties": {"x:a": {"added": {"int": 9}}}
        "#))
        .unwrap();
        let mut record = StateRecord::new("x:a").with_property("z", 0);
        schema.apply(&mut record);
        assert_eq!(record.identifier, "x:b");
        assert!(record.pending_rename.is_none());
        assert_eq!(record.property("added"), None);
        assert_eq!(record.property("k"), Some(&PropertyValue::Int(1)));
    }
}
