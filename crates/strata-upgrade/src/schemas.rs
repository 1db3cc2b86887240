//! Embedded JSON Schema documents describing the rule document format.

pub const RULE_DOCUMENT: &str = include_str!("../schemas/rule-document.schema.json");
