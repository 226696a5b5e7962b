//! JSON Schemas of the document format and of locate results.
//!
//! schemars emits draft-2020-12; the schemas printed by `textloc schema`
//! are rewritten to draft-07 so that older validators and editors accept
//! them:
//! - `$defs` → `definitions`, references updated accordingly
//! - nullable `anyOf` pairs collapsed into the non-null schema

use std::fmt;

use clap::ValueEnum;
use serde_json::{Map, Value};
use textloc_document::Document;
use textloc_locator::RankedMatch;

const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Which schema to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SchemaTarget {
    /// Input documents
    #[default]
    Document,
    /// The JSON array printed by `locate`
    Matches,
}

impl SchemaTarget {
    /// Generate the draft-07 schema.
    pub fn schema(&self) -> Value {
        let schema = match self {
            SchemaTarget::Document => schemars::schema_for!(Document),
            SchemaTarget::Matches => schemars::schema_for!(Vec<RankedMatch>),
        };
        SchemaTransformer::transform(schema.to_value())
    }
}

impl fmt::Display for SchemaTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaTarget::Document => f.write_str("document"),
            SchemaTarget::Matches => f.write_str("matches"),
        }
    }
}

/// Draft-2020-12 to draft-07 rewriting.
pub struct SchemaTransformer;

impl SchemaTransformer {
    /// Apply all rewrites and declare the draft-07 dialect.
    pub fn transform(mut schema: Value) -> Value {
        schema = Self::convert_defs_to_definitions(schema);
        schema = Self::simplify_nullable_anyof(schema);
        if let Some(obj) = schema.as_object_mut() {
            obj.insert("$schema".to_string(), Value::String(DRAFT_07.to_string()));
        }
        schema
    }

    fn convert_defs_to_definitions(mut schema: Value) -> Value {
        if let Some(obj) = schema.as_object_mut() {
            if let Some(defs) = obj.remove("$defs") {
                obj.insert("definitions".to_string(), defs);
            }
            Self::update_references(obj);
        }
        schema
    }

    fn update_references(value: &mut Map<String, Value>) {
        for (key, val) in value.iter_mut() {
            if key == "$ref" {
                if let Some(reference) = val.as_str().and_then(|r| r.strip_prefix("#/$defs/")) {
                    *val = Value::String(format!("#/definitions/{reference}"));
                }
                continue;
            }
            for nested in Self::nested_objects(val) {
                Self::update_references(nested);
            }
        }
    }

    fn simplify_nullable_anyof(mut schema: Value) -> Value {
        if let Some(obj) = schema.as_object_mut() {
            Self::simplify_anyof_in_object(obj);
        }
        schema
    }

    fn simplify_anyof_in_object(obj: &mut Map<String, Value>) {
        let simplified = match obj.get("anyOf") {
            Some(Value::Array(any_of)) => Self::try_simplify_anyof(any_of),
            _ => None,
        };
        if let Some(Value::Object(simplified)) = simplified {
            obj.remove("anyOf");
            obj.extend(simplified);
        }

        for val in obj.values_mut() {
            for nested in Self::nested_objects(val) {
                Self::simplify_anyof_in_object(nested);
            }
        }
    }

    /// `[{..}, {"type": "null"}]` in either order collapses to the non-null
    /// schema.
    fn try_simplify_anyof(any_of: &[Value]) -> Option<Value> {
        let [first, second] = any_of else {
            return None;
        };
        let (type_schema, null_schema) = if Self::is_null_type(second) {
            (first, second)
        } else if Self::is_null_type(first) {
            (second, first)
        } else {
            return None;
        };

        null_schema
            .as_object()
            .is_some_and(|o| o.len() == 1)
            .then(|| type_schema.clone())
    }

    fn is_null_type(schema: &Value) -> bool {
        schema.get("type").and_then(Value::as_str) == Some("null")
    }

    /// Objects directly inside `value`, itself or array items.
    fn nested_objects(value: &mut Value) -> Vec<&mut Map<String, Value>> {
        match value {
            Value::Object(obj) => vec![obj],
            Value::Array(items) => items.iter_mut().filter_map(Value::as_object_mut).collect(),
            _ => Vec::new(),
        }
    }
}
