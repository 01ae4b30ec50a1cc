// Copyright 2025 Bench Catalog Contributors
// SPDX-License-Identifier: Apache-2.0

//! Suggested fields derived from a benchmark's JSON schema.
//!
//! Benchmark authors flag interesting payload fields with
//! `"suggestToUser": true`. The catalog offers those fields as ready-made
//! key paths for filters, custom columns and diagram axes.
//!
//! ```json
//! {
//!   "properties": {
//!     "score":   { "type": "number", "suggestToUser": true },
//!     "machine": {
//!       "type": "object",
//!       "properties": {
//!         "cores": { "type": "integer", "suggestToUser": true,
//!                    "description": "Physical cores" }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! yields `score` and `machine.cores`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::keypath::KeyPath;

/// Schema keyword marking a field as suggestible.
pub const SUGGEST_FLAG: &str = "suggestToUser";

/// A field offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Path from the payload root to the field.
    pub field: KeyPath,
    /// Schema description of the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Walk `schema` and collect every suggestible leaf.
///
/// Properties are visited depth first in declaration order. A property with
/// its own `properties` object is descended into; any other property
/// contributes only when it carries `suggestToUser: true`. A schema without a
/// root `properties` object yields no suggestions.
pub fn derive_suggestions(schema: &Value) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    match properties_of(schema) {
        Some(properties) => collect(properties, None, &mut suggestions),
        None => debug!("Benchmark schema has no root properties"),
    }
    suggestions
}

fn properties_of(node: &Value) -> Option<&Map<String, Value>> {
    node.get("properties")?.as_object()
}

fn collect(
    properties: &Map<String, Value>,
    prefix: Option<&KeyPath>,
    out: &mut Vec<Suggestion>,
) {
    for (key, field) in properties {
        let path = match prefix {
            Some(parent) => parent.child(key),
            None => KeyPath::segment(key),
        };
        let path = match path {
            Ok(path) => path,
            Err(err) => {
                debug!(property = %key, error = %err, "Skipping schema property");
                continue;
            }
        };

        if let Some(children) = properties_of(field) {
            collect(children, Some(&path), out);
        } else if field.get(SUGGEST_FLAG).and_then(Value::as_bool) == Some(true) {
            out.push(Suggestion {
                field: path,
                description: field
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            });
        }
    }
}

/// Suggestions for one benchmark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SuggestionSet {
    suggestions: Vec<Suggestion>,
}

impl SuggestionSet {
    /// Derive the set from a benchmark schema.
    pub fn from_schema(schema: &Value) -> Self {
        Self {
            suggestions: derive_suggestions(schema),
        }
    }

    /// No suggested fields. A normal state, not an error.
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Number of suggestions.
    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    /// Whether `path` is one of the suggested fields.
    pub fn contains(&self, path: &KeyPath) -> bool {
        self.suggestions.iter().any(|s| &s.field == path)
    }

    /// Suggestions in schema order.
    pub fn iter(&self) -> std::slice::Iter<'_, Suggestion> {
        self.suggestions.iter()
    }

    /// The suggestions as a slice.
    pub fn as_slice(&self) -> &[Suggestion] {
        &self.suggestions
    }
}

impl<'a> IntoIterator for &'a SuggestionSet {
    type Item = &'a Suggestion;
    type IntoIter = std::slice::Iter<'a, Suggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.field.as_str()).collect()
    }

    #[test]
    fn test_nested_schema_in_declaration_order() {
        let schema = json!({
            "properties": {
                "x": {"type": "number", "suggestToUser": true},
                "y": {"type": "object", "properties": {
                    "z": {"type": "number", "suggestToUser": true}
                }}
            }
        });
        let suggestions = derive_suggestions(&schema);
        assert_eq!(fields(&suggestions), vec!["x", "y.z"]);
        assert!(suggestions.iter().all(|s| s.description.is_none()));
    }

    #[test]
    fn test_declaration_order_is_not_alphabetical() {
        let schema = json!({
            "properties": {
                "zeta": {"suggestToUser": true},
                "alpha": {"suggestToUser": true},
                "mid": {"properties": {"b": {"suggestToUser": true}, "a": {"suggestToUser": true}}}
            }
        });
        assert_eq!(
            fields(&derive_suggestions(&schema)),
            vec!["zeta", "alpha", "mid.b", "mid.a"]
        );
    }

    #[test]
    fn test_unflagged_fields_contribute_nothing() {
        let schema = json!({
            "properties": {
                "a": {"type": "number"},
                "b": {"type": "number", "suggestToUser": false},
                "c": {"type": "number", "suggestToUser": "yes"},
                "d": {"type": "object", "properties": {"e": {"type": "string"}}}
            }
        });
        assert!(derive_suggestions(&schema).is_empty());
    }

    #[test]
    fn test_description_is_kept() {
        let schema = json!({
            "properties": {
                "cores": {"type": "integer", "suggestToUser": true, "description": "Physical cores"}
            }
        });
        let suggestions = derive_suggestions(&schema);
        assert_eq!(suggestions[0].description.as_deref(), Some("Physical cores"));
    }

    #[test]
    fn test_malformed_schema_yields_empty() {
        assert!(derive_suggestions(&Value::Null).is_empty());
        assert!(derive_suggestions(&json!({})).is_empty());
        assert!(derive_suggestions(&json!({"properties": []})).is_empty());
        assert!(derive_suggestions(&json!("schema")).is_empty());
    }

    #[test]
    fn test_invalid_property_names_are_skipped() {
        let schema = json!({
            "properties": {
                "wall-time": {"suggestToUser": true},
                "a.b": {"suggestToUser": true},
                "cpu_time": {"suggestToUser": true}
            }
        });
        assert_eq!(fields(&derive_suggestions(&schema)), vec!["cpu_time"]);
    }

    #[test]
    fn test_deeply_nested_paths() {
        let schema = json!({
            "properties": {"a": {"properties": {"b": {"properties": {"c": {"suggestToUser": true}}}}}}
        });
        let suggestions = derive_suggestions(&schema);
        assert_eq!(fields(&suggestions), vec!["a.b.c"]);
        assert_eq!(suggestions[0].field.depth(), 3);
    }

    #[test]
    fn test_suggestion_set() {
        let schema = json!({"properties": {"score": {"suggestToUser": true}}});
        let set = SuggestionSet::from_schema(&schema);
        assert_eq!(set.len(), 1);
        assert!(set.contains(&KeyPath::parse("score").unwrap()));
        assert!(!set.contains(&KeyPath::parse("time").unwrap()));
        assert!(SuggestionSet::from_schema(&Value::Null).is_empty());
    }

    #[test]
    fn test_suggestion_serialization() {
        let schema = json!({"properties": {"score": {"suggestToUser": true}}});
        let set = SuggestionSet::from_schema(&schema);
        assert_eq!(serde_json::to_value(&set).unwrap(), json!([{"field": "score"}]));
    }
}
