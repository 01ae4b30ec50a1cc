// Copyright 2025 Bench Catalog Contributors
// SPDX-License-Identifier: Apache-2.0

//! Catalog result records as delivered by the result API.
//!
//! The catalog returns references to sites and benchmarks either as bare
//! identifiers (`"site": "cern-1"` or `"site": 17`) or as expanded objects
//! (`"site": {"id": 17, "name": "CERN"}`). Both forms deserialize into
//! [`Reference`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::keypath::{fetch_subkey, KeyPath, Lookup};

/// Identifier of a catalog entity, normalized to its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Create an identifier from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl From<&str> for Identifier {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for Identifier {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Identifier(s),
            RawId::Number(n) => Identifier(n.to_string()),
        }
    }
}

/// Reference to a site or benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawReference")]
pub struct Reference {
    /// Entity identifier.
    pub id: Identifier,
    /// Human-readable name, when the API expanded the reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Reference {
    /// Reference by identifier only.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Identifier::new(id),
            name: None,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name if known, identifier otherwise.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Bare(RawId),
    Expanded {
        id: RawId,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<RawReference> for Reference {
    fn from(raw: RawReference) -> Self {
        match raw {
            RawReference::Bare(id) => Reference {
                id: id.into(),
                name: None,
            },
            RawReference::Expanded { id, name } => Reference {
                id: id.into(),
                name,
            },
        }
    }
}

/// Reference to the site a result was measured on.
pub type SiteRef = Reference;

/// Reference to the benchmark a result belongs to.
pub type BenchmarkRef = Reference;

/// A single benchmark result.
///
/// The payload shape is defined by the benchmark's JSON schema and is opaque
/// here; it is only ever read through key paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Result identifier, absent for results that were never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    /// Site the result was measured on.
    pub site: SiteRef,
    /// Benchmark the result belongs to.
    pub benchmark: BenchmarkRef,
    /// Result payload. Older API versions call this field `data`.
    #[serde(default, alias = "data")]
    pub json: Value,
    /// Tags attached to the result.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Upload time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded: Option<DateTime<Utc>>,
}

impl ResultRecord {
    /// Create a result without identifier, tags or upload time.
    pub fn new(site: SiteRef, benchmark: BenchmarkRef, json: Value) -> Self {
        Self {
            id: None,
            site,
            benchmark,
            json,
            tags: Vec::new(),
            uploaded: None,
        }
    }

    /// Set the result identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(Identifier::new(id));
        self
    }

    /// Evaluate a key path against the payload.
    pub fn lookup(&self, path: &KeyPath) -> Lookup<'_> {
        fetch_subkey(&self.json, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_from_bare_string() {
        let site: SiteRef = serde_json::from_value(json!("cern-1")).unwrap();
        assert_eq!(site.id.as_str(), "cern-1");
        assert!(site.name.is_none());
    }

    #[test]
    fn test_reference_from_number() {
        let site: SiteRef = serde_json::from_value(json!(17)).unwrap();
        assert_eq!(site.id.as_str(), "17");
    }

    #[test]
    fn test_reference_from_expanded_object() {
        let site: SiteRef =
            serde_json::from_value(json!({"id": 17, "name": "CERN", "address": "Geneva"})).unwrap();
        assert_eq!(site.id.as_str(), "17");
        assert_eq!(site.label(), "CERN");
    }

    #[test]
    fn test_result_accepts_data_alias() {
        let result: ResultRecord = serde_json::from_value(json!({
            "site": "A",
            "benchmark": {"id": "b-1", "name": "hepscore"},
            "data": {"score": 3}
        }))
        .unwrap();
        assert_eq!(result.json, json!({"score": 3}));
        assert_eq!(result.benchmark.label(), "hepscore");
    }

    #[test]
    fn test_result_without_payload_is_null() {
        let result: ResultRecord =
            serde_json::from_value(json!({"site": "A", "benchmark": "b"})).unwrap();
        assert!(result.json.is_null());
        let path = KeyPath::parse("score").unwrap();
        assert!(!result.lookup(&path).is_found());
    }

    #[test]
    fn test_result_serializes_identifiers_as_strings() {
        let result = ResultRecord::new(Reference::new("A"), Reference::new("b"), json!({}))
            .with_id("42");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["id"], json!("42"));
        assert_eq!(value["site"], json!({"id": "A"}));
    }
}
