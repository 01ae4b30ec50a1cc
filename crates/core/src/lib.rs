// Copyright 2025 Bench Catalog Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core data handling for Bench Catalog.
//!
//! Results in the catalog carry free-form JSON payloads. This crate provides
//! the pieces every screen uses to look inside them:
//!
//! - [`keypath`] - validated dot-separated key paths and their evaluation
//! - [`schema`] - suggested fields derived from a benchmark schema
//! - [`series`] - per-site X/Y point series for diagrams
//! - [`regression`] - least-squares trend lines over a series
//! - [`diagram`] - series, trend lines and warnings bundled for rendering
//! - [`export`] - permissive text form of fields for tables and CSV
//!
//! # Quick Start
//!
//! ```
//! use benchcat_core::{build_series, KeyPath, Reference, ResultRecord};
//! use serde_json::json;
//!
//! let results = vec![
//!     ResultRecord::new(Reference::new("A"), Reference::new("hep"), json!({"cpu": 2, "score": 5})),
//!     ResultRecord::new(Reference::new("A"), Reference::new("hep"), json!({"cpu": 1, "score": 10})),
//! ];
//! let x = KeyPath::parse("cpu").unwrap();
//! let y = KeyPath::parse("score").unwrap();
//!
//! let outcome = build_series(&results, &x, &y);
//! let site_a = outcome.series.get("A").unwrap();
//! assert_eq!(site_a.points[0].x, 1.0);
//! assert!(outcome.rejected.is_empty());
//! ```
//!
//! All functions are pure: the same input always gives the same output and
//! nothing is cached between calls.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod diagram;
pub mod error;
pub mod export;
pub mod keypath;
pub mod record;
pub mod regression;
pub mod schema;
pub mod series;

pub use diagram::Diagram;
pub use error::{KeyPathError, Result};
pub use export::{export_csv, stringify_lookup, table_cells};
pub use keypath::{fetch_subkey, is_valid_key_path, KeyPath, Lookup, NOT_FOUND_PLACEHOLDER};
pub use record::{BenchmarkRef, Identifier, Reference, ResultRecord, SiteRef};
pub use regression::{linear_regression, Regression, SiteRegression};
pub use schema::{derive_suggestions, Suggestion, SuggestionSet};
pub use series::{
    build_series, DataPoint, RejectReason, RejectedResult, SeriesCollection, SeriesOutcome,
    SiteSeries,
};
