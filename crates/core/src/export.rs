// Copyright 2025 Bench Catalog Contributors
// SPDX-License-Identifier: Apache-2.0

//! Permissive stringification of payload fields for tables and CSV.
//!
//! Unlike the diagram path, nothing is rejected here: every value has a
//! text form, and numeric strings are passed through as text.

use serde_json::Value;

use crate::keypath::{KeyPath, Lookup};
use crate::record::ResultRecord;

/// Fixed leading CSV columns.
pub const CSV_BASE_COLUMNS: [&str; 3] = ["id", "site", "benchmark"];

/// Text form of a lookup for export.
///
/// Strings are written verbatim, other values as compact JSON, and an
/// unresolved path as an empty cell.
pub fn stringify_lookup(lookup: Lookup<'_>) -> String {
    match lookup {
        Lookup::Found(Value::String(s)) => s.clone(),
        Lookup::Found(value) => value.to_string(),
        Lookup::NotFound => String::new(),
    }
}

/// Custom-column cells for one table row.
///
/// Unresolved paths show the `not found` placeholder.
pub fn table_cells(result: &ResultRecord, columns: &[KeyPath]) -> Vec<String> {
    columns
        .iter()
        .map(|column| result.lookup(column).to_string())
        .collect()
}

/// CSV document with the base columns followed by one column per key path.
pub fn export_csv(results: &[ResultRecord], columns: &[KeyPath]) -> String {
    let mut csv = String::new();

    let header = CSV_BASE_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(columns.iter().map(|c| c.to_string()));
    push_row(&mut csv, header);

    for result in results {
        let row = [
            result.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            result.site.id.to_string(),
            result.benchmark.id.to_string(),
        ]
        .into_iter()
        .chain(columns.iter().map(|c| stringify_lookup(result.lookup(c))));
        push_row(&mut csv, row);
    }

    csv
}

fn push_row(csv: &mut String, fields: impl Iterator<Item = String>) {
    let line = fields
        .map(|field| escape_csv(&field))
        .collect::<Vec<_>>()
        .join(",");
    csv.push_str(&line);
    csv.push('\n');
}

fn escape_csv(value: &str) -> String {
    let needs_quotes = value.contains(',')
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
