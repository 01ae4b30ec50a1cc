//! I/O operations for results, schemas and reports.
//!
//! Result files are what the catalog's result API returns: either a bare
//! JSON array of results or a paginated response with a `results` array.

use crate::error::{ReportError, Result};
use crate::markdown;
use benchcat_core::{Diagram, ResultRecord};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default output directory path.
pub const OUTPUT_DIR: &str = "benchcat-output";

/// Diagram JSON file name inside the output directory.
pub const DIAGRAM_FILE: &str = "diagram.json";

/// Summary file name inside the output directory.
pub const SUMMARY_FILE: &str = "summary.md";

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read results from a JSON file.
pub fn read_results_json(path: impl AsRef<Path>) -> Result<Vec<ResultRecord>> {
    let path = path.as_ref();
    let list = match read_json(path)? {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut page) => match page.remove("results") {
            Some(results @ Value::Array(_)) => results,
            _ => {
                return Err(ReportError::NotAResultList {
                    path: path.to_path_buf(),
                })
            }
        },
        _ => {
            return Err(ReportError::NotAResultList {
                path: path.to_path_buf(),
            })
        }
    };

    let results: Vec<ResultRecord> =
        serde_json::from_value(list).map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), count = results.len(), "Loaded results");
    Ok(results)
}

/// Read a benchmark schema. Any JSON value is accepted.
pub fn read_schema_json(path: impl AsRef<Path>) -> Result<Value> {
    read_json(path.as_ref())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| ReportError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Write text, creating parent directories.
pub fn write_text(text: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    fs::write(path, text).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a value as pretty JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_text(&json, path)
}

/// Write the diagram JSON and its Markdown summary into `dir`.
///
/// Returns the paths written.
pub fn write_diagram_outputs(diagram: &Diagram<'_>, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let json_path = dir.join(DIAGRAM_FILE);
    let summary_path = dir.join(SUMMARY_FILE);

    write_json(diagram, &json_path)?;
    write_text(&markdown::diagram_summary(diagram), &summary_path)?;

    Ok(vec![json_path, summary_path])
}
