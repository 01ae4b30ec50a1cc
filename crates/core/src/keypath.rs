// Copyright 2025 Bench Catalog Contributors
// SPDX-License-Identifier: Apache-2.0

//! Dot-separated key paths into nested JSON.
//!
//! Filters, custom table columns and diagram axes all address a field of a
//! result payload (or of a benchmark schema) with a key path such as
//! `performance.score`. A key path is one or more segments of
//! `[A-Za-z0-9_]` joined by single dots.
//!
//! [`KeyPath`] can only be built from a string that passes
//! [`is_valid_key_path`], so evaluation through [`fetch_subkey`] never sees
//! malformed input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{KeyPathError, Result};

/// Placeholder shown for a path that does not resolve.
pub const NOT_FOUND_PLACEHOLDER: &str = "not found";

/// Returns `true` if `candidate` is a well-formed key path.
///
/// Equivalent to matching `^[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)*$`.
pub fn is_valid_key_path(candidate: &str) -> bool {
    check(candidate).is_ok()
}

fn is_segment_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn check(candidate: &str) -> Result<()> {
    if candidate.is_empty() {
        return Err(KeyPathError::Empty);
    }

    let mut segment_start = 0;
    for (position, ch) in candidate.char_indices() {
        if ch == '.' {
            if position == segment_start {
                return Err(KeyPathError::EmptySegment {
                    path: candidate.to_string(),
                    position,
                });
            }
            segment_start = position + 1;
        } else if !is_segment_char(ch) {
            return Err(KeyPathError::InvalidCharacter {
                path: candidate.to_string(),
                ch,
                position,
            });
        }
    }

    if segment_start == candidate.len() {
        return Err(KeyPathError::EmptySegment {
            path: candidate.to_string(),
            position: segment_start,
        });
    }

    Ok(())
}

/// A validated key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyPath(String);

impl KeyPath {
    /// Parse and validate a key path.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyPathError`] describing the first syntax violation.
    pub fn parse(candidate: impl Into<String>) -> Result<Self> {
        let candidate = candidate.into();
        check(&candidate)?;
        Ok(Self(candidate))
    }

    /// A single-segment path. Dots are rejected here, unlike [`KeyPath::parse`].
    ///
    /// # Errors
    ///
    /// Returns a [`KeyPathError`] if `segment` is empty or holds any
    /// character outside `[A-Za-z0-9_]`.
    pub fn segment(segment: &str) -> Result<Self> {
        if let Some((position, ch)) = segment.char_indices().find(|&(_, ch)| ch == '.') {
            return Err(KeyPathError::InvalidCharacter {
                path: segment.to_string(),
                ch,
                position,
            });
        }
        Self::parse(segment)
    }

    /// This path extended by one more segment.
    ///
    /// # Errors
    ///
    /// Same as [`KeyPath::segment`].
    pub fn child(&self, segment: &str) -> Result<Self> {
        let tail = Self::segment(segment)?;
        Ok(self.join(&tail))
    }

    /// Concatenate two paths.
    pub fn join(&self, other: &KeyPath) -> KeyPath {
        KeyPath(format!("{}.{}", self.0, other.0))
    }

    /// The path as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segment names from root to leaf.
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split('.')
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for KeyPath {
    type Error = KeyPathError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for KeyPath {
    type Error = KeyPathError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<KeyPath> for String {
    fn from(path: KeyPath) -> Self {
        path.0
    }
}

impl AsRef<str> for KeyPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Outcome of evaluating a key path.
///
/// `NotFound` is distinct from a stored `null`, `false` or `0`, which are
/// all `Found`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// The path resolved to this value.
    Found(&'a Value),
    /// Some segment along the path was absent.
    NotFound,
}

impl<'a> Lookup<'a> {
    /// Whether the path resolved.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// The resolved value, if any.
    pub fn value(&self) -> Option<&'a Value> {
        match *self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    /// Strict numeric view for charting.
    ///
    /// Only JSON numbers count; `"3.5"` is not a number here.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Lookup::Found(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }
}

/// Displays strings unquoted, other values as JSON, and
/// [`NOT_FOUND_PLACEHOLDER`] for unresolved paths.
impl fmt::Display for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Found(Value::String(s)) => f.write_str(s),
            Lookup::Found(value) => write!(f, "{}", value),
            Lookup::NotFound => f.write_str(NOT_FOUND_PLACEHOLDER),
        }
    }
}

/// Resolve `path` against `root`, left to right.
///
/// Objects are indexed by segment name and arrays by canonical decimal
/// index (`items.0`, not `items.00`). Reaching a scalar, `null`, a missing
/// key or an out-of-range index before the path ends stops the walk with
/// [`Lookup::NotFound`].
pub fn fetch_subkey<'a>(root: &'a Value, path: &KeyPath) -> Lookup<'a> {
    let mut current = root;
    for segment in path.segments() {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Lookup::NotFound,
        }
    }
    Lookup::Found(current)
}

fn array_index(segment: &str) -> Option<usize> {
    if segment.len() > 1 && segment.starts_with('0') {
        return None;
    }
    segment.parse().ok()
}
