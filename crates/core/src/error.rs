// Copyright 2025 Bench Catalog Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for key-path handling.

use thiserror::Error;

/// Reasons a candidate string is not a valid key path.
///
/// Only syntax problems are errors. Missing data along a valid path is a
/// [`crate::Lookup::NotFound`], never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyPathError {
    /// The candidate was the empty string.
    #[error("Key path is empty")]
    Empty,

    /// A leading, trailing or doubled dot left a segment empty.
    #[error("Key path '{path}' has an empty segment at byte {position}")]
    EmptySegment {
        /// The rejected candidate.
        path: String,
        /// Byte offset where the empty segment starts.
        position: usize,
    },

    /// A character outside `[A-Za-z0-9_.]`.
    #[error("Key path '{path}' contains invalid character {ch:?} at byte {position}")]
    InvalidCharacter {
        /// The rejected candidate.
        path: String,
        /// The offending character.
        ch: char,
        /// Byte offset of the offending character.
        position: usize,
    },
}

/// Result type for key-path operations.
pub type Result<T> = std::result::Result<T, KeyPathError>;
