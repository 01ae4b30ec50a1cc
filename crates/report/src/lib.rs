//! Result file I/O and reports for Bench Catalog.
//!
//! This crate reads result and schema files as exported by the catalog API
//! and renders diagrams, suggestion lists and result tables as JSON or
//! Markdown.
//!
//! # Quick Start
//!
//! ```no_run
//! use benchcat_core::{Diagram, KeyPath};
//! use benchcat_report::{io, markdown};
//!
//! let results = io::read_results_json("results.json")?;
//! let x = KeyPath::parse("machine.cores").unwrap();
//! let y = KeyPath::parse("score").unwrap();
//! let diagram = Diagram::build(&results, &x, &y);
//!
//! println!("{}", markdown::diagram_summary(&diagram));
//! io::write_diagram_outputs(&diagram, io::OUTPUT_DIR)?;
//! # Ok::<(), benchcat_report::ReportError>(())
//! ```
//!
//! # Modules
//!
//! - [`io`] - Reading results and schemas, writing reports
//! - [`markdown`] - Markdown report generation
//! - [`error`] - The `ReportError` type

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod io;
pub mod markdown;

pub use error::{ReportError, Result};
