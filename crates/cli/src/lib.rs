//! CLI for Bench Catalog.
//!
//! This crate provides the `benchcat` command line: key-path validation and
//! lookup, suggested fields for a benchmark schema, per-site diagram series
//! and CSV export over result files downloaded from the catalog.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use benchcat_core::{export_csv, is_valid_key_path, Diagram, KeyPath, SuggestionSet};
use benchcat_report::{io, markdown};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Bench Catalog CLI.
#[derive(Parser, Debug)]
#[command(name = "benchcat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: ./benchcat.toml if present).
    #[arg(long, global = true, env = "BENCHCAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose logging (overrides the configured log level).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Rendering of command output.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Markdown tables.
    Markdown,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check key paths for valid syntax.
    ///
    /// Prints `valid` or `invalid` per path and fails if any is invalid.
    Validate {
        /// Candidate key paths.
        #[arg(required = true, allow_hyphen_values = true)]
        paths: Vec<String>,
    },

    /// Show the value at a key path for every result.
    Get {
        /// Results JSON file.
        results: PathBuf,
        /// Key path into each result payload.
        path: KeyPath,
    },

    /// List the suggested fields of a benchmark schema.
    Suggest {
        /// Benchmark JSON schema file.
        schema: PathBuf,
        /// Output format (default from settings).
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Build per-site diagram series from two key paths.
    Series {
        /// Results JSON file.
        results: PathBuf,
        /// X axis key path.
        #[arg(short, long)]
        x: KeyPath,
        /// Y axis key path.
        #[arg(short, long)]
        y: KeyPath,
        /// Output format (default from settings).
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Write output to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write diagram.json and summary.md into the output directory.
        #[arg(long)]
        save: bool,
    },

    /// Export results to CSV with one column per key path.
    Export {
        /// Results JSON file.
        results: PathBuf,
        /// Key path columns, in order.
        #[arg(short, long = "column", required = true)]
        columns: Vec<KeyPath>,
        /// Write CSV to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Install the tracing subscriber. `RUST_LOG` wins over `level`.
///
/// Logs go to stderr so stdout stays usable for command output.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// The process exit code, or an error if a command fails.
pub fn run() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let level = if cli.verbose { "debug" } else { settings.log_level.as_str() };
    init_tracing(level);
    debug!(?settings, "Settings loaded");

    execute(cli.command, &settings)
}

/// Run one command against resolved settings.
pub fn execute(command: Commands, settings: &Settings) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Validate { paths } => {
            let (report, all_valid) = validate_paths(&paths);
            print!("{}", report);
            Ok(if all_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Get { results, path } => {
            print!("{}", render_get(&results, &path)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Suggest { schema, format } => {
            let format = format.unwrap_or(settings.default_format);
            print!("{}", render_suggestions(&schema, format)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Series {
            results,
            x,
            y,
            format,
            output,
            save,
        } => {
            let format = format.unwrap_or(settings.default_format);
            let save_dir = save.then_some(settings.output_dir.as_path());
            let rendered = render_series(&results, &x, &y, format, save_dir)?;
            emit(&rendered, output.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Export {
            results,
            columns,
            output,
        } => {
            let records = io::read_results_json(&results)
                .with_context(|| format!("Failed to read results from {}", results.display()))?;
            emit(&export_csv(&records, &columns), output.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn emit(text: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            io::write_text(text, path)?;
            info!(path = %path.display(), "Output written");
        }
        None => print!("{}", text),
    }
    Ok(())
}

/// One `<path>\t<valid|invalid>` line per candidate, and whether all passed.
pub fn validate_paths(paths: &[String]) -> (String, bool) {
    let mut report = String::new();
    let mut all_valid = true;
    for path in paths {
        let valid = is_valid_key_path(path);
        all_valid &= valid;
        report.push_str(&format!(
            "{}\t{}\n",
            path,
            if valid { "valid" } else { "invalid" }
        ));
    }
    (report, all_valid)
}

/// Markdown table with the value at `path` for each result.
pub fn render_get(results: &Path, path: &KeyPath) -> anyhow::Result<String> {
    let records = io::read_results_json(results)
        .with_context(|| format!("Failed to read results from {}", results.display()))?;
    Ok(markdown::results_table(&records, std::slice::from_ref(path)))
}

/// Suggested fields of the schema in `schema`.
pub fn render_suggestions(schema: &Path, format: OutputFormat) -> anyhow::Result<String> {
    let schema_value = io::read_schema_json(schema)
        .with_context(|| format!("Failed to read schema from {}", schema.display()))?;
    let suggestions = SuggestionSet::from_schema(&schema_value);
    if suggestions.is_empty() {
        info!(schema = %schema.display(), "Schema has no suggested fields");
    } else {
        debug!(count = suggestions.len(), "Derived suggested fields");
    }

    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&suggestions)?),
        OutputFormat::Markdown => markdown::suggestions_table(suggestions.as_slice()),
    })
}

/// Diagram for `results` along `x` and `y`, optionally saved to `save_dir`.
pub fn render_series(
    results: &Path,
    x: &KeyPath,
    y: &KeyPath,
    format: OutputFormat,
    save_dir: Option<&Path>,
) -> anyhow::Result<String> {
    let records = io::read_results_json(results)
        .with_context(|| format!("Failed to read results from {}", results.display()))?;
    let diagram = Diagram::build(&records, x, y);

    for warning in diagram.warnings() {
        warn!("{}", warning);
    }

    if let Some(dir) = save_dir {
        let written = io::write_diagram_outputs(&diagram, dir)
            .with_context(|| format!("Failed to write outputs to {}", dir.display()))?;
        for path in written {
            info!(path = %path.display(), "Output written");
        }
    }

    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&diagram)?),
        OutputFormat::Markdown => markdown::diagram_summary(&diagram),
    })
}
