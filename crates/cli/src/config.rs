//! CLI settings.
//!
//! Layered from built-in defaults, an optional `benchcat.toml` (or the file
//! given with `--config`), then `BENCHCAT_`-prefixed environment variables
//! such as `BENCHCAT_LOG_LEVEL=debug`.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::OutputFormat;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "benchcat";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "BENCHCAT";

/// Resolved CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Directory for `series --save` outputs.
    pub output_dir: PathBuf,
    /// Format used when a command is given no `--format`.
    pub default_format: OutputFormat,
}

impl Settings {
    /// Load settings, reading `path` if given (it must then exist).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("log_level", "info")?
            .set_default("output_dir", benchcat_report::io::OUTPUT_DIR)?
            .set_default("default_format", "markdown")?;

        let builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_settings_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "log_level = \"warn\"\noutput_dir = \"reports\"\ndefault_format = \"json\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.output_dir, PathBuf::from("reports"));
        assert_eq!(settings.default_format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(&path, "output_dir = \"elsewhere\"\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("elsewhere"));
        assert_eq!(settings.default_format, OutputFormat::Markdown);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_invalid_format_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "default_format = \"yaml\"\n").unwrap();
        assert!(Settings::load(Some(&path)).is_err());
    }
}
