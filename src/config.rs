//! Configuration management for the CSV loader.
//!
//! Handles:
//! - Command-line argument parsing
//! - Schema directory configuration and schema lookup

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::schema::SCHEMA_EXTENSION;

/// Command-line arguments for the CSV loader
#[derive(Debug, Parser)]
#[command(name = "csv-load")]
#[command(about = "Load a CSV file as rows, or as validated records with a schema")]
#[command(version)]
pub struct Args {
    /// CSV file to read
    pub input: PathBuf,

    /// Schema to validate rows against
    #[arg(long, help = "Schema file path, or name of a .schema.toml in a schema directory")]
    pub schema: Option<String>,

    /// Custom schema directory to search for named schemas
    #[arg(long, help = "Directory containing schema TOML files")]
    pub schema_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Fail when any row is rejected by the schema
    #[arg(long)]
    pub strict: bool,

    /// Log level for the loader
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// CSV file to read
    pub input: PathBuf,
    /// Schema path or name as given on the command line
    pub schema: Option<String>,
    /// Directories searched for named schemas, in order
    pub schema_dirs: Vec<PathBuf>,
    pub pretty: bool,
    pub strict: bool,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let mut schema_dirs = Vec::new();

        if let Some(custom_dir) = args.schema_dir {
            schema_dirs.push(custom_dir);
        }

        if let Some(config_dir) = dirs::config_dir() {
            schema_dirs.push(config_dir.join("csv-row-loader").join("schemas"));
        }

        Ok(Config {
            input: args.input,
            schema: args.schema,
            schema_dirs,
            pretty: args.pretty,
            strict: args.strict,
            log_level: args.log_level,
        })
    }

    /// Resolve the schema argument to a file
    ///
    /// An existing file path wins; otherwise `<dir>/<name>.schema.toml` is
    /// tried in each schema directory.
    pub fn resolve_schema(&self) -> Result<Option<PathBuf>> {
        let Some(schema) = &self.schema else {
            return Ok(None);
        };

        let direct = PathBuf::from(schema);
        if direct.is_file() {
            return Ok(Some(direct));
        }

        for dir in &self.schema_dirs {
            let candidate = dir.join(format!("{}.{}", schema, SCHEMA_EXTENSION));
            if candidate.is_file() {
                log::debug!("Resolved schema '{}' to {}", schema, candidate.display());
                return Ok(Some(candidate));
            }
        }

        bail!(
            "schema '{}' not found (searched {} schema directories)",
            schema,
            self.schema_dirs.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["csv-load", "people.csv"]).unwrap();
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.input, PathBuf::from("people.csv"));
        assert!(config.schema.is_none());
        assert!(!config.pretty);
        assert!(!config.strict);
        assert_eq!(config.log_level, "warn");
        assert!(config.resolve_schema().unwrap().is_none());
    }

    #[test]
    fn test_custom_schema_dir_comes_first() {
        let args = Args::try_parse_from([
            "csv-load",
            "people.csv",
            "--schema",
            "people",
            "--schema-dir",
            "/tmp/schemas",
            "--strict",
        ])
        .unwrap();
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.schema.as_deref(), Some("people"));
        assert_eq!(config.schema_dirs[0], PathBuf::from("/tmp/schemas"));
        assert!(config.strict);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["csv-load"]).is_err());
    }
}
