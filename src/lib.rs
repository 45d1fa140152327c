//! CSV Row Loader
//!
//! Reads comma-delimited files line by line into trimmed string rows, or
//! validates them against a row schema into typed records plus per-row errors.
//!
//! This library provides:
//! - Line reading tolerant of `\n`, `\r\n` and `\r` endings
//! - Row splitting and schema-driven validation
//! - Declarative column schemas loaded from TOML
//! - Configuration and a thin command-line entry point

pub mod cli;
pub mod config;
pub mod parser;
pub mod schema;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use parser::{parse_row, LineSource, Row};
pub use schema::{ColumnSchema, Issue, Record, RowSchema, SchemaError};
pub use validation::{parse, parse_rows, parse_with_schema, ParseOutput, ParsedRows, RowError};
