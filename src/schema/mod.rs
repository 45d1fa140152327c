//! Row Schemas
//!
//! The capability the row processor validates against, plus a declarative
//! column schema loaded from TOML.

pub mod columns;

use thiserror::Error;

pub use columns::{ColumnConstraints, ColumnDef, ColumnSchema, ColumnType, Record, SchemaFile, SCHEMA_EXTENSION};

/// Separator used when joining issue messages into one line
pub const ISSUE_SEPARATOR: &str = "; ";

/// Something that can validate and transform a row into `T`
pub trait RowSchema<T> {
    fn validate(&self, row: &[String]) -> Result<T, SchemaError>;
}

impl<T, F> RowSchema<T> for F
where
    F: Fn(&[String]) -> Result<T, SchemaError>,
{
    fn validate(&self, row: &[String]) -> Result<T, SchemaError> {
        self(row)
    }
}

/// A single validation problem found in a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Zero-based column index, if the issue concerns one column
    pub column: Option<usize>,
    pub message: String,
}

impl Issue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            column: None,
            message: message.into(),
        }
    }

    pub fn at(column: usize, message: impl Into<String>) -> Self {
        Self {
            column: Some(column),
            message: message.into(),
        }
    }
}

/// Why a schema did not produce a value
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The row is not valid data; recoverable, reported per row
    #[error("{}", join_issues(.0))]
    Invalid(Vec<Issue>),
    /// Anything else; aborts the whole parse
    #[error("schema fault: {0}")]
    Fault(#[source] anyhow::Error),
}

impl SchemaError {
    /// Invalid row with a single message
    pub fn invalid(message: impl Into<String>) -> Self {
        SchemaError::Invalid(vec![Issue::new(message)])
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SchemaError::Invalid(_))
    }
}

/// Join issue messages in reported order
pub fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join(ISSUE_SEPARATOR)
}

impl From<anyhow::Error> for SchemaError {
    fn from(err: anyhow::Error) -> Self {
        SchemaError::Fault(err)
    }
}
