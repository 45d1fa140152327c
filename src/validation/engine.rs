//! Validation Engine
//!
//! The row processor: reads lines, splits them into rows and, when a schema is
//! given, partitions rows into validated data and per-row errors.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::AsyncBufRead;

use crate::parser::{parse_row, LineSource, Row};
use crate::schema::{join_issues, RowSchema, SchemaError};

/// A row rejected by the schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based line number, header included
    pub line: usize,
    /// The split row as read
    pub content: Row,
    /// Every issue message, joined with `"; "`
    pub error: String,
}

/// Result of parsing with a schema (header excluded)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRows<T> {
    pub data: Vec<T>,
    pub errors: Vec<RowError>,
}

impl<T> Default for ParsedRows<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ParsedRows<T> {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// True when no row was rejected
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of data rows classified (valid and rejected)
    pub fn total_rows(&self) -> usize {
        self.data.len() + self.errors.len()
    }
}

/// Either shape a parse can return
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParseOutput<T> {
    /// Every line as a row, header included
    Rows(Vec<Row>),
    /// Validated records and row errors, header excluded
    Typed(ParsedRows<T>),
}

/// Read every line of a file as a row, header included
pub async fn parse_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let source = open(path).await?;
    parse_rows_from_source(source)
        .await
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Like [`parse_rows`], reading from any buffered async reader
pub async fn parse_rows_from<R: AsyncBufRead + Unpin>(reader: R) -> Result<Vec<Row>> {
    parse_rows_from_source(LineSource::new(reader)).await
}

/// Skip the header line, then validate every row against `schema`
///
/// Validation failures are collected as [`RowError`]s. A schema fault aborts
/// the parse and is returned as the error.
pub async fn parse_with_schema<T, S>(path: impl AsRef<Path>, schema: &S) -> Result<ParsedRows<T>>
where
    S: RowSchema<T> + ?Sized,
{
    let path = path.as_ref();
    let source = open(path).await?;
    validate_source(source, schema)
        .await
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Like [`parse_with_schema`], reading from any buffered async reader
pub async fn parse_with_schema_from<R, T, S>(reader: R, schema: &S) -> Result<ParsedRows<T>>
where
    R: AsyncBufRead + Unpin,
    S: RowSchema<T> + ?Sized,
{
    validate_source(LineSource::new(reader), schema).await
}

/// Parse with or without a schema
pub async fn parse<T, S>(path: impl AsRef<Path>, schema: Option<&S>) -> Result<ParseOutput<T>>
where
    S: RowSchema<T> + ?Sized,
{
    match schema {
        Some(schema) => Ok(ParseOutput::Typed(parse_with_schema(path, schema).await?)),
        None => Ok(ParseOutput::Rows(parse_rows(path).await?)),
    }
}

async fn open(path: &Path) -> Result<LineSource> {
    LineSource::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))
}

async fn next_line<R: AsyncBufRead + Unpin>(source: &mut LineSource<R>) -> Result<Option<String>> {
    let line_num = source.lines_read() + 1;
    source
        .next_line()
        .await
        .with_context(|| format!("failed to read line {}", line_num))
}

async fn parse_rows_from_source<R: AsyncBufRead + Unpin>(mut source: LineSource<R>) -> Result<Vec<Row>> {
    let mut rows = Vec::new();

    while let Some(line) = next_line(&mut source).await? {
        rows.push(parse_row(&line));
    }

    log::debug!("Read {} rows without schema", rows.len());
    Ok(rows)
}

async fn validate_source<R, T, S>(mut source: LineSource<R>, schema: &S) -> Result<ParsedRows<T>>
where
    R: AsyncBufRead + Unpin,
    S: RowSchema<T> + ?Sized,
{
    let mut result = ParsedRows::new();
    let mut line_num = 0;

    while let Some(line) = next_line(&mut source).await? {
        line_num += 1;
        if line_num == 1 {
            log::trace!("Skipping header: {}", line);
            continue;
        }

        let row = parse_row(&line);
        match schema.validate(&row) {
            Ok(value) => result.data.push(value),
            Err(SchemaError::Invalid(issues)) => {
                let error = join_issues(&issues);
                log::trace!("Line {} rejected: {}", line_num, error);
                result.errors.push(RowError {
                    line: line_num,
                    content: row,
                    error,
                });
            }
            Err(SchemaError::Fault(err)) => {
                return Err(err.context(format!("schema fault on line {}", line_num)));
            }
        }
    }

    log::debug!(
        "Validated {} rows: {} accepted, {} rejected",
        result.total_rows(),
        result.data.len(),
        result.errors.len()
    );
    Ok(result)
}
