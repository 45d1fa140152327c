//! Column Schema Types
//!
//! Positional, typed column definitions loaded from TOML. A row is checked
//! column by column and turned into a JSON-style record keyed by column name.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Number, Value};

use super::{Issue, RowSchema, SchemaError};

/// A validated row, keyed by column name
pub type Record = Map<String, Value>;

/// File extension used when looking schemas up by name
pub const SCHEMA_EXTENSION: &str = "schema.toml";

/// Root schema file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SchemaFile {
    pub schema: SchemaMeta,
    pub columns: Vec<ColumnDef>,
}

/// Schema metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SchemaMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub allow_extra_columns: bool,
}

/// One positional column
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub optional: bool,
    pub description: Option<String>,
    pub constraints: Option<ColumnConstraints>,
}

/// Column data types
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Float,
    String,
    Bool,
}

impl ColumnType {
    fn describe(self) -> &'static str {
        match self {
            ColumnType::Int => "integer",
            ColumnType::Float => "number",
            ColumnType::String => "string",
            ColumnType::Bool => "boolean",
        }
    }
}

/// Column value constraints
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ColumnConstraints {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub enum_values: Option<Vec<String>>,
    pub pattern: Option<String>,
}

/// Runtime column with its pattern compiled
#[derive(Debug, Clone)]
struct Column {
    def: ColumnDef,
    pattern: Option<Regex>,
}

/// Runtime schema (patterns compiled, ready to validate rows)
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub allow_extra_columns: bool,
    columns: Vec<Column>,
}

impl TryFrom<SchemaFile> for ColumnSchema {
    type Error = anyhow::Error;

    fn try_from(file: SchemaFile) -> Result<Self> {
        let columns = file
            .columns
            .into_iter()
            .map(|def| -> Result<Column> {
                let pattern = match def.constraints.as_ref().and_then(|c| c.pattern.as_ref()) {
                    Some(pattern) => Some(Regex::new(pattern).with_context(|| {
                        format!("invalid pattern for column '{}'", def.name)
                    })?),
                    None => None,
                };
                Ok(Column { def, pattern })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: file.schema.name,
            version: file.schema.version,
            description: file.schema.description,
            allow_extra_columns: file.schema.allow_extra_columns,
            columns,
        })
    }
}

impl ColumnSchema {
    /// Parse a schema from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: SchemaFile = toml::from_str(content).context("invalid schema TOML")?;
        Self::try_from(file)
    }

    /// Load a schema file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read schema {}", path.display()))?;
        let schema = Self::from_toml_str(&content)
            .with_context(|| format!("failed to load schema {}", path.display()))?;
        log::debug!(
            "Loaded schema '{}' with {} columns from {}",
            schema.name,
            schema.columns.len(),
            path.display()
        );
        Ok(schema)
    }

    /// Column definitions in positional order
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().map(|c| &c.def)
    }

    /// Number of declared columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl RowSchema<Record> for ColumnSchema {
    fn validate(&self, row: &[String]) -> Result<Record, SchemaError> {
        let mut record = Record::new();
        let mut issues = Vec::new();

        for (idx, column) in self.columns.iter().enumerate() {
            match row.get(idx) {
                Some(raw) => match column.convert(idx, raw) {
                    Ok(value) => {
                        record.insert(column.def.name.clone(), value);
                    }
                    Err(message) => issues.push(Issue::at(idx, message)),
                },
                None if column.def.optional => {
                    record.insert(column.def.name.clone(), Value::Null);
                }
                None => issues.push(Issue::at(
                    idx,
                    format!("Column {} ('{}') is required", idx + 1, column.def.name),
                )),
            }
        }

        if !self.allow_extra_columns && row.len() > self.columns.len() {
            issues.push(Issue::new(format!(
                "Expected at most {} columns, got {}",
                self.columns.len(),
                row.len()
            )));
        }

        if issues.is_empty() {
            Ok(record)
        } else {
            Err(SchemaError::Invalid(issues))
        }
    }
}

impl Column {
    /// Convert a raw field into a typed value
    fn convert(&self, idx: usize, raw: &str) -> Result<Value, String> {
        let label = format!("Column {} ('{}')", idx + 1, self.def.name);

        if raw.is_empty() && self.def.optional {
            return Ok(Value::Null);
        }

        let type_error = || {
            format!(
                "{} expects {}, got '{}'",
                label,
                self.def.column_type.describe(),
                raw
            )
        };

        match self.def.column_type {
            ColumnType::Int => {
                let val: i64 = raw.parse().map_err(|_| type_error())?;
                self.check_range(&label, val as f64, &val.to_string())?;
                Ok(Value::from(val))
            }
            ColumnType::Float => {
                let val: f64 = raw.parse().map_err(|_| type_error())?;
                let number = Number::from_f64(val).ok_or_else(type_error)?;
                self.check_range(&label, val, raw)?;
                Ok(Value::Number(number))
            }
            ColumnType::Bool => {
                if raw.eq_ignore_ascii_case("true") {
                    Ok(Value::Bool(true))
                } else if raw.eq_ignore_ascii_case("false") {
                    Ok(Value::Bool(false))
                } else {
                    Err(type_error())
                }
            }
            ColumnType::String => {
                if raw.is_empty() {
                    return Err(format!("{} is required", label));
                }
                // Enum matching ignores ASCII case; the declared spelling is emitted.
                let value = match self
                    .def
                    .constraints
                    .as_ref()
                    .and_then(|c| c.enum_values.as_ref())
                {
                    Some(enum_values) => enum_values
                        .iter()
                        .find(|v| v.eq_ignore_ascii_case(raw))
                        .cloned()
                        .ok_or_else(|| {
                            format!(
                                "{} value '{}' not in allowed values: {}",
                                label,
                                raw,
                                enum_values.join(", ")
                            )
                        })?,
                    None => raw.to_string(),
                };
                if let Some(pattern) = &self.pattern {
                    if !pattern.is_match(raw) {
                        return Err(format!(
                            "{} value '{}' does not match pattern '{}'",
                            label,
                            raw,
                            pattern.as_str()
                        ));
                    }
                }
                Ok(Value::String(value))
            }
        }
    }

    fn check_range(&self, label: &str, val: f64, shown: &str) -> Result<(), String> {
        let Some(constraints) = &self.def.constraints else {
            return Ok(());
        };
        if let Some(min) = constraints.min_value {
            if val < min {
                return Err(format!("{} value {} below minimum {}", label, shown, min));
            }
        }
        if let Some(max) = constraints.max_value {
            if val > max {
                return Err(format!("{} value {} exceeds maximum {}", label, shown, max));
            }
        }
        Ok(())
    }
}
