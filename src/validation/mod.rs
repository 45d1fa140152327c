//! Validation Engine
//!
//! Row processing with and without a schema.

pub mod engine;

pub use engine::{
    parse, parse_rows, parse_rows_from, parse_with_schema, parse_with_schema_from, ParseOutput,
    ParsedRows, RowError,
};
