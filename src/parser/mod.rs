//! CSV Parser
//!
//! Line reading and row splitting. No validation happens here.

pub mod lines;
pub mod row;

pub use lines::LineSource;
pub use row::{parse_row, Row, DELIMITER};
