//! Row splitting
//!
//! A row is one line split on the delimiter with every field trimmed of
//! whitespace and byte order marks. Quoting and escaping are not recognised.

/// Field delimiter
pub const DELIMITER: char = ',';

/// One line's delimiter-split, whitespace-trimmed fields
pub type Row = Vec<String>;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Split a line into a row
pub fn parse_row(line: &str) -> Row {
    line.split(DELIMITER)
        .map(|field| trim_field(field).to_string())
        .collect()
}

fn trim_field(field: &str) -> &str {
    field.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_row() {
        assert_eq!(parse_row("name,age"), vec!["name", "age"]);
    }

    #[test]
    fn test_fields_are_trimmed() {
        assert_eq!(parse_row("  Alice , 23 "), vec!["Alice", "23"]);
        assert_eq!(parse_row("\tBob\t,\t30"), vec!["Bob", "30"]);
    }

    #[test]
    fn test_byte_order_mark_is_trimmed() {
        assert_eq!(parse_row("\u{feff}name,age"), vec!["name", "age"]);
        assert_eq!(parse_row(" \u{feff} x ,y\u{feff}"), vec!["x", "y"]);
    }

    #[test]
    fn test_empty_fields_are_kept() {
        assert_eq!(parse_row("a,,c,"), vec!["a", "", "c", ""]);
    }

    #[test]
    fn test_empty_line_is_single_empty_field() {
        assert_eq!(parse_row(""), vec![""]);
        assert_eq!(parse_row("   "), vec![""]);
    }

    #[test]
    fn test_quotes_are_not_special() {
        assert_eq!(
            parse_row("\"Smith, John\",42"),
            vec!["\"Smith", "John\"", "42"]
        );
    }
}
