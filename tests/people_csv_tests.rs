//! Tests against the bundled people.csv fixture
use std::path::PathBuf;

use csv_row_loader::schema::{ColumnSchema, Record};
use csv_row_loader::{parse_rows, parse_with_schema, ParsedRows, SchemaError};
use serde_json::Value;

fn people_csv() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/people.csv")
}

fn people_schema() -> ColumnSchema {
    ColumnSchema::load(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/schemas/people.schema.toml"),
    )
    .expect("load people schema")
}

#[tokio::test]
async fn test_reads_non_empty_file() {
    let rows = parse_rows(people_csv()).await.expect("parse people.csv");
    assert!(!rows.is_empty());
}

#[tokio::test]
async fn test_rows_include_header_and_raw_values() {
    let rows = parse_rows(people_csv()).await.expect("parse people.csv");

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], vec!["name", "age"]);
    assert_eq!(rows[1], vec!["Alice", "23"]);
    assert_eq!(rows[2], vec!["Bob", "thirty"]);
    assert_eq!(rows[3], vec!["Charlie", "25"]);
    assert_eq!(rows[4], vec!["Nim", "22"]);
}

#[tokio::test]
async fn test_column_schema_partitions_rows() {
    let parsed: ParsedRows<Record> = parse_with_schema(people_csv(), &people_schema())
        .await
        .expect("parse with schema");

    let names: Vec<_> = parsed.data.iter().map(|r| r["name"].clone()).collect();
    assert_eq!(
        names,
        vec![Value::from("Alice"), Value::from("Charlie"), Value::from("Nim")]
    );
    assert_eq!(parsed.data[0]["age"], Value::from(23));
    assert_eq!(
        serde_json::to_string(&parsed.data[0]).unwrap(),
        r#"{"name":"Alice","age":23}"#
    );

    assert_eq!(parsed.errors.len(), 1);
    let error = &parsed.errors[0];
    assert_eq!(error.line, 3);
    assert_eq!(error.content, vec!["Bob", "thirty"]);
    assert_eq!(error.error, "Column 2 ('age') expects integer, got 'thirty'");
}

#[tokio::test]
async fn test_typed_struct_schema() {
    #[derive(Debug, PartialEq)]
    struct Person {
        name: String,
        age: u8,
    }

    let schema = |row: &[String]| -> Result<Person, SchemaError> {
        match row {
            [name, age] => Ok(Person {
                name: name.clone(),
                age: age
                    .parse()
                    .map_err(|_| SchemaError::invalid(format!("age '{}' is not numeric", age)))?,
            }),
            _ => Err(SchemaError::invalid("expected two fields")),
        }
    };

    let parsed = parse_with_schema(people_csv(), &schema).await.unwrap();
    assert_eq!(parsed.data.len() + parsed.errors.len(), 4);
    assert_eq!(
        parsed.data[1],
        Person {
            name: "Charlie".to_string(),
            age: 25
        }
    );
    assert_eq!(parsed.errors[0].error, "age 'thirty' is not numeric");
}
