//! Catalog construction and validation.

use sift::{Catalog, ConfigError, DataType, FieldDescriptor, JoinPathEntry, SqlGenerator};

#[test]
fn test_generator_rejects_duplicate_join_table() {
    let result = SqlGenerator::new(
        vec![],
        vec![
            JoinPathEntry::new("user", "id", "patient", "user_id"),
            JoinPathEntry::new("user", "uid", "clinic", "user_uid"),
        ],
    );
    assert!(matches!(
        result,
        Err(ConfigError::DuplicateJoinTable(t)) if t == "user"
    ));
}

#[test]
fn test_generator_rejects_duplicate_field() {
    let result = SqlGenerator::new(
        vec![
            FieldDescriptor::new("age", "age", "patient", DataType::Integer),
            FieldDescriptor::new("age", "age_years", "patient", DataType::Integer),
        ],
        vec![],
    );
    assert!(matches!(result, Err(ConfigError::DuplicateField(f)) if f == "age"));
}

#[test]
fn test_catalog_loaded_from_json() {
    let catalog = Catalog::from_json(
        r#"{
            "fields": [
                {"identifier": "age", "column": "age", "table": "patient", "data_type": "integer"}
            ],
            "paths": []
        }"#,
    )
    .unwrap();
    let generator = SqlGenerator::with_catalog(catalog);

    let filter = sift::Node::from_json(
        r#"{"where": {"field": "age", "operator": ">", "value": 30}}"#,
    )
    .unwrap();
    assert_eq!(
        generator.generate_sql(&filter, "patient").unwrap(),
        "FROM patient WHERE patient.age > 30"
    );
}

#[test]
fn test_catalog_json_parse_error() {
    let result = Catalog::from_json("{not json");
    assert!(matches!(result, Err(ConfigError::InvalidJson(_))));
}

#[test]
fn test_generator_shared_across_threads() {
    let generator = SqlGenerator::new(
        vec![FieldDescriptor::new("age", "age", "patient", DataType::Integer)],
        vec![],
    )
    .unwrap();

    let filter = sift::Node::from_json(
        r#"{"where": {"field": "age", "operator": ">", "value": 30}}"#,
    )
    .unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let sql = generator.generate_sql(&filter, "patient").unwrap();
                assert_eq!(sql, "FROM patient WHERE patient.age > 30");
            });
        }
    });
}
