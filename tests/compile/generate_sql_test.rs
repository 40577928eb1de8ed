//! End-to-end tests for filter-to-SQL compilation.

use sift::{CompileError, DataType, FieldDescriptor, JoinPathEntry, Node, SqlGenerator};

fn generator() -> SqlGenerator {
    SqlGenerator::new(
        vec![
            FieldDescriptor::new("age", "age", "patient", DataType::Integer),
            FieldDescriptor::new("name", "name", "patient", DataType::String),
            FieldDescriptor::new("active", "is_active", "patient", DataType::Boolean),
            FieldDescriptor::new("email", "email", "user", DataType::String),
            FieldDescriptor::new("company", "name", "client", DataType::String),
        ],
        vec![
            JoinPathEntry::new("user", "id", "patient", "user_id"),
            JoinPathEntry::new("client", "id", "user", "client_id"),
        ],
    )
    .unwrap()
}

#[test]
fn test_single_condition_on_base_table() {
    let filter = Node::from_json(r#"{"where": {"field": "age", "operator": ">", "value": 30}}"#)
        .unwrap();
    let sql = generator().generate_sql(&filter, "patient").unwrap();
    assert_eq!(sql, "FROM patient WHERE patient.age > 30");
}

#[test]
fn test_and_group_parenthesized() {
    let filter = Node::from_json(
        r#"{"and": [
            {"where": {"field": "age", "operator": ">", "value": 30}},
            {"where": {"field": "name", "operator": "=", "value": "Tom"}}
        ]}"#,
    )
    .unwrap();
    let sql = generator().generate_sql(&filter, "patient").unwrap();
    assert_eq!(
        sql,
        "FROM patient WHERE (patient.age > 30 AND patient.name = 'Tom')"
    );
}

#[test]
fn test_join_emitted_before_where() {
    let filter = Node::from_json(
        r#"{"where": {"field": "email", "operator": "like", "value": "%@example.com"}}"#,
    )
    .unwrap();
    let sql = generator().generate_sql(&filter, "patient").unwrap();
    assert_eq!(
        sql,
        "FROM patient INNER JOIN user ON user.id = patient.user_id \
         WHERE user.email LIKE '%@example.com'"
    );
}

#[test]
fn test_not_between() {
    let filter = Node::from_json(
        r#"{"not": [{"where": {"field": "age", "operator": "between", "value": 10, "secondary_value": 20}}]}"#,
    )
    .unwrap();
    let sql = generator().generate_sql(&filter, "patient").unwrap();
    assert_eq!(sql, "FROM patient WHERE NOT (patient.age BETWEEN 10 AND 20)");
}

#[test]
fn test_unknown_field_yields_no_sql() {
    let filter = Node::from_json(
        r#"{"where": {"field": "shoe_size", "operator": ">", "value": 9}}"#,
    )
    .unwrap();
    let err = generator().generate_sql(&filter, "patient").unwrap_err();
    assert!(matches!(err, CompileError::UnknownField(f) if f == "shoe_size"));
}

#[test]
fn test_empty_and_rejected() {
    let filter = Node::from_json(r#"{"and": []}"#).unwrap();
    let err = generator().generate_sql(&filter, "patient").unwrap_err();
    assert!(matches!(err, CompileError::EmptyComposite("and")));
}

#[test]
fn test_multi_hop_join_chain_ordered_and_deduplicated() {
    // Two leaves on client (two hops away) plus one on user: exactly one
    // join per distinct table, parents before children.
    let filter = Node::from_json(
        r#"{"and": [
            {"where": {"field": "company", "operator": "=", "value": "Acme"}},
            {"where": {"field": "email", "operator": "is not null"}},
            {"where": {"field": "company", "operator": "!=", "value": "Initech"}}
        ]}"#,
    )
    .unwrap();
    let sql = generator().generate_sql(&filter, "patient").unwrap();
    assert_eq!(
        sql,
        "FROM patient \
         INNER JOIN user ON user.id = patient.user_id \
         INNER JOIN client ON client.id = user.client_id \
         WHERE (client.name = 'Acme' AND user.email IS NOT NULL AND client.name <> 'Initech')"
    );
    assert_eq!(sql.matches("INNER JOIN user").count(), 1);
    assert_eq!(sql.matches("INNER JOIN client").count(), 1);
}

#[test]
fn test_deterministic_output() {
    let filter = Node::from_json(
        r#"{"or": [
            {"where": {"field": "email", "operator": "like", "value": "%@x.com"}},
            {"where": {"field": "company", "operator": "=", "value": "Acme"}},
            {"where": {"field": "age", "operator": "<=", "value": 65}}
        ]}"#,
    )
    .unwrap();
    let generator = generator();
    let first = generator.generate_sql(&filter, "patient").unwrap();
    let second = generator.generate_sql(&filter, "patient").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_count_sql() {
    let filter = Node::from_json(
        r#"{"where": {"field": "active", "operator": "=", "value": true}}"#,
    )
    .unwrap();
    let sql = generator().generate_count_sql(&filter, "patient").unwrap();
    assert_eq!(
        sql,
        "SELECT COUNT(*) FROM patient WHERE patient.is_active = TRUE"
    );
}

#[test]
fn test_where_clause_only() {
    let filter = Node::from_json(
        r#"{"and": [
            {"where": {"field": "age", "operator": ">=", "value": 18}},
            {"where": {"field": "age", "operator": "<", "value": 65}}
        ]}"#,
    )
    .unwrap();
    let sql = generator().where_clause(&filter, "patient").unwrap();
    assert_eq!(sql, "(patient.age >= 18 AND patient.age < 65)");
}

#[test]
fn test_depth_limit_configurable() {
    let filter = Node::from_json(
        r#"{"not": [{"not": [{"not": [{"where": {"field": "age", "operator": ">", "value": 1}}]}]}]}"#,
    )
    .unwrap();
    let generator = generator().with_max_depth(2);
    let err = generator.generate_sql(&filter, "patient").unwrap_err();
    assert!(matches!(err, CompileError::DepthLimitExceeded(2)));
}

#[test]
fn test_in_list_membership() {
    let filter = Node::from_json(
        r#"{"where": {"field": "name", "operator": "in", "value": ["Tom", "Ann"]}}"#,
    )
    .unwrap();
    let sql = generator().generate_sql(&filter, "patient").unwrap();
    assert_eq!(sql, "FROM patient WHERE patient.name IN ('Tom', 'Ann')");
}
