//! EXISTS subquery semantics: correlation, scoped joins, outer propagation.

use sift::{DataType, FieldDescriptor, JoinPathEntry, Node, SqlGenerator};

fn generator() -> SqlGenerator {
    SqlGenerator::new(
        vec![
            FieldDescriptor::new("age", "age", "patient", DataType::Integer),
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
fn test_exists_correlated_through_parent_edge() {
    let filter = Node::from_json(
        r#"{"exists": [{"where": {"field": "email", "operator": "is not null"}}]}"#,
    )
    .unwrap();
    let sql = generator().generate_sql(&filter, "patient").unwrap();
    // user is consumed inside the subquery: no outer join for it, and the
    // correlation target (patient) is the base, so no outer join at all.
    assert_eq!(
        sql,
        "FROM patient WHERE EXISTS (SELECT 1 FROM user \
         WHERE user.id = patient.user_id AND user.email IS NOT NULL)"
    );
}

#[test]
fn test_exists_two_hops_joins_outer_correlation_table() {
    // The subtree touches only client; its parent (user) carries the
    // correlation, so user must be joined at the outer level.
    let filter = Node::from_json(
        r#"{"exists": [{"where": {"field": "company", "operator": "=", "value": "Acme"}}]}"#,
    )
    .unwrap();
    let sql = generator().generate_sql(&filter, "patient").unwrap();
    assert_eq!(
        sql,
        "FROM patient INNER JOIN user ON user.id = patient.user_id \
         WHERE EXISTS (SELECT 1 FROM client \
         WHERE client.id = user.client_id AND client.name = 'Acme')"
    );
}

#[test]
fn test_exists_mixed_with_outer_conditions() {
    let filter = Node::from_json(
        r#"{"and": [
            {"where": {"field": "age", "operator": ">", "value": 30}},
            {"exists": [{"where": {"field": "email", "operator": "like", "value": "%@x.com"}}]}
        ]}"#,
    )
    .unwrap();
    let sql = generator().generate_sql(&filter, "patient").unwrap();
    assert_eq!(
        sql,
        "FROM patient WHERE (patient.age > 30 AND EXISTS (SELECT 1 FROM user \
         WHERE user.id = patient.user_id AND user.email LIKE '%@x.com'))"
    );
}

#[test]
fn test_not_exists() {
    let filter = Node::from_json(
        r#"{"not": [{"exists": [{"where": {"field": "email", "operator": "is null"}}]}]}"#,
    )
    .unwrap();
    let sql = generator().generate_sql(&filter, "patient").unwrap();
    assert_eq!(
        sql,
        "FROM patient WHERE NOT (EXISTS (SELECT 1 FROM user \
         WHERE user.id = patient.user_id AND user.email IS NULL))"
    );
}

#[test]
fn test_nested_exists() {
    // exists(and(user cond, exists(client cond))): the inner exists roots
    // at client and correlates to user, which the outer subtree already
    // contains; everything stays inside the outer subquery.
    let filter = Node::from_json(
        r#"{"exists": [{"and": [
            {"where": {"field": "email", "operator": "is not null"}},
            {"exists": [{"where": {"field": "company", "operator": "=", "value": "Acme"}}]}
        ]}]}"#,
    )
    .unwrap();
    let sql = generator().generate_sql(&filter, "patient").unwrap();
    assert_eq!(
        sql,
        "FROM patient WHERE EXISTS (SELECT 1 FROM user \
         WHERE user.id = patient.user_id AND \
         (user.email IS NOT NULL AND EXISTS (SELECT 1 FROM client \
         WHERE client.id = user.client_id AND client.name = 'Acme')))"
    );
}
