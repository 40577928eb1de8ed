//! The filter expression tree.
//!
//! Filters arrive as JSON objects carrying exactly one recognized tag key:
//!
//! ```text
//! {"where": {"field": str, "operator": str, "value": any, "secondary_value"?: any}}
//! {"and": [Node, ...]}   {"or": [Node, ...]}
//! {"not": [Node]}        {"exists": [Node]}
//! ```
//!
//! [`Node`] is a closed tagged union over those five shapes; the single-tag
//! invariant is enforced here at parse time, while child arity is enforced
//! by the compiler.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CompileError;

/// One atomic comparison against a catalog field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    /// Symbolic field identifier, resolved through the catalog.
    pub field: String,
    /// Operator token, e.g. `">"`, `"between"`, `"is null"`.
    pub operator: String,
    /// Comparison value; ignored by nullness operators.
    #[serde(default)]
    pub value: Value,
    /// Second bound for range operators.
    #[serde(default)]
    pub secondary_value: Option<Value>,
}

/// A filter expression node.
///
/// Composites keep their children as parsed; arity rules (`and`/`or` need
/// at least one child, `not`/`exists` exactly one) are checked during
/// compilation so the errors carry compile-time context.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum Node {
    Where(Condition),
    And(Vec<Node>),
    Or(Vec<Node>),
    Not(Vec<Node>),
    Exists(Vec<Node>),
}

const TAGS: [&str; 5] = ["where", "and", "or", "not", "exists"];

impl Node {
    /// Parse a node from a JSON value, enforcing the single-tag invariant:
    /// exactly one of the five recognized keys must be present.
    pub fn from_value(value: &Value) -> Result<Node, CompileError> {
        let obj = value.as_object().ok_or(CompileError::MalformedNode)?;

        let mut tag = None;
        for key in TAGS {
            if obj.contains_key(key) {
                if tag.is_some() {
                    return Err(CompileError::MalformedNode);
                }
                tag = Some(key);
            }
        }
        let tag = tag.ok_or(CompileError::MalformedNode)?;
        let body = &obj[tag];

        match tag {
            "where" => {
                let condition: Condition = serde_json::from_value(body.clone())?;
                Ok(Node::Where(condition))
            }
            _ => {
                let items = body.as_array().ok_or(CompileError::MalformedNode)?;
                let children = items
                    .iter()
                    .map(Node::from_value)
                    .collect::<Result<Vec<_>, _>>()?;
                match tag {
                    "and" => Ok(Node::And(children)),
                    "or" => Ok(Node::Or(children)),
                    "not" => Ok(Node::Not(children)),
                    "exists" => Ok(Node::Exists(children)),
                    _ => unreachable!("tag list is closed"),
                }
            }
        }
    }

    /// Parse a node from JSON text.
    pub fn from_json(json: &str) -> Result<Node, CompileError> {
        let value: Value = serde_json::from_str(json)?;
        Node::from_value(&value)
    }
}

impl TryFrom<Value> for Node {
    type Error = CompileError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Node::from_value(&value)
    }
}
