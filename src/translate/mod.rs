//! Operator translation: one atomic comparison to a SQL condition fragment.
//!
//! Owns arity and type-compatibility validation for every supported
//! operator. Literal formatting is type-aware: textual types are quoted
//! (with internal quotes doubled at token serialization), numeric and
//! boolean types are emitted unquoted, nullness checks take no literal
//! at all.

use serde_json::Value;

use crate::error::{CompileError, CompileResult};
use crate::filter::Condition;
use crate::schema::{DataType, FieldDescriptor};
use crate::sql::{Token, TokenStream};

// ============================================================================
// Operators
// ============================================================================

/// Supported comparison operators.
///
/// Parsed once from the JSON token; downstream logic matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    Between,
    Like,
    NotLike,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

impl Operator {
    /// Parse an operator token. Matching is case-insensitive for the
    /// word-shaped operators.
    pub fn parse(token: &str) -> Option<Operator> {
        match token.to_ascii_lowercase().as_str() {
            "=" => Some(Operator::Eq),
            "!=" | "<>" => Some(Operator::Ne),
            ">" => Some(Operator::Gt),
            "<" => Some(Operator::Lt),
            ">=" => Some(Operator::Gte),
            "<=" => Some(Operator::Lte),
            "between" => Some(Operator::Between),
            "like" => Some(Operator::Like),
            "not like" => Some(Operator::NotLike),
            "in" => Some(Operator::In),
            "not in" => Some(Operator::NotIn),
            "is null" => Some(Operator::IsNull),
            "is not null" => Some(Operator::IsNotNull),
            _ => None,
        }
    }
}

// ============================================================================
// Translation
// ============================================================================

/// Translate one condition into a SQL fragment of the shape
/// `table.column OP literal` (per operator family).
pub fn translate(field: &FieldDescriptor, cond: &Condition) -> CompileResult<TokenStream> {
    let op = Operator::parse(&cond.operator)
        .ok_or_else(|| CompileError::UnsupportedOperator(cond.operator.clone()))?;

    let mut ts = TokenStream::new();
    ts.push(Token::Ident(field.table.clone()))
        .push(Token::Dot)
        .push(Token::Ident(field.column.clone()));

    match op {
        Operator::Eq | Operator::Ne | Operator::Gt | Operator::Lt | Operator::Gte
        | Operator::Lte => {
            let token = match op {
                Operator::Eq => Token::Eq,
                Operator::Ne => Token::Ne,
                Operator::Gt => Token::Gt,
                Operator::Lt => Token::Lt,
                Operator::Gte => Token::Gte,
                Operator::Lte => Token::Lte,
                _ => unreachable!(),
            };
            ts.space().push(token).space().push(literal(field, &cond.value)?);
        }

        Operator::Between => {
            let high = cond.secondary_value.as_ref().ok_or_else(|| {
                CompileError::MissingSecondaryValue {
                    field: field.identifier.clone(),
                    operator: cond.operator.clone(),
                }
            })?;
            ts.space()
                .push(Token::Between)
                .space()
                .push(literal(field, &cond.value)?)
                .space()
                .push(Token::And)
                .space()
                .push(literal(field, high)?);
        }

        Operator::Like | Operator::NotLike => {
            if op == Operator::NotLike {
                ts.space().push(Token::Not);
            }
            ts.space()
                .push(Token::Like)
                .space()
                .push(literal(field, &cond.value)?);
        }

        Operator::In | Operator::NotIn => {
            let items = cond.value.as_array().ok_or_else(|| type_mismatch(field, &cond.value))?;
            // "x IN ()" is invalid SQL; fold the empty list to its truth value.
            if items.is_empty() {
                let mut ts = TokenStream::new();
                ts.push(Token::LitBool(op == Operator::NotIn));
                return Ok(ts);
            }
            if op == Operator::NotIn {
                ts.space().push(Token::Not);
            }
            ts.space().push(Token::In).space().lparen();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.push(literal(field, item)?);
            }
            ts.rparen();
        }

        Operator::IsNull => {
            // value is ignored by contract
            ts.space().push(Token::IsNull);
        }
        Operator::IsNotNull => {
            ts.space().push(Token::IsNotNull);
        }
    }

    Ok(ts)
}

/// Format a JSON value as a SQL literal token for the field's declared type.
fn literal(field: &FieldDescriptor, value: &Value) -> CompileResult<Token> {
    match field.data_type {
        DataType::Integer => value
            .as_i64()
            .map(Token::LitInt)
            .ok_or_else(|| type_mismatch(field, value)),
        DataType::Float => value
            .as_f64()
            .map(Token::LitFloat)
            .ok_or_else(|| type_mismatch(field, value)),
        DataType::Boolean => value
            .as_bool()
            .map(Token::LitBool)
            .ok_or_else(|| type_mismatch(field, value)),
        DataType::String
        | DataType::Date
        | DataType::DateTime
        | DataType::Choice
        | DataType::Multichoice => value
            .as_str()
            .map(|s| Token::LitString(s.to_string()))
            .ok_or_else(|| type_mismatch(field, value)),
    }
}

fn type_mismatch(field: &FieldDescriptor, value: &Value) -> CompileError {
    CompileError::TypeMismatch {
        field: field.identifier.clone(),
        data_type: field.data_type,
        value: value.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
