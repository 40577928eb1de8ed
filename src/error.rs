//! Error types for catalog construction and filter compilation.
//!
//! Every error here is a deterministic input-validation failure - none are
//! retryable. Callers should treat any error from
//! [`generate_sql`](crate::compile::SqlGenerator::generate_sql) as
//! "this filter cannot be compiled" and reject the request.

use thiserror::Error;

use crate::schema::DataType;

/// Errors raised while constructing a [`Catalog`](crate::schema::Catalog).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duplicate join path entry for table '{0}'")]
    DuplicateJoinTable(String),

    #[error("duplicate field identifier '{0}'")]
    DuplicateField(String),

    #[error("invalid catalog JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Errors raised while compiling a filter expression to SQL.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(String),

    #[error("operator '{operator}' on field '{field}' requires a secondary value")]
    MissingSecondaryValue { field: String, operator: String },

    #[error("value {value} is not compatible with {data_type} field '{field}'")]
    TypeMismatch {
        field: String,
        data_type: DataType,
        value: String,
    },

    #[error("filter node must carry exactly one of 'where', 'and', 'or', 'not', 'exists'")]
    MalformedNode,

    #[error("invalid filter JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("'{0}' composite has no children")]
    EmptyComposite(&'static str),

    #[error("'{tag}' takes exactly one child, got {got}")]
    InvalidArity { tag: &'static str, got: usize },

    #[error("join path from table '{table}' never reaches base table '{base}'")]
    BrokenJoinPath { table: String, base: String },

    #[error("join path cycle detected at table '{0}'")]
    JoinCycle(String),

    #[error("filter expression exceeds maximum depth {0}")]
    DepthLimitExceeded(usize),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
