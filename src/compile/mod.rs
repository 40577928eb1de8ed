//! End-to-end compilation from a filter expression tree to SQL.
//!
//! ```text
//! Node tree → compile (recursion, touched tables) → resolve joins → assemble
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sift::{DataType, FieldDescriptor, Node, SqlGenerator};
//!
//! let generator = SqlGenerator::new(
//!     vec![FieldDescriptor::new("age", "age", "patient", DataType::Integer)],
//!     vec![],
//! )?;
//! let filter = Node::from_json(r#"{"where": {"field": "age", "operator": ">", "value": 30}}"#)?;
//! let sql = generator.generate_sql(&filter, "patient")?;
//! assert_eq!(sql, "FROM patient WHERE patient.age > 30");
//! ```

pub mod assemble;
pub mod compiler;
pub mod joins;

pub use assemble::assemble;
pub use compiler::{Fragment, TableSet};

use tracing::debug;

use crate::error::{CompileResult, ConfigError};
use crate::filter::Node;
use crate::schema::{Catalog, FieldDescriptor, JoinPathEntry};
use crate::sql::{Token, TokenStream};

/// Default bound on expression tree depth, guarding the recursive compiler
/// against stack exhaustion from adversarial input.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Compiles filter expression trees into SQL against one fixed catalog.
///
/// Construction validates the catalog once; after that the generator is
/// immutable and safe to share across threads. Each call to
/// [`generate_sql`](Self::generate_sql) is an independent, purely
/// functional transformation - no cross-call state, no caching.
#[derive(Debug, Clone)]
pub struct SqlGenerator {
    catalog: Catalog,
    max_depth: usize,
}

impl SqlGenerator {
    /// Build a generator from field descriptors and join path entries.
    /// Fails on duplicate field identifiers or duplicate join child tables.
    pub fn new(
        fields: Vec<FieldDescriptor>,
        paths: Vec<JoinPathEntry>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::with_catalog(Catalog::new(fields, paths)?))
    }

    /// Build a generator around an existing catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the expression depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The catalog backing this generator.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Compile a filter into `FROM <base> [INNER JOIN ...]* WHERE <filter>`.
    ///
    /// The output is a fragment meant to be spliced after a caller-chosen
    /// SELECT list.
    pub fn generate_sql(&self, filter: &Node, base_table: &str) -> CompileResult<String> {
        let fragment = compiler::Compiler::new(&self.catalog, base_table, self.max_depth)
            .compile(filter)?;
        let chain = joins::resolve(&self.catalog, base_table, &fragment.tables)?;
        let sql = assemble(base_table, &chain, &fragment.tokens.serialize());
        debug!(base_table, joins = chain.len(), "compiled filter to SQL");
        Ok(sql)
    }

    /// Compile a filter into a full `SELECT COUNT(*)` counting query.
    pub fn generate_count_sql(&self, filter: &Node, base_table: &str) -> CompileResult<String> {
        let body = self.generate_sql(filter, base_table)?;
        let mut head = TokenStream::new();
        head.push(Token::Select)
            .space()
            .push(Token::FunctionName("count".into()))
            .lparen()
            .push(Token::Star)
            .rparen()
            .space();
        Ok(format!("{}{}", head.serialize(), body))
    }

    /// Compile only the boolean filter expression, without FROM or joins.
    pub fn where_clause(&self, filter: &Node, base_table: &str) -> CompileResult<String> {
        let fragment = compiler::Compiler::new(&self.catalog, base_table, self.max_depth)
            .compile(filter)?;
        Ok(fragment.tokens.serialize())
    }
}
