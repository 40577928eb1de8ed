//! Recursive descent over the filter expression tree.
//!
//! Compilation is a pure bottom-up fold: each node yields a [`Fragment`]
//! holding its SQL tokens and the set of tables its leaves touched. There
//! is no cross-node mutable state, so compilation is reentrant and each
//! node type is testable in isolation.

use crate::error::{CompileError, CompileResult};
use crate::filter::Node;
use crate::schema::Catalog;
use crate::sql::{Token, TokenStream};
use crate::translate;

use super::assemble;
use super::joins;

// ============================================================================
// Touched tables
// ============================================================================

/// Insertion-ordered set of table names touched by a compiled subtree.
///
/// First-encounter order is what makes join output deterministic, so a
/// plain ordered vector backs the set (touched-table counts are tiny).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSet(Vec<String>);

impl TableSet {
    /// Insert a table, keeping the first-encounter position.
    pub fn insert(&mut self, table: &str) {
        if !self.0.iter().any(|t| t == table) {
            self.0.push(table.to_string());
        }
    }

    /// Union another set into this one, preserving encounter order.
    pub fn union(&mut self, other: &TableSet) {
        for table in other.iter() {
            self.insert(table);
        }
    }

    /// First table encountered, if any.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Ephemeral result of compiling a subtree.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// SQL text of the subtree.
    pub tokens: TokenStream,
    /// Tables referenced by the subtree, in first-encounter order.
    pub tables: TableSet,
}

// ============================================================================
// Compiler
// ============================================================================

/// Recursive compiler over [`Node`], parameterized by the catalog, the
/// base table, and a depth bound guarding against pathological input.
pub(crate) struct Compiler<'a> {
    catalog: &'a Catalog,
    base: &'a str,
    max_depth: usize,
}

impl<'a> Compiler<'a> {
    pub(crate) fn new(catalog: &'a Catalog, base: &'a str, max_depth: usize) -> Self {
        Self {
            catalog,
            base,
            max_depth,
        }
    }

    /// Compile the root of an expression tree.
    pub(crate) fn compile(&self, node: &Node) -> CompileResult<Fragment> {
        self.compile_at(node, 0)
    }

    fn compile_at(&self, node: &Node, depth: usize) -> CompileResult<Fragment> {
        if depth >= self.max_depth {
            return Err(CompileError::DepthLimitExceeded(self.max_depth));
        }

        match node {
            Node::Where(cond) => {
                let field = self
                    .catalog
                    .field(&cond.field)
                    .ok_or_else(|| CompileError::UnknownField(cond.field.clone()))?;
                let tokens = translate::translate(field, cond)?;
                let mut tables = TableSet::default();
                // The base table is tracked too; it is filtered out only at
                // join-emission time so downstream logic stays uniform.
                tables.insert(&field.table);
                Ok(Fragment { tokens, tables })
            }

            Node::And(children) => self.compile_composite("and", Token::And, children, depth),
            Node::Or(children) => self.compile_composite("or", Token::Or, children, depth),

            Node::Not(children) => {
                let child = single_child("not", children)?;
                let inner = self.compile_at(child, depth + 1)?;
                let mut tokens = TokenStream::new();
                tokens.push(Token::Not).space().lparen();
                tokens.append(&inner.tokens);
                tokens.rparen();
                Ok(Fragment {
                    tokens,
                    tables: inner.tables,
                })
            }

            Node::Exists(children) => {
                let child = single_child("exists", children)?;
                let inner = self.compile_at(child, depth + 1)?;
                self.compile_exists(inner)
            }
        }
    }

    /// Compile an `and`/`or` group. Groups with more than one child are
    /// parenthesized; single-child groups pass through unwrapped.
    fn compile_composite(
        &self,
        tag: &'static str,
        separator: Token,
        children: &[Node],
        depth: usize,
    ) -> CompileResult<Fragment> {
        if children.is_empty() {
            return Err(CompileError::EmptyComposite(tag));
        }

        let compiled = children
            .iter()
            .map(|child| self.compile_at(child, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        if compiled.len() == 1 {
            return Ok(compiled.into_iter().next().unwrap());
        }

        let mut tokens = TokenStream::new();
        let mut tables = TableSet::default();
        tokens.lparen();
        for (i, fragment) in compiled.iter().enumerate() {
            if i > 0 {
                tokens.space().push(separator.clone()).space();
            }
            tokens.append(&fragment.tokens);
            tables.union(&fragment.tables);
        }
        tokens.rparen();

        Ok(Fragment { tokens, tables })
    }

    /// Compile an EXISTS subquery around an already-compiled subtree.
    ///
    /// The subquery's FROM root is the first table the subtree touched;
    /// further subtree tables are joined inside the subquery by reusing the
    /// join resolver scoped to that root. Correlation with the outer query
    /// happens through the root's own parent edge, which is also the only
    /// table propagated outward - tables fully consumed inside the subquery
    /// must not be joined again at the outer level.
    fn compile_exists(&self, inner: Fragment) -> CompileResult<Fragment> {
        let root = inner.tables.first().unwrap_or(self.base).to_string();
        let scoped_joins = joins::resolve(self.catalog, &root, &inner.tables)?;

        let mut tokens = TokenStream::new();
        tokens
            .push(Token::Exists)
            .space()
            .lparen()
            .push(Token::Select)
            .space()
            .push(Token::LitInt(1))
            .space()
            .push(Token::From)
            .space()
            .push(Token::Ident(root.clone()));
        for edge in &scoped_joins {
            tokens.space().append(&assemble::join_clause(edge));
        }
        tokens.space().push(Token::Where).space();

        let mut outer = TableSet::default();
        if root != self.base {
            let link = self
                .catalog
                .join(&root)
                .ok_or_else(|| CompileError::BrokenJoinPath {
                    table: root.clone(),
                    base: self.base.to_string(),
                })?;
            tokens
                .push(Token::Ident(link.child_table.clone()))
                .push(Token::Dot)
                .push(Token::Ident(link.child_column.clone()))
                .space()
                .push(Token::Eq)
                .space()
                .push(Token::Ident(link.parent_table.clone()))
                .push(Token::Dot)
                .push(Token::Ident(link.parent_column.clone()))
                .space()
                .push(Token::And)
                .space();
            outer.insert(&link.parent_table);
        }

        tokens.append(&inner.tokens);
        tokens.rparen();

        Ok(Fragment {
            tokens,
            tables: outer,
        })
    }
}

fn single_child<'n>(tag: &'static str, children: &'n [Node]) -> CompileResult<&'n Node> {
    match children {
        [child] => Ok(child),
        _ => Err(CompileError::InvalidArity {
            tag,
            got: children.len(),
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
