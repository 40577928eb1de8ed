//! Query assembly: base table, join chain, and compiled filter to SQL text.

use crate::schema::JoinPathEntry;
use crate::sql::{Token, TokenStream};

/// Render one join edge as
/// `INNER JOIN child ON child.child_column = parent.parent_column`.
pub fn join_clause(edge: &JoinPathEntry) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::Inner)
        .space()
        .push(Token::Join)
        .space()
        .push(Token::Ident(edge.child_table.clone()))
        .space()
        .push(Token::On)
        .space()
        .push(Token::Ident(edge.child_table.clone()))
        .push(Token::Dot)
        .push(Token::Ident(edge.child_column.clone()))
        .space()
        .push(Token::Eq)
        .space()
        .push(Token::Ident(edge.parent_table.clone()))
        .push(Token::Dot)
        .push(Token::Ident(edge.parent_column.clone()));
    ts
}

/// Combine base table, resolved joins, and the compiled filter into
/// `FROM <base> [INNER JOIN ...]* [WHERE <filter>]`.
///
/// An empty filter is permitted and yields no WHERE clause; the caller
/// chooses whether to splice the result into a larger SELECT.
pub fn assemble(base_table: &str, joins: &[JoinPathEntry], where_sql: &str) -> String {
    let mut ts = TokenStream::new();
    ts.push(Token::From)
        .space()
        .push(Token::Ident(base_table.to_string()));
    for edge in joins {
        ts.space().append(&join_clause(edge));
    }

    let mut sql = ts.serialize();
    if !where_sql.is_empty() {
        let mut where_ts = TokenStream::new();
        where_ts.space().push(Token::Where).space();
        sql.push_str(&where_ts.serialize());
        sql.push_str(where_sql);
    }
    sql
}
