//! Join resolution: expand a touched-table set into an ordered join chain.
//!
//! Each touched table's parent chain is walked up to the base table. The
//! resulting edge list is deduplicated and dependency-ordered: a table's
//! join clause never precedes its parent's, because later joins must be
//! allowed to reference columns introduced by earlier ones.

use tracing::trace;

use crate::error::{CompileError, CompileResult};
use crate::schema::{Catalog, JoinPathEntry};

use super::compiler::TableSet;

/// Resolve the ordered `INNER JOIN` chain connecting every touched table
/// to `base`.
///
/// Tables equal to `base` never generate a join clause. Order among
/// independent branches is first-encounter insertion order, so output is
/// deterministic for a fixed input. Failure modes: a chain that ends at a
/// parentless table other than `base` ([`CompileError::BrokenJoinPath`]),
/// or a chain that revisits a table ([`CompileError::JoinCycle`]).
pub fn resolve(
    catalog: &Catalog,
    base: &str,
    touched: &TableSet,
) -> CompileResult<Vec<JoinPathEntry>> {
    let mut chain: Vec<JoinPathEntry> = Vec::new();

    for table in touched.iter() {
        if table == base || contains(&chain, table) {
            continue;
        }

        // Walk this table's parent chain until we hit the base or an edge
        // that is already part of the chain.
        let mut walk: Vec<JoinPathEntry> = Vec::new();
        let mut seen: Vec<&str> = vec![table];
        let mut current = table;

        while current != base && !contains(&chain, current) {
            let entry = catalog.join(current).ok_or_else(|| CompileError::BrokenJoinPath {
                table: table.to_string(),
                base: base.to_string(),
            })?;
            walk.push(entry.clone());
            current = entry.parent_table.as_str();
            if seen.contains(&current) {
                return Err(CompileError::JoinCycle(current.to_string()));
            }
            seen.push(current);
        }

        // The walk collected edges child-first; parents must come first in
        // the output, and the walk's topmost parent is either the base or
        // already present, so appending the reversed walk preserves the
        // ordering invariant.
        walk.reverse();
        trace!(table, edges = walk.len(), "resolved join path");
        chain.extend(walk);
    }

    Ok(chain)
}

fn contains(chain: &[JoinPathEntry], table: &str) -> bool {
    chain.iter().any(|e| e.child_table == table)
}
