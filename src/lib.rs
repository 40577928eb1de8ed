//! # Sift
//!
//! Compiles a nested JSON boolean filter expression into an executable SQL
//! `WHERE` clause plus the `FROM`/`INNER JOIN` chain required to reach
//! every table the filter touches, starting from one designated base table.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            Filter JSON (where/and/or/not/exists)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [filter]
//! ┌─────────────────────────────────────────────────────────┐
//! │                Node (closed tagged union)                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compile + translate + schema]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Fragment (SQL tokens + touched tables)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [join resolution + assembly]
//! ┌─────────────────────────────────────────────────────────┐
//! │       FROM base [INNER JOIN ...]* WHERE <filter>         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The knowledge base (field descriptors and join paths) is loaded once
//! into a [`Catalog`] and shared read-only by every compilation; each
//! `generate_sql` call is a pure, reentrant transformation.

pub mod compile;
pub mod error;
pub mod filter;
pub mod schema;
pub mod sql;
pub mod translate;

pub use compile::SqlGenerator;
pub use error::{CompileError, CompileResult, ConfigError};
pub use filter::{Condition, Node};
pub use schema::{Catalog, DataType, FieldDescriptor, JoinPathEntry};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compile::SqlGenerator;
    pub use crate::error::{CompileError, CompileResult, ConfigError};
    pub use crate::filter::{Condition, Node};
    pub use crate::schema::{Catalog, DataType, FieldDescriptor, JoinPathEntry};
    pub use crate::translate::Operator;
}
