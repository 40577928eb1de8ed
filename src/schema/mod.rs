//! The static knowledge base: field descriptors and join paths.
//!
//! Two immutable lookup tables back every compilation:
//!
//! - field descriptors map a symbolic identifier to a physical
//!   `table.column` plus its declared data type
//! - join path entries give each non-base table its single parent edge,
//!   forming a parent-pointer tree rooted at the base table
//!
//! A [`Catalog`] is constructed once, validated eagerly, and never mutated -
//! it is safely shared across concurrent compilations.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ============================================================================
// Data Types
// ============================================================================

/// Data types a field can declare.
///
/// Validated once at the boundary so downstream logic matches exhaustively
/// instead of string-comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Integer,
    Float,
    String,
    Date,
    DateTime,
    Boolean,
    /// Single selection from a fixed set; stored and compared as text.
    Choice,
    /// Multiple selections from a fixed set; stored and compared as text.
    Multichoice,
}

impl DataType {
    /// Whether literals of this type are quoted in SQL output.
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            DataType::String
                | DataType::Date
                | DataType::DateTime
                | DataType::Choice
                | DataType::Multichoice
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::String => "string",
            DataType::Date => "date",
            DataType::DateTime => "datetime",
            DataType::Boolean => "boolean",
            DataType::Choice => "choice",
            DataType::Multichoice => "multichoice",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// Records
// ============================================================================

/// Maps a symbolic field identifier to its physical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Identifier used in filter JSON; unique within the catalog.
    pub identifier: String,
    /// Column name as in the database.
    pub column: String,
    /// Table the column lives in.
    pub table: String,
    /// Declared data type, used for literal formatting and validation.
    pub data_type: DataType,
}

impl FieldDescriptor {
    pub fn new(identifier: &str, column: &str, table: &str, data_type: DataType) -> Self {
        Self {
            identifier: identifier.into(),
            column: column.into(),
            table: table.into(),
            data_type,
        }
    }
}

/// One edge in the parent-pointer join tree.
///
/// `child_table` is unique across all entries; the base table has no entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinPathEntry {
    pub child_table: String,
    pub child_column: String,
    pub parent_table: String,
    pub parent_column: String,
}

impl JoinPathEntry {
    pub fn new(
        child_table: &str,
        child_column: &str,
        parent_table: &str,
        parent_column: &str,
    ) -> Self {
        Self {
            child_table: child_table.into(),
            child_column: child_column.into(),
            parent_table: parent_table.into(),
            parent_column: parent_column.into(),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Serialized catalog shape: `{"fields": [...], "paths": [...]}`.
#[derive(Debug, Deserialize)]
struct CatalogDoc {
    fields: Vec<FieldDescriptor>,
    paths: Vec<JoinPathEntry>,
}

/// Immutable lookup tables shared by all compilations.
#[derive(Debug, Clone)]
pub struct Catalog {
    fields: HashMap<String, FieldDescriptor>,
    joins: HashMap<String, JoinPathEntry>,
}

impl Catalog {
    /// Build a catalog, validating uniqueness of field identifiers and
    /// join child tables. Fails fast on the first duplicate.
    pub fn new(
        fields: Vec<FieldDescriptor>,
        paths: Vec<JoinPathEntry>,
    ) -> Result<Self, ConfigError> {
        let mut field_map = HashMap::with_capacity(fields.len());
        for field in fields {
            if field_map.contains_key(&field.identifier) {
                return Err(ConfigError::DuplicateField(field.identifier));
            }
            field_map.insert(field.identifier.clone(), field);
        }

        let mut join_map = HashMap::with_capacity(paths.len());
        for entry in paths {
            if join_map.contains_key(&entry.child_table) {
                return Err(ConfigError::DuplicateJoinTable(entry.child_table));
            }
            join_map.insert(entry.child_table.clone(), entry);
        }

        Ok(Self {
            fields: field_map,
            joins: join_map,
        })
    }

    /// Load a catalog from a JSON document of the shape
    /// `{"fields": [...], "paths": [...]}`.
    pub fn from_json(doc: &str) -> Result<Self, ConfigError> {
        let doc: CatalogDoc = serde_json::from_str(doc)?;
        Self::new(doc.fields, doc.paths)
    }

    /// Look up a field descriptor by identifier.
    pub fn field(&self, identifier: &str) -> Option<&FieldDescriptor> {
        self.fields.get(identifier)
    }

    /// Look up a table's parent edge. `None` is expected only for the
    /// base table (the root of the join tree).
    pub fn join(&self, table: &str) -> Option<&JoinPathEntry> {
        self.joins.get(table)
    }
}

// ============================================================================
// Tests
// ============================================================================
