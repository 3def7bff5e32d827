//! Canonical schema model.
//!
//! This module provides the dialect-free representation of a crawled schema:
//! - Tables with their columns in catalog (ordinal) order
//! - Foreign-key relations between tables
//!
//! Values are built once by the crawler and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column definition within a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Raw catalog type name, e.g. `character varying`
    pub datatype: String,
    /// Whether this column allows NULL values
    pub nullable: bool,
    /// Whether this column is part of the primary key
    pub is_primary_key: bool,
    /// Whether this column is part of a foreign key
    pub is_foreign_key: bool,
}

impl Column {
    /// Key annotation token for diagram output
    pub fn key_annotation(&self) -> &'static str {
        match (self.is_primary_key, self.is_foreign_key) {
            (true, true) => "PK,FK",
            (true, false) => "PK",
            (false, true) => "FK",
            (false, false) => "",
        }
    }
}

/// A table and its columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name, unique within one crawl
    pub name: String,
    /// All columns in ordinal order
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Relationship cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    // Every crawled foreign key is classified this way
    #[default]
    ManyToOne,
    ManyToMany,
}

impl RelationKind {
    /// Mermaid ERD notation, read from the destination table to the source table
    pub fn as_mermaid(self) -> &'static str {
        match self {
            RelationKind::ManyToOne => "||--o{",
            RelationKind::OneToOne => "||--||",
            RelationKind::OneToMany => "}o--||",
            RelationKind::ManyToMany => "}o--o{",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::OneToOne => write!(f, "one-to-one"),
            RelationKind::OneToMany => write!(f, "one-to-many"),
            RelationKind::ManyToOne => write!(f, "many-to-one"),
            RelationKind::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

/// One foreign-key edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Table holding the foreign key
    pub source_table: String,
    /// Foreign key column
    pub source_column: String,
    /// Table holding the referenced key
    pub destination_table: String,
    /// Referenced column
    pub destination_column: String,
    pub kind: RelationKind,
}

/// Result of one crawl: every table and relation of a schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSchema {
    pub tables: Vec<Table>,
    pub relations: Vec<Relation>,
}

impl DatabaseSchema {
    pub fn new(tables: Vec<Table>, relations: Vec<Relation>) -> Self {
        Self { tables, relations }
    }

    /// Get a table by name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// True when the crawl found no tables and no relations
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.relations.is_empty()
    }

    /// Total number of columns over all tables
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(pk: bool, fk: bool) -> Column {
        Column {
            name: "id".to_string(),
            datatype: "integer".to_string(),
            nullable: false,
            is_primary_key: pk,
            is_foreign_key: fk,
        }
    }

    #[test]
    fn test_key_annotation() {
        assert_eq!(column(true, true).key_annotation(), "PK,FK");
        assert_eq!(column(true, false).key_annotation(), "PK");
        assert_eq!(column(false, true).key_annotation(), "FK");
        assert_eq!(column(false, false).key_annotation(), "");
    }

    #[test]
    fn test_relation_kind_default_is_many_to_one() {
        assert_eq!(RelationKind::default(), RelationKind::ManyToOne);
        assert_eq!(RelationKind::ManyToOne.as_mermaid(), "||--o{");
    }

    #[test]
    fn test_schema_lookups() {
        let mut users = Table::new("users");
        users.columns.push(column(true, false));
        let schema = DatabaseSchema::new(vec![users], vec![]);

        assert!(!schema.is_empty());
        assert_eq!(schema.column_count(), 1);
        assert!(schema.table("users").unwrap().column("id").is_some());
        assert!(schema.table("orders").is_none());
    }

    #[test]
    fn test_empty_schema() {
        let schema = DatabaseSchema::default();
        assert!(schema.is_empty());
        assert_eq!(schema.column_count(), 0);
    }
}
