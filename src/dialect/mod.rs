//! Dialect query providers.
//!
//! Each provider owns the two catalog queries for one SQL dialect and the
//! rule that turns that dialect's raw key markers into booleans. The crawler
//! only talks to the [`Dialect`] trait, so adding a dialect never touches it.
//!
//! Every provider's table query must return rows sorted by table name, with
//! columns in ordinal order inside a table. The crawler groups in a single
//! linear pass and relies on that ordering.

mod generic;
mod mssql;
mod postgres;

pub use generic::{flavor, GenericDialect, SyntaxFlavorer};
pub use mssql::MssqlDialect;
pub use postgres::PostgresDialect;

use std::fmt;
use std::str::FromStr;

/// Decoded key markers of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyFlags {
    pub primary: bool,
    pub foreign: bool,
}

impl KeyFlags {
    pub fn new(primary: bool, foreign: bool) -> Self {
        Self { primary, foreign }
    }
}

/// Catalog queries and key decoding for one SQL dialect.
///
/// Table query rows: `(table, column, data_type, is_nullable, pk_marker, fk_marker)`.
/// Relation query rows: `(source_table, source_column, destination_table, destination_column)`.
/// Both queries take the schema name as their only parameter.
pub trait Dialect {
    /// Human-readable dialect name, used in logs and errors
    fn name(&self) -> &str;

    /// Query enumerating tables and columns of a schema
    fn table_query(&self) -> &str;

    /// Query enumerating foreign-key column pairs of a schema
    fn relation_query(&self) -> &str;

    /// Translate raw key markers into flags. `None` is a NULL marker.
    fn decode_keys(&self, pk_marker: Option<&str>, fk_marker: Option<&str>) -> KeyFlags;
}

/// Database families the crate knows how to crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialectKind {
    #[default]
    Postgres,
    SqlServer,
    /// Any ANSI `information_schema` backend (DuckDB out of the box)
    Generic,
}

impl DialectKind {
    /// Schema crawled when the caller does not name one
    pub fn default_schema(&self) -> &'static str {
        match self {
            DialectKind::Postgres => "public",
            DialectKind::SqlServer => "dbo",
            DialectKind::Generic => "main",
        }
    }

    /// Default query provider for this family
    pub fn provider(&self) -> Box<dyn Dialect> {
        match self {
            DialectKind::Postgres => Box::new(PostgresDialect::new()),
            DialectKind::SqlServer => Box::new(MssqlDialect::new()),
            DialectKind::Generic => Box::new(GenericDialect::new("generic", flavor::dollar_numbered)),
        }
    }
}

impl FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DialectKind::Postgres),
            "sqlserver" | "mssql" => Ok(DialectKind::SqlServer),
            "generic" | "duckdb" => Ok(DialectKind::Generic),
            _ => Err(format!(
                "Unknown database type: {}. Valid options: postgres, sqlserver, duckdb",
                s
            )),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialectKind::Postgres => write!(f, "postgres"),
            DialectKind::SqlServer => write!(f, "sqlserver"),
            DialectKind::Generic => write!(f, "generic"),
        }
    }
}

/// True when a marker equals `expected`, ignoring surrounding whitespace
fn marker_is(marker: Option<&str>, expected: &str) -> bool {
    marker.is_some_and(|m| m.trim() == expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_kind_from_str() {
        assert_eq!("postgres".parse::<DialectKind>().unwrap(), DialectKind::Postgres);
        assert_eq!("PG".parse::<DialectKind>().unwrap(), DialectKind::Postgres);
        assert_eq!("mssql".parse::<DialectKind>().unwrap(), DialectKind::SqlServer);
        assert_eq!("duckdb".parse::<DialectKind>().unwrap(), DialectKind::Generic);
        assert!("oracle".parse::<DialectKind>().is_err());
    }

    #[test]
    fn test_default_schema() {
        assert_eq!(DialectKind::Postgres.default_schema(), "public");
        assert_eq!(DialectKind::SqlServer.default_schema(), "dbo");
        assert_eq!(DialectKind::Generic.default_schema(), "main");
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(DialectKind::Postgres.provider().name(), "postgres");
        assert_eq!(DialectKind::SqlServer.provider().name(), "sqlserver");
        assert_eq!(DialectKind::Generic.provider().name(), "generic");
    }

    #[test]
    fn test_marker_is() {
        assert!(marker_is(Some("p"), "p"));
        assert!(marker_is(Some("YES "), "YES"));
        assert!(!marker_is(None, "p"));
        assert!(!marker_is(Some("f"), "p"));
    }
}
