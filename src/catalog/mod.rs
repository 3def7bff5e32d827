//! Connection boundary between the crawler and a live database.
//!
//! The crawler never sees a driver type. Each adapter runs a catalog query
//! and hands back rows of [`CatalogValue`] cells, in the order the database
//! returned them.

mod duckdb;
mod mssql;
mod postgres;

pub use self::duckdb::DuckDbConnection;
pub use self::mssql::MssqlConnection;
pub use self::postgres::PostgresConnection;

use crate::dialect::DialectKind;
use crate::error::{BoxError, RowDecodeError};
use std::str::FromStr;

/// A single cell of a catalog result row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValue {
    Null,
    Text(String),
    /// A value the adapter could not read as text; holds a type description
    Unsupported(String),
}

impl From<&str> for CatalogValue {
    fn from(s: &str) -> Self {
        CatalogValue::Text(s.to_string())
    }
}

impl From<Option<&str>> for CatalogValue {
    fn from(s: Option<&str>) -> Self {
        s.map_or(CatalogValue::Null, CatalogValue::from)
    }
}

/// One catalog result row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow(pub Vec<CatalogValue>);

impl CatalogRow {
    pub fn new(values: Vec<CatalogValue>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a non-NULL text cell
    pub fn text(&self, index: usize) -> Result<&str, RowDecodeError> {
        match self.nullable_text(index)? {
            Some(s) => Ok(s),
            None => Err(RowDecodeError::UnexpectedNull { column: index }),
        }
    }

    /// Read a text cell that may be NULL
    pub fn nullable_text(&self, index: usize) -> Result<Option<&str>, RowDecodeError> {
        match self.0.get(index) {
            None => Err(RowDecodeError::MissingColumn { index }),
            Some(CatalogValue::Null) => Ok(None),
            Some(CatalogValue::Text(s)) => Ok(Some(s)),
            Some(CatalogValue::Unsupported(type_name)) => Err(RowDecodeError::UnsupportedValue {
                column: index,
                type_name: type_name.clone(),
            }),
        }
    }
}

impl<V: Into<CatalogValue>> FromIterator<V> for CatalogRow {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// An open, dialect-resolved database connection.
///
/// One crawl owns the connection for its whole duration; implementations
/// need not support concurrent use.
pub trait CatalogConnection {
    /// Database family behind this connection
    fn kind(&self) -> DialectKind;

    /// Liveness check run before any catalog query
    fn ping(&mut self) -> Result<(), BoxError>;

    /// Run a catalog query with positional text parameters
    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, BoxError>;
}

impl<C: CatalogConnection + ?Sized> CatalogConnection for &mut C {
    fn kind(&self) -> DialectKind {
        (**self).kind()
    }

    fn ping(&mut self) -> Result<(), BoxError> {
        (**self).ping()
    }

    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, BoxError> {
        (**self).query(sql, params)
    }
}

impl<C: CatalogConnection + ?Sized> CatalogConnection for Box<C> {
    fn kind(&self) -> DialectKind {
        (**self).kind()
    }

    fn ping(&mut self) -> Result<(), BoxError> {
        (**self).ping()
    }

    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, BoxError> {
        (**self).query(sql, params)
    }
}

/// Guess the database family from a connection string.
///
/// PostgreSQL URLs and key/value strings parse as a `postgres::Config`;
/// ADO.NET strings with a `server=` key are taken as SQL Server.
pub fn detect_kind(connection_string: &str) -> Option<DialectKind> {
    if ::postgres::Config::from_str(connection_string).is_ok() {
        return Some(DialectKind::Postgres);
    }

    let is_ado = connection_string
        .split(';')
        .filter_map(|part| part.split_once('='))
        .any(|(key, _)| {
            matches!(
                key.trim().to_lowercase().as_str(),
                "server" | "data source" | "address" | "addr"
            )
        });
    if is_ado && tiberius::Config::from_ado_string(connection_string).is_ok() {
        return Some(DialectKind::SqlServer);
    }

    None
}

/// Open a connection for the given family
pub fn connect(kind: DialectKind, connection_string: &str) -> Result<Box<dyn CatalogConnection>, BoxError> {
    let conn: Box<dyn CatalogConnection> = match kind {
        DialectKind::Postgres => Box::new(PostgresConnection::connect(connection_string)?),
        DialectKind::SqlServer => Box::new(MssqlConnection::connect(connection_string)?),
        DialectKind::Generic => Box::new(DuckDbConnection::open(connection_string)?),
    };
    Ok(conn)
}
