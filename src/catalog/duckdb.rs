//! DuckDB adapter, crawled through the generic `information_schema` dialect.

use super::{CatalogConnection, CatalogRow, CatalogValue};
use crate::dialect::DialectKind;
use crate::error::BoxError;
use duckdb::types::ValueRef;
use duckdb::Connection;
use tracing::debug;

/// An embedded DuckDB database, file-backed or in memory
pub struct DuckDbConnection {
    conn: Connection,
}

impl DuckDbConnection {
    /// Open a database file; an empty path or `:memory:` opens an in-memory database
    pub fn open(path: &str) -> Result<Self, BoxError> {
        let conn = if path.is_empty() || path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrow the underlying connection (used to seed test databases)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl CatalogConnection for DuckDbConnection {
    fn kind(&self) -> DialectKind {
        DialectKind::Generic
    }

    fn ping(&mut self) -> Result<(), BoxError> {
        self.conn.execute_batch("SELECT 1")?;
        Ok(())
    }

    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, BoxError> {
        debug!(sql = %sql, "Executing catalog query");

        let mut stmt = self.conn.prepare(sql)?;
        let mut rows_result = stmt.query(duckdb::params_from_iter(params.iter().copied()))?;

        let mut rows = Vec::new();
        while let Some(row) = rows_result.next()? {
            let column_count = row.as_ref().column_count();
            let values = (0..column_count)
                .map(|i| match row.get_ref(i) {
                    Ok(ValueRef::Null) => CatalogValue::Null,
                    Ok(ValueRef::Text(s)) => CatalogValue::Text(String::from_utf8_lossy(s).to_string()),
                    Ok(other) => CatalogValue::Unsupported(format!("{:?}", other)),
                    Err(e) => CatalogValue::Unsupported(e.to_string()),
                })
                .collect();
            rows.push(CatalogRow::new(values));
        }

        Ok(rows)
    }
}
