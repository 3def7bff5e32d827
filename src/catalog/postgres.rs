//! Blocking PostgreSQL adapter.

use super::{CatalogConnection, CatalogRow, CatalogValue};
use crate::dialect::DialectKind;
use crate::error::BoxError;
use postgres::types::ToSql;
use postgres::{Client, NoTls, Row};
use std::time::Duration;
use tracing::debug;

const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// A PostgreSQL connection owned by one crawl
pub struct PostgresConnection {
    client: Client,
}

impl PostgresConnection {
    /// Connect with a URL or key/value connection string (no TLS)
    pub fn connect(connection_string: &str) -> Result<Self, BoxError> {
        let client = Client::connect(connection_string, NoTls)?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl CatalogConnection for PostgresConnection {
    fn kind(&self) -> DialectKind {
        DialectKind::Postgres
    }

    fn ping(&mut self) -> Result<(), BoxError> {
        self.client.is_valid(PING_TIMEOUT)?;
        Ok(())
    }

    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, BoxError> {
        debug!(sql = %sql, "Executing catalog query");

        let params: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        let rows = self.client.query(sql, &params)?;
        Ok(rows.iter().map(convert_row).collect())
    }
}

fn convert_row(row: &Row) -> CatalogRow {
    let values = (0..row.len())
        .map(|i| match row.try_get::<_, Option<String>>(i) {
            Ok(Some(s)) => CatalogValue::Text(s),
            Ok(None) => CatalogValue::Null,
            Err(_) => CatalogValue::Unsupported(row.columns()[i].type_().name().to_string()),
        })
        .collect();
    CatalogRow::new(values)
}
