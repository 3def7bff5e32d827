//! SQL Server adapter.
//!
//! tiberius is async-only; the adapter owns a current-thread runtime and
//! blocks on each call so the crawler stays synchronous.

use super::{CatalogConnection, CatalogRow, CatalogValue};
use crate::dialect::DialectKind;
use crate::error::BoxError;
use tiberius::{Client, Config, Row, ToSql};
use tokio::net::TcpStream;
use tokio::runtime::{Builder, Runtime};
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::debug;

/// A SQL Server connection owned by one crawl
pub struct MssqlConnection {
    runtime: Runtime,
    client: Client<Compat<TcpStream>>,
}

impl MssqlConnection {
    /// Connect with an ADO.NET connection string
    pub fn connect(connection_string: &str) -> Result<Self, BoxError> {
        let config = Config::from_ado_string(connection_string)?;
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let client = runtime.block_on(async move {
            let tcp = TcpStream::connect(config.get_addr()).await?;
            tcp.set_nodelay(true)?;
            let client = Client::connect(config, tcp.compat_write()).await?;
            Ok::<_, BoxError>(client)
        })?;

        Ok(Self { runtime, client })
    }
}

impl CatalogConnection for MssqlConnection {
    fn kind(&self) -> DialectKind {
        DialectKind::SqlServer
    }

    fn ping(&mut self) -> Result<(), BoxError> {
        let client = &mut self.client;
        self.runtime.block_on(async {
            client.simple_query("SELECT 1").await?.into_results().await?;
            Ok::<_, BoxError>(())
        })
    }

    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, BoxError> {
        debug!(sql = %sql, "Executing catalog query");

        let params: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();
        let client = &mut self.client;
        let rows = self.runtime.block_on(async {
            let stream = client.query(sql, &params).await?;
            let rows = stream.into_first_result().await?;
            Ok::<_, BoxError>(rows)
        })?;

        Ok(rows.iter().map(convert_row).collect())
    }
}

fn convert_row(row: &Row) -> CatalogRow {
    let values = (0..row.len())
        .map(|i| match row.try_get::<&str, usize>(i) {
            Ok(Some(s)) => CatalogValue::Text(s.to_string()),
            Ok(None) => CatalogValue::Null,
            Err(_) => CatalogValue::Unsupported(format!("{:?}", row.columns()[i].column_type())),
        })
        .collect();
    CatalogRow::new(values)
}
