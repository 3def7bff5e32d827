//! Schema crawler.
//!
//! A crawl runs strictly in sequence against one connection:
//! 1. liveness check
//! 2. table/column query, grouped into tables
//! 3. relation query
//!
//! Any failure of steps 1-3 aborts the crawl and is returned unchanged; no
//! partial schema is produced. Individual rows that cannot be decoded are
//! skipped and reported instead.

mod rows;

pub use rows::{collect_relations, decode_column, decode_relation, group_tables};

use crate::catalog::CatalogConnection;
use crate::dialect::Dialect;
use crate::error::{Error, QueryKind, Result, RowDecodeError};
use crate::schema::DatabaseSchema;
use tracing::debug;

/// A catalog row that was dropped during a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Query that produced the row
    pub query: QueryKind,
    /// Zero-based position of the row in that query's result
    pub row: usize,
    pub error: RowDecodeError,
}

/// Crawl result together with the rows that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub schema: DatabaseSchema,
    pub skipped: Vec<SkippedRow>,
}

impl CrawlReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Crawls one schema through a connection and a dialect provider
pub struct Crawler<C> {
    conn: C,
    dialect: Box<dyn Dialect>,
}

impl<C: CatalogConnection> Crawler<C> {
    /// Create a crawler using the default provider for the connection's dialect
    pub fn new(conn: C) -> Self {
        let dialect = conn.kind().provider();
        Self { conn, dialect }
    }

    /// Create a crawler with an explicit provider
    pub fn with_dialect(conn: C, dialect: Box<dyn Dialect>) -> Self {
        Self { conn, dialect }
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Give the connection back
    pub fn into_inner(self) -> C {
        self.conn
    }

    /// Crawl `schema_name`, discarding the skipped-row report
    pub fn crawl(&mut self, schema_name: &str) -> Result<DatabaseSchema> {
        self.crawl_with_report(schema_name).map(|report| report.schema)
    }

    /// Crawl `schema_name` and report which rows were skipped
    pub fn crawl_with_report(&mut self, schema_name: &str) -> Result<CrawlReport> {
        let dialect = self.dialect.name().to_string();

        debug!(dialect = %dialect, schema = schema_name, "Checking connection");
        self.conn
            .ping()
            .map_err(|source| Error::ConnectionUnavailable {
                dialect: dialect.clone(),
                source,
            })?;

        debug!(dialect = %dialect, schema = schema_name, "Crawling tables");
        let table_rows = self
            .conn
            .query(self.dialect.table_query(), &[schema_name])
            .map_err(|source| Error::QueryExecutionFailed {
                query: QueryKind::Tables,
                dialect: dialect.clone(),
                source,
            })?;
        let (tables, mut skipped) = group_tables(table_rows, self.dialect.as_ref());

        debug!(dialect = %dialect, schema = schema_name, "Crawling relations");
        let relation_rows = self
            .conn
            .query(self.dialect.relation_query(), &[schema_name])
            .map_err(|source| Error::QueryExecutionFailed {
                query: QueryKind::Relations,
                dialect: dialect.clone(),
                source,
            })?;
        let (relations, relation_skips) = collect_relations(relation_rows);
        skipped.extend(relation_skips);

        debug!(
            tables = tables.len(),
            relations = relations.len(),
            skipped = skipped.len(),
            "Crawl finished"
        );

        Ok(CrawlReport {
            schema: DatabaseSchema::new(tables, relations),
            skipped,
        })
    }
}
