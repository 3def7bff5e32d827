//! Error types for crawling a catalog and rendering the result.

use std::fmt;
use std::io;

use thiserror::Error;

/// Boxed driver error. Adapters hand their native error back unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for crawl and render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which of the two catalog queries a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// The table/column enumeration query
    Tables,
    /// The foreign-key enumeration query
    Relations,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::Tables => write!(f, "tables"),
            QueryKind::Relations => write!(f, "relations"),
        }
    }
}

/// Fatal failures of a crawl or a render pass.
#[derive(Error, Debug)]
pub enum Error {
    /// The liveness check failed; no catalog query was issued.
    #[error("{dialect} connection is unavailable")]
    ConnectionUnavailable {
        dialect: String,
        #[source]
        source: BoxError,
    },

    /// A catalog query could not be executed.
    #[error("{dialect} {query} query failed")]
    QueryExecutionFailed {
        query: QueryKind,
        dialect: String,
        #[source]
        source: BoxError,
    },

    /// The output sink rejected a write or a flush.
    #[error("failed to write diagram output")]
    SinkWriteFailed(#[from] io::Error),

    /// The schema could not be serialized as JSON.
    #[error("failed to serialize schema")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// The catalog query this error belongs to, if any.
    pub fn query(&self) -> Option<QueryKind> {
        match self {
            Error::QueryExecutionFailed { query, .. } => Some(*query),
            _ => None,
        }
    }
}

/// Why a single catalog row could not be decoded.
///
/// Not fatal: the crawler drops the row and records it in its report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowDecodeError {
    #[error("row has no column at index {index}")]
    MissingColumn { index: usize },

    #[error("column {column} is NULL")]
    UnexpectedNull { column: usize },

    #[error("column {column} holds a non-text value ({type_name})")]
    UnsupportedValue { column: usize, type_name: String },
}
