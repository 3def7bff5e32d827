//! Crawl a database catalog into a dialect-free schema model and render it
//! as a Mermaid entity-relationship diagram.
//!
//! ```ignore
//! use mermaider::catalog::PostgresConnection;
//! use mermaider::crawler::Crawler;
//! use mermaider::render::render_mermaid;
//!
//! let conn = PostgresConnection::connect("postgres://postgres@localhost/sakila")?;
//! let schema = Crawler::new(conn).crawl("public")?;
//! render_mermaid(&schema, std::io::stdout())?;
//! ```

pub mod catalog;
pub mod crawler;
pub mod dialect;
pub mod error;
pub mod render;
pub mod schema;

pub use crawler::{CrawlReport, Crawler, SkippedRow};
pub use error::{Error, Result};
pub use schema::{Column, DatabaseSchema, Relation, RelationKind, Table};
