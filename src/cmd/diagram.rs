//! Crawl a live database and write its diagram.

use super::Cli;
use anyhow::{anyhow, Context, Result};
use mermaider::catalog::{self, detect_kind};
use mermaider::dialect::DialectKind;
use mermaider::render::OutputFormat;
use mermaider::Crawler;
use std::fs::File;
use std::io;
use std::path::Path;

/// Run the crawl and render pipeline
pub fn run(cli: Cli) -> Result<()> {
    let kind = resolve_kind(&cli.connection_string, &cli.db_type)?;
    let schema_name = cli
        .schema
        .clone()
        .unwrap_or_else(|| kind.default_schema().to_string());
    let format = resolve_format(cli.format.as_deref(), cli.output.as_deref())?;

    if !cli.quiet {
        eprintln!("Crawling schema '{}' [database: {}]", schema_name, kind);
    }

    let conn = catalog::connect(kind, &cli.connection_string)
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("failed to connect to {} database", kind))?;

    let mut crawler = Crawler::new(conn);
    let report = crawler
        .crawl_with_report(&schema_name)
        .with_context(|| format!("failed to crawl schema '{}'", schema_name))?;
    let schema = &report.schema;

    if let Some(ref out_path) = cli.output {
        let file = File::create(out_path)
            .with_context(|| format!("failed to create {}", out_path.display()))?;
        format.render(schema, file)?;
        if !cli.quiet {
            eprintln!("ERD written to: {}", out_path.display());
        }
    } else {
        format.render(schema, io::stdout().lock())?;
    }

    if !cli.quiet {
        if report.skipped_count() > 0 {
            eprintln!(
                "\nWarning: {} catalog rows could not be decoded and were skipped",
                report.skipped_count()
            );
        }
        eprintln!(
            "\nERD: {} tables, {} columns, {} relationships",
            schema.tables.len(),
            schema.column_count(),
            schema.relations.len()
        );
    }

    Ok(())
}

/// Pick the database family. An explicit non-default `--db-type` wins;
/// otherwise the connection string is sniffed and postgres is the fallback.
fn resolve_kind(connection_string: &str, db_type: &str) -> Result<DialectKind> {
    let requested: DialectKind = db_type.parse().map_err(|e: String| anyhow!(e))?;

    if requested == DialectKind::Postgres {
        return Ok(detect_kind(connection_string).unwrap_or(requested));
    }

    Ok(requested)
}

fn resolve_format(format: Option<&str>, output: Option<&Path>) -> Result<OutputFormat> {
    if let Some(f) = format {
        return f.parse().map_err(|e: String| anyhow!(e));
    }

    Ok(output
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension)
        .unwrap_or_default())
}
