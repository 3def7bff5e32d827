//! JSON output of the canonical schema model.

use crate::error::Result;
use crate::schema::DatabaseSchema;
use std::io::{BufWriter, Write};

/// Pretty-print `schema` as JSON to `sink`, followed by a newline
pub fn render_json<W: Write>(schema: &DatabaseSchema, sink: W) -> Result<()> {
    let mut out = BufWriter::new(sink);
    serde_json::to_writer_pretty(&mut out, schema)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
