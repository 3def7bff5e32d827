//! Mermaid erDiagram output.

use crate::error::Result;
use crate::schema::{Column, DatabaseSchema};
use std::io::{BufWriter, Write};

const INDENT: &str = "    ";

/// Write `schema` as a Mermaid erDiagram to `sink`.
///
/// Tables come first in schema order, then one relationship line per
/// relation. The buffer is flushed after every table block and once at the end.
pub fn render_mermaid<W: Write>(schema: &DatabaseSchema, sink: W) -> Result<()> {
    let mut out = BufWriter::new(sink);

    out.write_all(b"erDiagram\n")?;

    for table in &schema.tables {
        writeln!(out, "{}{} {{", INDENT, table.name)?;
        for column in &table.columns {
            write_column(&mut out, column)?;
        }
        writeln!(out, "{}}}", INDENT)?;
        out.flush()?;
    }

    for relation in &schema.relations {
        writeln!(
            out,
            "{}{} {} {} : \"\"",
            INDENT,
            relation.destination_table,
            relation.kind.as_mermaid(),
            relation.source_table
        )?;
    }

    out.flush()?;
    Ok(())
}

/// Render to an in-memory string
pub fn to_mermaid(schema: &DatabaseSchema) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail
    let _ = render_mermaid(schema, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_column<W: Write>(out: &mut W, column: &Column) -> std::io::Result<()> {
    let null_annotation = if column.nullable { "" } else { "\"not null\"" };
    writeln!(
        out,
        "{}{}{} {} {} {}",
        INDENT,
        INDENT,
        column.name,
        escape_type(&column.datatype),
        column.key_annotation(),
        null_annotation
    )
}

/// Replace whitespace inside a type name so Mermaid sees a single token
pub fn escape_type(datatype: &str) -> String {
    datatype.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Relation, RelationKind, Table};

    fn column(name: &str, datatype: &str, nullable: bool, pk: bool, fk: bool) -> Column {
        Column {
            name: name.to_string(),
            datatype: datatype.to_string(),
            nullable,
            is_primary_key: pk,
            is_foreign_key: fk,
        }
    }

    fn create_test_schema() -> DatabaseSchema {
        DatabaseSchema::new(
            vec![
                Table {
                    name: "users".to_string(),
                    columns: vec![
                        column("id", "integer", false, true, false),
                        column("email", "character varying", true, false, false),
                    ],
                },
                Table {
                    name: "orders".to_string(),
                    columns: vec![
                        column("id", "integer", false, true, false),
                        column("user_id", "integer", false, false, true),
                    ],
                },
            ],
            vec![Relation {
                source_table: "orders".to_string(),
                source_column: "user_id".to_string(),
                destination_table: "users".to_string(),
                destination_column: "id".to_string(),
                kind: RelationKind::ManyToOne,
            }],
        )
    }

    #[test]
    fn test_mermaid_er_diagram() {
        let output = to_mermaid(&create_test_schema());

        assert!(output.starts_with("erDiagram\n"));
        assert!(output.contains("    users {\n"));
        assert!(output.contains("    orders {\n"));
    }

    #[test]
    fn test_mermaid_columns() {
        let output = to_mermaid(&create_test_schema());

        assert!(output.contains("        id integer PK \"not null\"\n"));
        assert!(output.contains("        email character_varying  \n"));
        assert!(output.contains("        user_id integer FK \"not null\"\n"));
    }

    #[test]
    fn test_mermaid_relationships() {
        let output = to_mermaid(&create_test_schema());

        assert!(output.ends_with("    users ||--o{ orders : \"\"\n"));
    }

    #[test]
    fn test_tables_precede_relations() {
        let output = to_mermaid(&create_test_schema());
        let last_block = output.rfind("    }\n").unwrap();
        let relation = output.find("||--o{").unwrap();
        assert!(last_block < relation);
    }

    #[test]
    fn test_escape_type() {
        assert_eq!(escape_type("character varying"), "character_varying");
        assert_eq!(escape_type("timestamp  without time zone"), "timestamp_without_time_zone");
        assert_eq!(escape_type("integer"), "integer");
    }

    #[test]
    fn test_empty_schema_renders_header_only() {
        assert_eq!(to_mermaid(&DatabaseSchema::default()), "erDiagram\n");
    }
}
