//! Unit tests for the Mermaid renderer.

use mermaider::render::{render_mermaid, to_mermaid, OutputFormat};
use mermaider::{Column, DatabaseSchema, Error, Relation, RelationKind, Table};
use pretty_assertions::assert_eq;
use std::io::{self, Write};

fn column(name: &str, datatype: &str, nullable: bool, pk: bool, fk: bool) -> Column {
    Column {
        name: name.to_string(),
        datatype: datatype.to_string(),
        nullable,
        is_primary_key: pk,
        is_foreign_key: fk,
    }
}

fn relation(source: &str, source_col: &str, dest: &str, dest_col: &str) -> Relation {
    Relation {
        source_table: source.to_string(),
        source_column: source_col.to_string(),
        destination_table: dest.to_string(),
        destination_column: dest_col.to_string(),
        kind: RelationKind::ManyToOne,
    }
}

fn sakila_subset() -> DatabaseSchema {
    DatabaseSchema::new(
        vec![
            Table {
                name: "film".to_string(),
                columns: vec![
                    column("film_id", "integer", false, true, false),
                    column("title", "character varying", false, false, false),
                    column("language_id", "smallint", false, false, true),
                ],
            },
            Table {
                name: "film_actor".to_string(),
                columns: vec![
                    column("actor_id", "smallint", false, true, true),
                    column("film_id", "smallint", false, true, true),
                    column("last_update", "timestamp without time zone", true, false, false),
                ],
            },
            Table {
                name: "language".to_string(),
                columns: vec![column("language_id", "integer", false, true, false)],
            },
        ],
        vec![
            relation("film", "language_id", "language", "language_id"),
            relation("film_actor", "film_id", "film", "film_id"),
        ],
    )
}

#[test]
fn test_single_table_scenario() {
    let schema = DatabaseSchema::new(
        vec![Table {
            name: "table1".to_string(),
            columns: vec![column("pkey", "character varying", false, true, false)],
        }],
        vec![],
    );

    let output = to_mermaid(&schema);

    assert_eq!(
        output,
        "erDiagram\n    table1 {\n        pkey character_varying PK \"not null\"\n    }\n"
    );
    assert!(!output.contains("||--o{"));
}

#[test]
fn test_full_document() {
    let expected = "\
erDiagram
    film {
        film_id integer PK \"not null\"
        title character_varying  \"not null\"
        language_id smallint FK \"not null\"
    }
    film_actor {
        actor_id smallint PK,FK \"not null\"
        film_id smallint PK,FK \"not null\"
        last_update timestamp_without_time_zone  \n    }
    language {
        language_id integer PK \"not null\"
    }
    language ||--o{ film : \"\"
    film ||--o{ film_actor : \"\"
";

    assert_eq!(to_mermaid(&sakila_subset()), expected);
}

#[test]
fn test_rendering_is_deterministic() {
    let schema = sakila_subset();

    let mut first = Vec::new();
    let mut second = Vec::new();
    render_mermaid(&schema, &mut first).unwrap();
    render_mermaid(&schema, &mut second).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_empty_schema() {
    let mut buf = Vec::new();
    render_mermaid(&DatabaseSchema::default(), &mut buf).unwrap();
    assert_eq!(buf, b"erDiagram\n");
}

#[test]
fn test_column_order_is_preserved() {
    let output = to_mermaid(&sakila_subset());
    let film_id = output.find("film_id integer").unwrap();
    let title = output.find("title character_varying").unwrap();
    let language_id = output.find("language_id smallint").unwrap();
    assert!(film_id < title && title < language_id);
}

#[test]
fn test_only_newline_terminators() {
    let output = to_mermaid(&sakila_subset());
    assert!(!output.contains('\r'));
    assert!(output.ends_with('\n'));
}

/// Sink that accepts a fixed number of bytes, then fails
struct LimitedSink {
    written: Vec<u8>,
    limit: usize,
}

impl Write for LimitedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() + buf.len() > self.limit {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_failure_is_reported() {
    let mut sink = LimitedSink {
        written: Vec::new(),
        limit: 0,
    };

    let err = render_mermaid(&sakila_subset(), &mut sink).unwrap_err();

    assert!(matches!(err, Error::SinkWriteFailed(_)));
}

#[test]
fn test_completed_table_blocks_are_flushed_before_failure() {
    let full = to_mermaid(&sakila_subset());
    let first_block_end = full.find("    }\n").unwrap() + "    }\n".len();
    let mut sink = LimitedSink {
        written: Vec::new(),
        limit: first_block_end + 10,
    };

    assert!(render_mermaid(&sakila_subset(), &mut sink).is_err());

    let written = String::from_utf8(sink.written).unwrap();
    assert_eq!(written, &full[..first_block_end]);
}

#[test]
fn test_json_format() {
    let mut buf = Vec::new();
    OutputFormat::Json.render(&sakila_subset(), &mut buf).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(value["tables"].as_array().unwrap().len(), 3);
    assert_eq!(value["relations"][0]["kind"], "many_to_one");
}
