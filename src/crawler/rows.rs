//! Decoding catalog rows into schema model values.

use super::SkippedRow;
use crate::catalog::CatalogRow;
use crate::dialect::Dialect;
use crate::error::{QueryKind, RowDecodeError};
use crate::schema::{Column, Relation, RelationKind, Table};
use ahash::AHashSet;
use tracing::warn;

// Table query layout
const TABLE_NAME: usize = 0;
const COLUMN_NAME: usize = 1;
const DATA_TYPE: usize = 2;
const IS_NULLABLE: usize = 3;
const PK_MARKER: usize = 4;
const FK_MARKER: usize = 5;

/// Decode one table query row into its table name and column
pub fn decode_column(row: &CatalogRow, dialect: &dyn Dialect) -> Result<(String, Column), RowDecodeError> {
    let table = row.text(TABLE_NAME)?;
    let name = row.text(COLUMN_NAME)?;
    let datatype = row.text(DATA_TYPE)?;
    let nullable = row.text(IS_NULLABLE)?;
    let keys = dialect.decode_keys(row.nullable_text(PK_MARKER)?, row.nullable_text(FK_MARKER)?);

    Ok((
        table.to_string(),
        Column {
            name: name.to_string(),
            datatype: datatype.to_string(),
            nullable: nullable.trim().eq_ignore_ascii_case("YES"),
            is_primary_key: keys.primary,
            is_foreign_key: keys.foreign,
        },
    ))
}

/// Decode one relation query row. The kind is always many-to-one.
pub fn decode_relation(row: &CatalogRow) -> Result<Relation, RowDecodeError> {
    Ok(Relation {
        source_table: row.text(0)?.to_string(),
        source_column: row.text(1)?.to_string(),
        destination_table: row.text(2)?.to_string(),
        destination_column: row.text(3)?.to_string(),
        kind: RelationKind::ManyToOne,
    })
}

/// Group table query rows into tables in one linear pass.
///
/// Rows must arrive sorted by table name. Consecutive rows with the same
/// table name form one table; column order is the row order. Rows that fail
/// to decode are skipped and returned alongside the tables.
pub fn group_tables<I>(rows: I, dialect: &dyn Dialect) -> (Vec<Table>, Vec<SkippedRow>)
where
    I: IntoIterator<Item = CatalogRow>,
{
    let mut tables: Vec<Table> = Vec::new();
    let mut skipped = Vec::new();
    let mut current: Option<Table> = None;
    let mut finished: AHashSet<String> = AHashSet::new();

    for (index, row) in rows.into_iter().enumerate() {
        let (table_name, column) = match decode_column(&row, dialect) {
            Ok(decoded) => decoded,
            Err(error) => {
                skipped.push(skip(QueryKind::Tables, index, error));
                continue;
            }
        };

        match current {
            Some(ref mut table) if table.name == table_name => {
                table.columns.push(column);
                continue;
            }
            _ => {}
        }

        if let Some(table) = current.take() {
            finished.insert(table.name.clone());
            tables.push(table);
        }
        if finished.contains(&table_name) {
            warn!(
                table = %table_name,
                dialect = dialect.name(),
                "catalog rows are not grouped by table name"
            );
        }

        let mut table = Table::new(table_name);
        table.columns.push(column);
        current = Some(table);
    }

    if let Some(table) = current {
        tables.push(table);
    }

    (tables, skipped)
}

/// Turn relation query rows into relations, skipping undecodable rows
pub fn collect_relations<I>(rows: I) -> (Vec<Relation>, Vec<SkippedRow>)
where
    I: IntoIterator<Item = CatalogRow>,
{
    let mut relations = Vec::new();
    let mut skipped = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        match decode_relation(&row) {
            Ok(relation) => relations.push(relation),
            Err(error) => skipped.push(skip(QueryKind::Relations, index, error)),
        }
    }

    (relations, skipped)
}

fn skip(query: QueryKind, row: usize, error: RowDecodeError) -> SkippedRow {
    warn!(query = %query, row, error = %error, "skipping undecodable catalog row");
    SkippedRow { query, row, error }
}
