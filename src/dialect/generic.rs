//! ANSI `information_schema` queries shared by several backends.
//!
//! The templates name their parameter `@schema`. A [`SyntaxFlavorer`] rewrites
//! that token (or anything else lexical) into the target backend's syntax once,
//! when the dialect is built.

use super::{marker_is, Dialect, KeyFlags};

const TABLE_QUERY: &str = r#"
with keys as (
    select
        kcu.TABLE_NAME,
        kcu.COLUMN_NAME,
        MAX(tc_p.CONSTRAINT_TYPE) pk,
        MAX(tc_f.CONSTRAINT_TYPE) fk
    from
        INFORMATION_SCHEMA.KEY_COLUMN_USAGE kcu
        left join INFORMATION_SCHEMA.TABLE_CONSTRAINTS tc_p on
            tc_p.TABLE_SCHEMA = kcu.TABLE_SCHEMA
            and tc_p.TABLE_NAME = kcu.TABLE_NAME
            and tc_p.CONSTRAINT_NAME = kcu.CONSTRAINT_NAME
            and tc_p.CONSTRAINT_TYPE = 'PRIMARY KEY'
        left join INFORMATION_SCHEMA.TABLE_CONSTRAINTS tc_f on
            tc_f.TABLE_SCHEMA = kcu.TABLE_SCHEMA
            and tc_f.TABLE_NAME = kcu.TABLE_NAME
            and tc_f.CONSTRAINT_NAME = kcu.CONSTRAINT_NAME
            and tc_f.CONSTRAINT_TYPE = 'FOREIGN KEY'
    where kcu.TABLE_SCHEMA = @schema
    group by kcu.TABLE_NAME, kcu.COLUMN_NAME
)
select
    c.TABLE_NAME,
    c.COLUMN_NAME,
    c.DATA_TYPE,
    c.IS_NULLABLE,
    k.pk,
    k.fk
from
    INFORMATION_SCHEMA.TABLES t
    inner join INFORMATION_SCHEMA.COLUMNS c
        on t.TABLE_SCHEMA = c.TABLE_SCHEMA and t.TABLE_NAME = c.TABLE_NAME
    left join keys k on k.TABLE_NAME = c.TABLE_NAME and k.COLUMN_NAME = c.COLUMN_NAME
where
    c.TABLE_SCHEMA = @schema and t.TABLE_TYPE = 'BASE TABLE'
order by c.TABLE_NAME, c.ORDINAL_POSITION
"#;

const RELATION_QUERY: &str = r#"
select
    ftc.TABLE_NAME src_table,
    kcu1.COLUMN_NAME src_col,
    ptc.TABLE_NAME dst_table,
    kcu2.COLUMN_NAME dst_col
from
    INFORMATION_SCHEMA.REFERENTIAL_CONSTRAINTS rc
    inner join INFORMATION_SCHEMA.TABLE_CONSTRAINTS ftc
        on rc.CONSTRAINT_NAME = ftc.CONSTRAINT_NAME
        and rc.CONSTRAINT_SCHEMA = ftc.CONSTRAINT_SCHEMA
        and ftc.CONSTRAINT_TYPE = 'FOREIGN KEY'
    inner join INFORMATION_SCHEMA.TABLE_CONSTRAINTS ptc
        on rc.UNIQUE_CONSTRAINT_NAME = ptc.CONSTRAINT_NAME
        and rc.UNIQUE_CONSTRAINT_SCHEMA = ptc.CONSTRAINT_SCHEMA
        and ptc.CONSTRAINT_TYPE in ('PRIMARY KEY', 'UNIQUE')
    inner join INFORMATION_SCHEMA.KEY_COLUMN_USAGE kcu1
        on kcu1.CONSTRAINT_SCHEMA = ftc.CONSTRAINT_SCHEMA
        and kcu1.CONSTRAINT_NAME = ftc.CONSTRAINT_NAME
    inner join INFORMATION_SCHEMA.KEY_COLUMN_USAGE kcu2
        on kcu2.CONSTRAINT_SCHEMA = ptc.CONSTRAINT_SCHEMA
        and kcu2.CONSTRAINT_NAME = ptc.CONSTRAINT_NAME
        and kcu2.ORDINAL_POSITION = kcu1.ORDINAL_POSITION
where
    rc.CONSTRAINT_SCHEMA = @schema
order by ftc.TABLE_NAME, ftc.CONSTRAINT_NAME, kcu1.ORDINAL_POSITION
"#;

/// Rewrites dialect-specific tokens of a query template.
///
/// Implemented for every `Fn(&str) -> String`, so plain functions and
/// closures both work.
pub trait SyntaxFlavorer: Fn(&str) -> String {}

impl<F: Fn(&str) -> String> SyntaxFlavorer for F {}

/// Built-in flavorers for the `@schema` placeholder
pub mod flavor {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static SCHEMA_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"@schema\b").unwrap());

    /// Keep the template as written (backends that accept `@name` parameters)
    pub fn identity(sql: &str) -> String {
        sql.to_string()
    }

    /// `@schema` → `$1` (PostgreSQL, DuckDB)
    pub fn dollar_numbered(sql: &str) -> String {
        SCHEMA_PARAM.replace_all(sql, "$$1").into_owned()
    }

    /// `@schema` → `@P1` (SQL Server over TDS)
    pub fn at_numbered(sql: &str) -> String {
        SCHEMA_PARAM.replace_all(sql, "@P1").into_owned()
    }
}

/// SQL-92 `information_schema` queries with a pluggable lexical flavor
#[derive(Debug, Clone)]
pub struct GenericDialect {
    name: String,
    table_query: String,
    relation_query: String,
}

impl GenericDialect {
    /// Build the dialect, applying `flavorer` to both templates
    pub fn new(name: impl Into<String>, flavorer: impl SyntaxFlavorer) -> Self {
        Self {
            name: name.into(),
            table_query: flavorer(TABLE_QUERY),
            relation_query: flavorer(RELATION_QUERY),
        }
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &str {
        &self.name
    }

    fn table_query(&self) -> &str {
        &self.table_query
    }

    fn relation_query(&self) -> &str {
        &self.relation_query
    }

    fn decode_keys(&self, pk_marker: Option<&str>, fk_marker: Option<&str>) -> KeyFlags {
        KeyFlags::new(
            marker_is(pk_marker, "PRIMARY KEY"),
            marker_is(fk_marker, "FOREIGN KEY"),
        )
    }
}
