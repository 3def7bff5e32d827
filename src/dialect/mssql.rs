//! SQL Server catalog queries.
//!
//! `INFORMATION_SCHEMA` has no per-column constraint code, so the table query
//! folds each constraint type into a `'YES'`/`NULL` marker column.

use super::{marker_is, Dialect, KeyFlags};

const TABLE_QUERY: &str = r#"
with keys as (
    select
        kcu.TABLE_NAME,
        kcu.COLUMN_NAME,
        MAX(IIF(tc.CONSTRAINT_TYPE = 'PRIMARY KEY', 'YES', NULL)) pk,
        MAX(IIF(tc.CONSTRAINT_TYPE = 'FOREIGN KEY', 'YES', NULL)) fk
    from
        INFORMATION_SCHEMA.KEY_COLUMN_USAGE kcu
        inner join INFORMATION_SCHEMA.TABLE_CONSTRAINTS tc on
            tc.CONSTRAINT_SCHEMA = kcu.CONSTRAINT_SCHEMA
            and tc.CONSTRAINT_NAME = kcu.CONSTRAINT_NAME
    where kcu.TABLE_SCHEMA = @P1
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
    c.TABLE_SCHEMA = @P1 and t.TABLE_TYPE = 'BASE TABLE'
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
    rc.CONSTRAINT_SCHEMA = @P1
order by ftc.TABLE_NAME, ftc.CONSTRAINT_NAME, kcu1.ORDINAL_POSITION
"#;

/// Queries against SQL Server `INFORMATION_SCHEMA`, bound with `@P1`
#[derive(Debug, Clone)]
pub struct MssqlDialect {
    table_query: String,
    relation_query: String,
}

impl MssqlDialect {
    pub fn new() -> Self {
        Self {
            table_query: TABLE_QUERY.to_string(),
            relation_query: RELATION_QUERY.to_string(),
        }
    }
}

impl Default for MssqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for MssqlDialect {
    fn name(&self) -> &str {
        "sqlserver"
    }

    fn table_query(&self) -> &str {
        &self.table_query
    }

    fn relation_query(&self) -> &str {
        &self.relation_query
    }

    fn decode_keys(&self, pk_marker: Option<&str>, fk_marker: Option<&str>) -> KeyFlags {
        KeyFlags::new(marker_is(pk_marker, "YES"), marker_is(fk_marker, "YES"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_yes_markers() {
        let d = MssqlDialect::new();
        assert_eq!(d.decode_keys(Some("YES"), None), KeyFlags::new(true, false));
        assert_eq!(d.decode_keys(None, Some("YES")), KeyFlags::new(false, true));
        assert_eq!(d.decode_keys(Some("YES"), Some("YES")), KeyFlags::new(true, true));
        assert_eq!(d.decode_keys(None, None), KeyFlags::new(false, false));
    }

    #[test]
    fn test_decode_rejects_other_literals() {
        let d = MssqlDialect::new();
        assert_eq!(d.decode_keys(Some("NO"), Some("")), KeyFlags::default());
        assert_eq!(
            d.decode_keys(Some("PRIMARY KEY"), Some("FOREIGN KEY")),
            KeyFlags::default()
        );
    }

    #[test]
    fn test_queries_use_sqlserver_placeholder() {
        let d = MssqlDialect::new();
        assert!(d.table_query().contains("@P1"));
        assert!(d.relation_query().contains("@P1"));
        assert!(d
            .table_query()
            .contains("order by c.TABLE_NAME, c.ORDINAL_POSITION"));
    }
}
