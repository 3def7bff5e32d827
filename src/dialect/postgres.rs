//! PostgreSQL catalog queries.
//!
//! Key markers are `pg_constraint.contype` codes: `p` for primary key and
//! `f` for foreign key. A column carrying both constraints reports both.

use super::{marker_is, Dialect, KeyFlags};

const TABLE_QUERY: &str = r#"
with col_constraints as (
    select
        k.table_name,
        k.column_name,
        max(case when pgc.contype = 'p' then 'p' end) as pk,
        max(case when pgc.contype = 'f' then 'f' end) as fk
    from
        information_schema.key_column_usage k
        inner join pg_catalog.pg_namespace ns on ns.nspname = k.constraint_schema
        inner join pg_catalog.pg_constraint pgc
            on pgc.conname = k.constraint_name and pgc.connamespace = ns.oid
    where
        k.table_schema = $1::text
    group by k.table_name, k.column_name
)
select
    t.table_name::text,
    c.column_name::text,
    c.data_type::text,
    c.is_nullable::text,
    cc.pk,
    cc.fk
from
    information_schema.tables t
    inner join information_schema.columns c
        on t.table_name = c.table_name and t.table_schema = c.table_schema
    left join col_constraints cc
        on c.table_name = cc.table_name and c.column_name = cc.column_name
where
    t.table_schema = $1::text and t.table_type = 'BASE TABLE'
order by t.table_name, c.ordinal_position
"#;

// Every foreign key is read as many-to-one; composite keys are paired by position.
const RELATION_QUERY: &str = r#"
select
    kcu.table_name::text,
    kcu.column_name::text,
    ref.table_name::text,
    ref.column_name::text
from
    information_schema.table_constraints tc
    inner join information_schema.key_column_usage kcu
        on kcu.constraint_schema = tc.constraint_schema
        and kcu.constraint_name = tc.constraint_name
    inner join information_schema.referential_constraints rc
        on rc.constraint_schema = tc.constraint_schema
        and rc.constraint_name = tc.constraint_name
    inner join information_schema.key_column_usage ref
        on ref.constraint_schema = rc.unique_constraint_schema
        and ref.constraint_name = rc.unique_constraint_name
        and ref.ordinal_position = kcu.position_in_unique_constraint
where
    tc.constraint_type = 'FOREIGN KEY'
    and tc.table_schema = $1::text
order by kcu.table_name, kcu.constraint_name, kcu.ordinal_position
"#;

/// Queries against `information_schema` joined with `pg_constraint`
#[derive(Debug, Clone)]
pub struct PostgresDialect {
    table_query: String,
    relation_query: String,
}

impl PostgresDialect {
    pub fn new() -> Self {
        Self {
            table_query: TABLE_QUERY.to_string(),
            relation_query: RELATION_QUERY.to_string(),
        }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &str {
        "postgres"
    }

    fn table_query(&self) -> &str {
        &self.table_query
    }

    fn relation_query(&self) -> &str {
        &self.relation_query
    }

    fn decode_keys(&self, pk_marker: Option<&str>, fk_marker: Option<&str>) -> KeyFlags {
        KeyFlags::new(marker_is(pk_marker, "p"), marker_is(fk_marker, "f"))
    }
}
