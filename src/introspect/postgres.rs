use postgres::Client;
use tracing::{debug, error, info, trace};

use super::{Introspector, TableFilter};
use crate::prelude::{ExemplarError, IntrospectedTable};
use crate::schema::{ColumnDescriptor, JdbcType};

/// PostgreSQL introspector
pub struct PostgresIntrospector<'a> {
    client: &'a mut Client,
}

impl<'a> PostgresIntrospector<'a> {
    pub fn new(client: &'a mut Client) -> Self {
        Self { client }
    }
}

impl Introspector for PostgresIntrospector<'_> {
    fn introspect(
        &mut self,
        schema_name: &str,
        filter: &TableFilter,
    ) -> Result<Vec<IntrospectedTable>, ExemplarError> {
        info!(schema = ?schema_name, "Starting schema introspection");

        let all_table_names = query_tables(self.client, schema_name)?;
        debug!(count = ?all_table_names.len(), "Found all tables");

        let table_names: Vec<String> = all_table_names
            .into_iter()
            .filter(|name| filter.should_include(name))
            .collect();
        debug!(count = ?table_names.len(), "Tables after filtering");

        let mut tables = Vec::with_capacity(table_names.len());
        for table_name in table_names {
            debug!(table = ?table_name, "Introspecting table");

            let columns = query_columns(self.client, schema_name, &table_name)?;
            trace!(table = ?table_name, columns = ?columns.len(), "Found columns");

            let primary_key = query_primary_key(self.client, schema_name, &table_name)?;
            trace!(table = ?table_name, primary_key = ?primary_key, "Found primary key");

            let mut table = IntrospectedTable::new(&table_name, columns);
            table.schema = qualifying_schema(schema_name);
            table.primary_key = primary_key;
            tables.push(table);
        }

        info!(
            schema = ?schema_name,
            tables = ?tables.len(),
            "Schema introspection complete"
        );

        Ok(tables)
    }
}

/// Tables in the default search path are referenced unqualified
fn qualifying_schema(schema_name: &str) -> Option<String> {
    if schema_name == "public" {
        None
    } else {
        Some(schema_name.to_string())
    }
}

/// Query all table names in a schema
fn query_tables(client: &mut Client, schema_name: &str) -> Result<Vec<String>, ExemplarError> {
    trace!(schema = ?schema_name, "Querying tables");

    let sql = r#"
        SELECT c.relname AS table_name
        FROM pg_class c
        JOIN pg_namespace n ON n.oid = c.relnamespace
        WHERE c.relkind = 'r'
            AND n.nspname = $1
        ORDER BY c.relname
    "#;

    let rows = client
        .query(sql, &[&schema_name])
        .map_err(|e| ExemplarError::Introspection {
            schema: schema_name.to_string(),
            message: format!("Failed to query tables: {}", e),
        })?;

    let tables = rows.iter().map(|row| row.get("table_name")).collect();
    trace!(tables = ?tables, "Tables found");
    Ok(tables)
}

/// Query all columns for a table
fn query_columns(
    client: &mut Client,
    schema_name: &str,
    table_name: &str,
) -> Result<Vec<ColumnDescriptor>, ExemplarError> {
    trace!(schema = ?schema_name, table = ?table_name, "Querying columns");

    let sql = r#"
        SELECT
            a.attname AS column_name,
            format_type(a.atttypid, a.atttypmod) AS data_type,
            NOT a.attnotnull AS is_nullable
        FROM pg_attribute a
        JOIN pg_class c ON c.oid = a.attrelid
        JOIN pg_namespace n ON n.oid = c.relnamespace
        WHERE c.relname = $1
            AND n.nspname = $2
            AND a.attnum > 0
            AND NOT a.attisdropped
        ORDER BY a.attnum
    "#;

    let rows = client
        .query(sql, &[&table_name, &schema_name])
        .map_err(|e| {
            error!(
                schema = ?schema_name,
                table = ?table_name,
                error = ?e,
                "Failed to query columns"
            );
            ExemplarError::Introspection {
                schema: schema_name.to_string(),
                message: format!("Failed to query columns for table '{}': {}", table_name, e),
            }
        })?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in rows {
        let column_name: String = row.get("column_name");
        let data_type: String = row.get("data_type");
        let is_nullable: bool = row.get("is_nullable");

        let column = describe_column(&column_name, &data_type, is_nullable);
        trace!(
            column = ?column_name,
            data_type = ?data_type,
            jdbc_type = column.jdbc_type_name(),
            java_type = ?column.java_type.full_name(),
            is_nullable = ?is_nullable,
            "Parsed column"
        );
        columns.push(column);
    }

    Ok(columns)
}

/// Query primary key columns for a table
fn query_primary_key(
    client: &mut Client,
    schema_name: &str,
    table_name: &str,
) -> Result<Vec<String>, ExemplarError> {
    trace!(schema = ?schema_name, table = ?table_name, "Querying primary key");

    let sql = r#"
        SELECT a.attname AS column_name
        FROM pg_constraint con
        JOIN pg_class c ON c.oid = con.conrelid
        JOIN pg_namespace n ON n.oid = c.relnamespace
        JOIN pg_attribute a ON a.attrelid = c.oid AND a.attnum = ANY(con.conkey)
        WHERE con.contype = 'p'
            AND c.relname = $1
            AND n.nspname = $2
        ORDER BY array_position(con.conkey, a.attnum)
    "#;

    let rows = client
        .query(sql, &[&table_name, &schema_name])
        .map_err(|e| {
            error!(
                schema = ?schema_name,
                table = ?table_name,
                error = ?e,
                "Failed to query primary key"
            );
            ExemplarError::Introspection {
                schema: schema_name.to_string(),
                message: format!(
                    "Failed to query primary key for table '{}': {}",
                    table_name, e
                ),
            }
        })?;

    let pk_columns = rows.iter().map(|row| row.get("column_name")).collect();
    trace!(table = ?table_name, primary_key = ?pk_columns, "Primary key found");
    Ok(pk_columns)
}

/// Build a column descriptor from `format_type` output
fn describe_column(name: &str, type_str: &str, is_nullable: bool) -> ColumnDescriptor {
    let (jdbc_type, length, scale) = parse_data_type(type_str);
    let column = ColumnDescriptor::new(name, jdbc_type).with_precision(length, scale);
    if is_nullable {
        column
    } else {
        column.not_null()
    }
}

/// Map a PostgreSQL type string to its JDBC type, length and scale
///
/// Follows what the PostgreSQL JDBC driver reports: `text` and enum types
/// read as VARCHAR and `bytea` as BINARY. Known extension types map to OTHER.
fn parse_data_type(type_str: &str) -> (JdbcType, u32, u32) {
    let lower = type_str.to_lowercase();
    let trimmed = lower.trim();

    if trimmed.ends_with("[]") {
        return (JdbcType::Array, 0, 0);
    }

    let (length, scale) = extract_precision(trimmed);

    if trimmed.starts_with("character varying") || trimmed.starts_with("varchar") {
        return (JdbcType::Varchar, length, 0);
    }
    if trimmed.starts_with("character") || trimmed.starts_with("char") || trimmed == "bpchar" {
        return (JdbcType::Char, length.max(1), 0);
    }
    if trimmed.starts_with("numeric") || trimmed.starts_with("decimal") {
        // Unconstrained numeric has no declared precision
        let length = if length == 0 { 131_072 } else { length };
        return (JdbcType::Numeric, length, scale);
    }
    if trimmed.starts_with("timestamp") {
        return (JdbcType::Timestamp, 0, 0);
    }
    if trimmed.starts_with("time ") || trimmed.starts_with("time(") || trimmed == "time" {
        return (JdbcType::Time, 0, 0);
    }
    if trimmed.starts_with("bit") {
        return (JdbcType::Bit, length, 0);
    }

    let jdbc_type = match trimmed {
        "smallint" | "int2" => JdbcType::SmallInt,
        "integer" | "int" | "int4" => JdbcType::Integer,
        "bigint" | "int8" => JdbcType::BigInt,
        "boolean" | "bool" => JdbcType::Boolean,
        "text" => JdbcType::Varchar,
        "real" | "float4" => JdbcType::Real,
        "double precision" | "float8" => JdbcType::Double,
        "date" => JdbcType::Date,
        "timetz" => JdbcType::Time,
        "timestamptz" => JdbcType::Timestamp,
        "bytea" => JdbcType::Binary,
        "uuid" | "json" | "jsonb" | "xml" | "inet" | "interval" => JdbcType::Other,
        _ if is_plain_identifier(trimmed) => {
            trace!(data_type = ?type_str, "Treating unknown type as enum");
            JdbcType::Varchar
        }
        _ => JdbcType::Other,
    };
    (jdbc_type, 0, 0)
}

/// Enum types come back from `format_type` as a bare, possibly quoted, name
fn is_plain_identifier(s: &str) -> bool {
    let s = s.trim_matches('"');
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Extract `(length, scale)` from a type like `numeric(10,2)` or `varchar(255)`
fn extract_precision(type_str: &str) -> (u32, u32) {
    let Some(start) = type_str.find('(') else {
        return (0, 0);
    };
    let Some(end) = type_str[start..].find(')') else {
        return (0, 0);
    };

    let mut parts = type_str[start + 1..start + end]
        .split(',')
        .map(|p| p.trim().parse::<u32>().unwrap_or(0));
    let length = parts.next().unwrap_or(0);
    let scale = parts.next().unwrap_or(0);
    (length, scale)
}
