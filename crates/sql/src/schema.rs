//! Schema introspection.
//!
//! Defined purely in terms of [`execute_sql`](crate::execute_sql): one
//! fixed `information_schema.columns` query, reshaped into a per-table
//! listing the SQL generator can read.

use crate::execute_sql;
use anyhow::Result;
use serde_json::{Value, json};

/// The fixed introspection query: public schema only, ordered by table
/// then column position.
const SCHEMA_QUERY: &str = "\
SELECT table_name, column_name, data_type, is_nullable
FROM information_schema.columns
WHERE table_schema = 'public'
ORDER BY table_name, ordinal_position";

/// Fetch a simplified schema listing for the database behind
/// `connection_uri`: one `{table_name, columns: [...]}` record per
/// table, tables in first-seen order.
pub async fn fetch_database_schema(connection_uri: &str) -> Result<Value> {
    let rows = execute_sql(connection_uri, SCHEMA_QUERY).await?;
    Ok(regroup_schema(&rows))
}

/// Regroup the flat `(table, column, type, nullable)` rows into
/// per-table records, preserving the order tables first appear.
fn regroup_schema(rows: &[Value]) -> Value {
    let mut order: Vec<&str> = Vec::new();
    let mut columns_by_table: std::collections::BTreeMap<&str, Vec<Value>> =
        std::collections::BTreeMap::new();

    for row in rows {
        let Some(fields) = row.as_array() else {
            continue;
        };
        let [table, column, data_type, nullable] = fields.as_slice() else {
            continue;
        };
        let Some(table) = table.as_str() else {
            continue;
        };

        if !columns_by_table.contains_key(table) {
            order.push(table);
        }
        columns_by_table.entry(table).or_default().push(json!({
            "column_name": column,
            "data_type": data_type,
            "is_nullable": nullable,
        }));
    }

    Value::Array(
        order
            .into_iter()
            .map(|table| {
                json!({
                    "table_name": table,
                    "columns": columns_by_table[table],
                })
            })
            .collect(),
    )
}
