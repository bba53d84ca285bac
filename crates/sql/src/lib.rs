//! Single-statement SQL execution.
//!
//! Each call opens one encrypted connection, runs exactly one
//! statement, and closes the connection before returning. SELECTs
//! return their rows as JSON arrays; everything else commits and
//! returns no rows. There is no pooling and no statement cache — the
//! executor is glue between a conversational tool call and Postgres.

pub use schema::fetch_database_schema;

mod schema;

use anyhow::{Context, Result};
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgRow, PgSslMode};
use sqlx::{Column, Connection, PgConnection, Row, TypeInfo};

/// How a statement will be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Rows are fetched and returned; nothing is committed.
    Select,
    /// Executed inside a transaction and committed; no rows returned.
    Write,
}

/// Classify a statement by its leading keyword, case-insensitive,
/// with surrounding whitespace ignored.
pub fn classify(statement: &str) -> StatementKind {
    let trimmed = statement.trim();
    // Byte-wise comparison: slicing the str could land inside a
    // multibyte character.
    if trimmed
        .as_bytes()
        .get(..6)
        .is_some_and(|lead| lead.eq_ignore_ascii_case(b"select"))
    {
        StatementKind::Select
    } else {
        StatementKind::Write
    }
}

/// Execute one statement against the database behind `connection_uri`.
///
/// The connection requires encrypted transport (`sslmode=require`)
/// regardless of what the URI says. Failures propagate to the caller;
/// this layer neither retries nor recovers.
pub async fn execute_sql(connection_uri: &str, statement: &str) -> Result<Vec<Value>> {
    let options: PgConnectOptions = connection_uri
        .parse()
        .context("invalid connection uri")?;
    let options = options.ssl_mode(PgSslMode::Require);

    let mut conn = PgConnection::connect_with(&options)
        .await
        .context("failed to connect to database")?;

    let result = run_statement(&mut conn, statement).await;
    // Close regardless of the statement outcome.
    if let Err(e) = conn.close().await {
        tracing::warn!("error closing connection: {e}");
    }
    result
}

async fn run_statement(conn: &mut PgConnection, statement: &str) -> Result<Vec<Value>> {
    match classify(statement) {
        StatementKind::Select => {
            tracing::debug!("executing select");
            let rows = sqlx::query(statement).fetch_all(&mut *conn).await?;
            Ok(rows.iter().map(row_to_json).collect())
        }
        StatementKind::Write => {
            tracing::debug!("executing write");
            let mut tx = conn.begin().await?;
            sqlx::query(statement).execute(&mut *tx).await?;
            tx.commit().await?;
            Ok(Vec::new())
        }
    }
}

/// Decode a row into a JSON array, by Postgres type name with a text
/// fallback. Tool payloads are serialized for the model, so JSON is
/// the natural shape.
fn row_to_json(row: &PgRow) -> Value {
    let mut values = Vec::with_capacity(row.len());
    for (i, column) in row.columns().iter().enumerate() {
        let value = match column.type_info().name() {
            "BOOL" => decode(row.try_get::<Option<bool>, _>(i)),
            "INT2" => decode(row.try_get::<Option<i16>, _>(i)),
            "INT4" => decode(row.try_get::<Option<i32>, _>(i)),
            "INT8" => decode(row.try_get::<Option<i64>, _>(i)),
            "FLOAT4" => decode(row.try_get::<Option<f32>, _>(i)),
            "FLOAT8" => decode(row.try_get::<Option<f64>, _>(i)),
            "JSON" | "JSONB" => row
                .try_get::<Option<Value>, _>(i)
                .ok()
                .flatten()
                .unwrap_or(Value::Null),
            _ => decode(row.try_get::<Option<String>, _>(i)),
        };
        values.push(value);
    }
    Value::Array(values)
}

fn decode<T: serde::Serialize>(result: sqlx::Result<Option<T>>) -> Value {
    match result {
        Ok(Some(v)) => serde_json::to_value(v).unwrap_or(Value::Null),
        Ok(None) => Value::Null,
        Err(e) => {
            tracing::debug!("undecodable column: {e}");
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_select_case_insensitive() {
        assert_eq!(classify("SELECT 1"), StatementKind::Select);
        assert_eq!(classify("select * from users"), StatementKind::Select);
        assert_eq!(classify("  SeLeCt 1  "), StatementKind::Select);
    }

    #[test]
    fn classify_writes() {
        assert_eq!(
            classify("INSERT INTO users VALUES (1)"),
            StatementKind::Write
        );
        assert_eq!(classify("UPDATE users SET x = 1"), StatementKind::Write);
        assert_eq!(classify("DELETE FROM users"), StatementKind::Write);
        assert_eq!(classify("CREATE TABLE t (id int)"), StatementKind::Write);
    }

    #[test]
    fn classify_short_statement() {
        assert_eq!(classify("go"), StatementKind::Write);
        assert_eq!(classify(""), StatementKind::Write);
    }

    #[test]
    fn classify_multibyte_near_keyword_boundary() {
        assert_eq!(classify("abcdeé from t"), StatementKind::Write);
        assert_eq!(classify("éé"), StatementKind::Write);
        assert_eq!(classify("select 'é'"), StatementKind::Select);
    }
}
