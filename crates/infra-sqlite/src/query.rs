// SQLite Query Implementation

use crate::entity_manager::EntityMappings;
use crate::error::map_sqlx_error;
use crate::sql::{compile, CompiledSql, SqlArg};
use async_trait::async_trait;
use queryspec_core::domain::{QueryParts, Row, Value};
use queryspec_core::error::{AppError, Result};
use queryspec_core::port::Query;
use sqlx::query::Query as SqlxQuery;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Column, Row as _, SqlitePool, TypeInfo, ValueRef};
use std::sync::Arc;
use tracing::debug;

/// Compiled query bound to a pool
pub struct SqliteQuery {
    parts: QueryParts,
    pool: SqlitePool,
    mappings: Arc<EntityMappings>,
    first_result: u64,
    max_results: Option<u64>,
}

impl SqliteQuery {
    pub(crate) fn new(parts: QueryParts, pool: SqlitePool, mappings: Arc<EntityMappings>) -> Self {
        Self {
            parts,
            pool,
            mappings,
            first_result: 0,
            max_results: None,
        }
    }

    pub fn compiled(&self) -> Result<CompiledSql> {
        compile(
            &self.parts,
            &self.mappings,
            self.first_result,
            self.max_results,
        )
    }
}

#[async_trait]
impl Query for SqliteQuery {
    fn set_max_results(&mut self, max_results: Option<u64>) {
        self.max_results = max_results;
    }

    fn set_first_result(&mut self, first_result: u64) {
        self.first_result = first_result;
    }

    fn max_results(&self) -> Option<u64> {
        self.max_results
    }

    fn first_result(&self) -> u64 {
        self.first_result
    }

    fn dql(&self) -> String {
        self.parts.to_dql()
    }

    fn sql(&self) -> Result<String> {
        Ok(self.compiled()?.sql)
    }

    async fn get_result(&mut self) -> Result<Vec<Row>> {
        let compiled = self.compiled()?;
        debug!(sql = %compiled.sql, args = compiled.args.len(), "Executing query");

        let mut query = sqlx::query(&compiled.sql);
        for arg in compiled.args.iter().cloned() {
            query = bind_arg(query, arg);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(map_sqlx_error)?;
        rows.iter().map(decode_row).collect()
    }
}

fn bind_arg<'q>(
    query: SqlxQuery<'q, Sqlite, SqliteArguments<'q>>,
    arg: SqlArg,
) -> SqlxQuery<'q, Sqlite, SqliteArguments<'q>> {
    match arg {
        SqlArg::Null => query.bind(None::<String>),
        SqlArg::Bool(b) => query.bind(b),
        SqlArg::Integer(i) => query.bind(i),
        SqlArg::Real(f) => query.bind(f),
        SqlArg::Text(s) => query.bind(s),
    }
}

/// Decode a row by the storage class of each value
fn decode_row(row: &SqliteRow) -> Result<Row> {
    let mut columns = Vec::with_capacity(row.len());

    for (idx, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(idx).map_err(map_sqlx_error)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            let storage = raw.type_info().name().to_string();
            match storage.as_str() {
                "INTEGER" | "BOOLEAN" => {
                    Value::Integer(row.try_get::<i64, _>(idx).map_err(map_sqlx_error)?)
                }
                "REAL" | "NUMERIC" => {
                    Value::Real(row.try_get::<f64, _>(idx).map_err(map_sqlx_error)?)
                }
                "BLOB" => {
                    let bytes = row.try_get::<Vec<u8>, _>(idx).map_err(map_sqlx_error)?;
                    let text = String::from_utf8(bytes).map_err(|_| {
                        AppError::Query(format!(
                            "Column '{}' holds a binary BLOB that is not UTF-8 text",
                            column.name()
                        ))
                    })?;
                    Value::Text(text)
                }
                _ => Value::Text(row.try_get::<String, _>(idx).map_err(map_sqlx_error)?),
            }
        };
        columns.push((column.name().to_string(), value));
    }

    Ok(Row::new(columns))
}
