// SQLite QueryBuilder Implementation

use crate::entity_manager::EntityMappings;
use crate::query::SqliteQuery;
use queryspec_core::domain::QueryParts;
use queryspec_core::error::{AppError, Result};
use queryspec_core::port::{Query, QueryBuilder};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Builder accumulating clause fragments for one SQLite query
pub struct SqliteQueryBuilder {
    parts: QueryParts,
    pool: SqlitePool,
    mappings: Arc<EntityMappings>,
}

impl SqliteQueryBuilder {
    pub(crate) fn new(pool: SqlitePool, mappings: Arc<EntityMappings>) -> Self {
        Self {
            parts: QueryParts::default(),
            pool,
            mappings,
        }
    }
}

impl QueryBuilder for SqliteQueryBuilder {
    fn parts(&self) -> &QueryParts {
        &self.parts
    }

    fn parts_mut(&mut self) -> &mut QueryParts {
        &mut self.parts
    }

    fn get_query(&self) -> Result<Box<dyn Query>> {
        if let Some(from) = &self.parts.from {
            if !self.mappings.contains_key(&from.entity) {
                return Err(AppError::NotFound(format!(
                    "Entity '{}' is not mapped",
                    from.entity
                )));
            }
        }

        Ok(Box::new(SqliteQuery::new(
            self.parts.clone(),
            self.pool.clone(),
            Arc::clone(&self.mappings),
        )))
    }
}
