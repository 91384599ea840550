// SQLite Entity Manager

use crate::query_builder::SqliteQueryBuilder;
use queryspec_core::port::{EntityManager, QueryBuilder};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;

/// Entity name -> table mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMapping {
    pub entity: String,
    pub table: String,
}

impl EntityMapping {
    pub fn new(entity: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            table: table.into(),
        }
    }
}

pub(crate) type EntityMappings = HashMap<String, EntityMapping>;

/// Entity manager over one SQLite pool
pub struct SqliteEntityManager {
    name: String,
    pool: SqlitePool,
    mappings: Arc<EntityMappings>,
}

impl SqliteEntityManager {
    pub fn new(name: impl Into<String>, pool: SqlitePool) -> Self {
        Self {
            name: name.into(),
            pool,
            mappings: Arc::new(HashMap::new()),
        }
    }

    /// Map an entity to its table
    pub fn with_entity(mut self, mapping: EntityMapping) -> Self {
        Arc::make_mut(&mut self.mappings).insert(mapping.entity.clone(), mapping);
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn mapping(&self, entity: &str) -> Option<&EntityMapping> {
        self.mappings.get(entity)
    }
}

impl EntityManager for SqliteEntityManager {
    fn name(&self) -> &str {
        &self.name
    }

    fn manages(&self, entity: &str) -> bool {
        self.mappings.contains_key(entity)
    }

    fn create_query_builder(&self) -> Box<dyn QueryBuilder> {
        Box::new(SqliteQueryBuilder::new(
            self.pool.clone(),
            Arc::clone(&self.mappings),
        ))
    }
}
