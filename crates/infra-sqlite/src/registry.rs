// SQLite Manager Registry

use crate::entity_manager::SqliteEntityManager;
use queryspec_core::error::{AppError, Result};
use queryspec_core::port::{EntityManager, ManagerRegistry};
use std::sync::Arc;

/// Named entity managers; the first registered one is the default
pub struct SqliteManagerRegistry {
    managers: Vec<Arc<SqliteEntityManager>>,
}

impl SqliteManagerRegistry {
    pub fn new(default_manager: SqliteEntityManager) -> Self {
        Self {
            managers: vec![Arc::new(default_manager)],
        }
    }

    /// Register another manager
    ///
    /// # Errors
    /// `InvalidArgument` when the name is already taken
    pub fn with_manager(mut self, manager: SqliteEntityManager) -> Result<Self> {
        if self.managers.iter().any(|m| m.name() == manager.name()) {
            return Err(AppError::InvalidArgument(format!(
                "Entity manager '{}' is already registered",
                manager.name()
            )));
        }
        self.managers.push(Arc::new(manager));
        Ok(self)
    }

    pub fn manager_names(&self) -> Vec<&str> {
        self.managers.iter().map(|m| m.name()).collect()
    }
}

impl ManagerRegistry for SqliteManagerRegistry {
    fn default_manager_name(&self) -> &str {
        self.managers[0].name()
    }

    fn manager(&self, name: Option<&str>) -> Result<Arc<dyn EntityManager>> {
        let name = name.unwrap_or_else(|| self.default_manager_name());
        self.managers
            .iter()
            .find(|m| m.name() == name)
            .map(|m| Arc::clone(m) as Arc<dyn EntityManager>)
            .ok_or_else(|| AppError::NotFound(format!("Entity manager '{}'", name)))
    }

    fn manager_for_entity(&self, entity: &str) -> Result<Arc<dyn EntityManager>> {
        self.managers
            .iter()
            .find(|m| m.manages(entity))
            .map(|m| Arc::clone(m) as Arc<dyn EntityManager>)
            .ok_or_else(|| AppError::NotFound(format!("No entity manager maps '{}'", entity)))
    }
}
