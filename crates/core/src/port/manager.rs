// Entity Manager Ports (Interface)

use crate::domain::ManagerSelector;
use crate::error::Result;
use crate::port::QueryBuilder;
use std::sync::Arc;

/// Handle able to create query builders for the entities it maps
pub trait EntityManager: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this manager maps the given entity
    fn manages(&self, entity: &str) -> bool;

    /// Create a fresh, empty query builder
    fn create_query_builder(&self) -> Box<dyn QueryBuilder>;
}

/// Registry resolving entity managers by name or by entity
pub trait ManagerRegistry: Send + Sync {
    fn default_manager_name(&self) -> &str;

    /// Manager registered under `name`, or the default one
    fn manager(&self, name: Option<&str>) -> Result<Arc<dyn EntityManager>>;

    /// First manager that maps `entity`
    fn manager_for_entity(&self, entity: &str) -> Result<Arc<dyn EntityManager>>;

    fn resolve(&self, selector: &ManagerSelector) -> Result<Arc<dyn EntityManager>> {
        match selector {
            ManagerSelector::Default => self.manager(None),
            ManagerSelector::Named(name) => self.manager(Some(name)),
            ManagerSelector::ForEntity(entity) => self.manager_for_entity(entity),
        }
    }
}
