// Port Layer - Interfaces implemented by data-access adapters

pub mod manager;
pub mod query;
pub mod query_builder;

// Re-exports
pub use manager::{EntityManager, ManagerRegistry};
pub use query::Query;
pub use query_builder::QueryBuilder;
