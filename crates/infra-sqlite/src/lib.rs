// QuerySpec Infrastructure - SQLite Adapter
// Implements: QueryBuilder, Query, EntityManager, ManagerRegistry

mod config;
mod connection;
mod entity_manager;
mod error;
mod migration;
mod query;
mod query_builder;
mod registry;
mod sql;

pub use config::SqliteConfig;
pub use connection::create_pool;
pub use entity_manager::{EntityMapping, SqliteEntityManager};
pub use error::map_sqlx_error;
pub use migration::{run_migrations, Migration};
pub use query::SqliteQuery;
pub use query_builder::SqliteQueryBuilder;
pub use registry::SqliteManagerRegistry;
pub use sql::{compile, CompiledSql, SqlArg};

// Note: sqlx::Error conversion is handled by map_sqlx_error
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
