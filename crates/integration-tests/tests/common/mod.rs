//! Shared articles fixture for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use queryspec_core::application::SpecificationRepository;
use queryspec_infra_sqlite::{
    create_pool, run_migrations, EntityMapping, Migration, SqliteConfig, SqliteEntityManager,
    SqliteManagerRegistry,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing_subscriber::EnvFilter;

const SCHEMA: &str = r#"
CREATE TABLE authors (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE articles (
    id INTEGER PRIMARY KEY,
    author_id INTEGER NOT NULL REFERENCES authors(id),
    title TEXT NOT NULL,
    views INTEGER NOT NULL DEFAULT 0,
    published_at INTEGER,
    summary TEXT
);
"#;

const FIXTURE: &str = r#"
INSERT INTO authors (id, name) VALUES (3, 'Grace'), (7, 'Ada');

-- author 7 rows are inserted out of title order
INSERT INTO articles (id, author_id, title, views, published_at, summary) VALUES
    (1, 7, 'Zero-cost abstractions', 120, 1000, 'Iterators compile down'),
    (2, 3, 'Pattern matching', 80, 2000, NULL),
    (3, 7, 'Borrowing', 300, 3000, 'Shared and unique references'),
    (4, 7, 'Lifetimes', 45, NULL, NULL),
    (5, 3, 'Error handling', 210, 5000, 'Result and the question mark'),
    (6, 7, 'Async traits', 95, 6000, 'Boxed futures');
"#;

pub const MIGRATIONS: &[Migration] = &[
    Migration::new(1, "Articles schema", SCHEMA),
    Migration::new(2, "Articles fixture", FIXTURE),
];

/// Hydrated article record
#[derive(Debug, Clone, PartialEq, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub views: i64,
    pub published_at: Option<i64>,
    pub summary: Option<String>,
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("queryspec_core=debug,queryspec_infra_sqlite=info")),
        )
        .with_test_writer()
        .try_init();
}

/// In-memory database with the articles fixture applied
pub async fn fixture_pool() -> anyhow::Result<SqlitePool> {
    init_tracing();
    let pool = create_pool(&SqliteConfig::default()).await?;
    run_migrations(&pool, MIGRATIONS).await?;
    Ok(pool)
}

pub fn article_manager(name: &str, pool: SqlitePool) -> SqliteEntityManager {
    SqliteEntityManager::new(name, pool)
        .with_entity(EntityMapping::new("Article", "articles"))
        .with_entity(EntityMapping::new("Author", "authors"))
}

/// Repository over a fresh fixture database, plus the pool for hand-written queries
pub async fn setup() -> anyhow::Result<(SqlitePool, SpecificationRepository)> {
    let pool = fixture_pool().await?;
    let registry = SqliteManagerRegistry::new(article_manager("default", pool.clone()));
    Ok((pool, SpecificationRepository::new(Arc::new(registry))))
}

pub fn titles(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.title.as_str()).collect()
}
