//! # curio-db
//!
//! PostgreSQL database layer for curio.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for users, tokens, articles, bookmarks,
//!   and per-user tag assignments
//! - Transaction-scoped `_tx` repository variants for composing the
//!   save-article flow atomically
//! - Embedded schema migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use curio_db::Database;
//! use curio_core::ArticleRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/curio").await?;
//!     let id = db
//!         .articles
//!         .upsert("https://en.wikipedia.org/?curid=1", "A", "s")
//!         .await?;
//!     println!("article: {}", id);
//!     Ok(())
//! }
//! ```

pub mod articles;
pub mod bookmarks;
pub mod pool;
pub mod tag_assignments;
pub mod tokens;
pub mod users;

// Test fixtures for integration tests
// Note: always compiled so integration tests (in tests/) can use the
// default test DATABASE_URL and seed helpers.
pub mod test_fixtures;

// Re-export core types
pub use curio_core::*;

// Re-export repository implementations
pub use articles::PgArticleRepository;
pub use bookmarks::PgBookmarkRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use tag_assignments::PgTagAssignmentRepository;
pub use tokens::PgTokenRepository;
pub use users::PgUserRepository;

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// User account repository.
    pub users: PgUserRepository,
    /// Bearer token repository.
    pub tokens: PgTokenRepository,
    /// Article directory repository.
    pub articles: PgArticleRepository,
    /// Bookmark ledger repository.
    pub bookmarks: PgBookmarkRepository,
    /// Tag assignment repository (the reconciler).
    pub tags: PgTagAssignmentRepository,
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl Database {
    /// Build the repository set over an existing pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            tokens: PgTokenRepository::new(pool.clone()),
            articles: PgArticleRepository::new(pool.clone()),
            bookmarks: PgBookmarkRepository::new(pool.clone()),
            tags: PgTagAssignmentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect with default pool configuration.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Connect with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
