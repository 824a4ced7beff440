//! # carnet-db
//!
//! PostgreSQL database layer for carnet.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for categories and entries
//!
//! ## Example
//!
//! ```rust,ignore
//! use carnet_db::Database;
//! use carnet_core::{CategoryRepository, CreateEntryRequest, EntryRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/carnet").await?;
//!
//!     let category = db.categories.create("Journal").await?;
//!     let entry = db.entries.create(CreateEntryRequest {
//!         title: "Day one".to_string(),
//!         category_id: category.id,
//!         content: None,
//!     }).await?;
//!
//!     println!("Created entry: {}", entry.id);
//!     Ok(())
//! }
//! ```

pub mod categories;
pub mod entries;
pub mod pool;
pub mod test_fixtures;

// Re-export core types
pub use carnet_core::*;

// Re-export repository implementations
pub use categories::PgCategoryRepository;
pub use entries::PgEntryRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Category repository for sidebar CRUD.
    pub categories: PgCategoryRepository,
    /// Entry repository for journal entries and their content trees.
    pub entries: PgEntryRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            categories: PgCategoryRepository::new(pool.clone()),
            entries: PgEntryRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
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

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}
