//! Category repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use carnet_core::{
    Category, CategoryRepository, CategoryWithEntries, EntrySummary, Error, Result,
};

/// PostgreSQL implementation of CategoryRepository.
pub struct PgCategoryRepository {
    pool: Pool<Postgres>,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn row_to_category(row: &sqlx::postgres::PgRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        created_at_utc: row.get("created_at_utc"),
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, name: &str) -> Result<Category> {
        let row = sqlx::query(
            "INSERT INTO category (name)
             VALUES ($1)
             RETURNING id, name, created_at_utc",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::DuplicateCategory(name.to_string())
            }
            _ => Error::Database(e),
        })?;

        Ok(row_to_category(&row))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name, created_at_utc FROM category WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.as_ref().map(row_to_category))
    }

    async fn get(&self, id: i64) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name, created_at_utc FROM category WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.as_ref().map(row_to_category))
    }

    async fn list_with_entries(&self) -> Result<Vec<CategoryWithEntries>> {
        let category_rows =
            sqlx::query("SELECT id, name FROM category ORDER BY created_at_utc, id")
                .fetch_all(&self.pool)
                .await
                .map_err(Error::Database)?;

        let entry_rows = sqlx::query(
            "SELECT id, category_id, title, created_at_utc, updated_at_utc
             FROM entry
             ORDER BY created_at_utc, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut categories: Vec<CategoryWithEntries> = category_rows
            .iter()
            .map(|r| CategoryWithEntries {
                id: r.get("id"),
                name: r.get("name"),
                entries: Vec::new(),
            })
            .collect();

        for row in entry_rows {
            let category_id: i64 = row.get("category_id");
            if let Some(cat) = categories.iter_mut().find(|c| c.id == category_id) {
                cat.entries.push(EntrySummary {
                    id: row.get("id"),
                    title: row.get("title"),
                    created_at_utc: row.get("created_at_utc"),
                    updated_at_utc: row.get("updated_at_utc"),
                });
            }
        }

        Ok(categories)
    }

    async fn delete(&self, id: i64) -> Result<Category> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let entry_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM entry WHERE category_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await
                .map_err(Error::Database)?;

        if entry_count > 0 {
            return Err(Error::CategoryNotEmpty(id));
        }

        let row = sqlx::query(
            "DELETE FROM category WHERE id = $1 RETURNING id, name, created_at_utc",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::CategoryNotFound(id))?;

        tx.commit().await.map_err(Error::Database)?;
        Ok(row_to_category(&row))
    }
}
