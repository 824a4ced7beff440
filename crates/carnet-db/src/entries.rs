//! Entry repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value as JsonValue;
use sqlx::{Pool, Postgres, Row};

use carnet_core::{
    CategoryRef, CreateEntryRequest, Entry, EntryRepository, EntrySummary, EntryWithCategory,
    Error, Result,
};

/// PostgreSQL implementation of EntryRepository.
pub struct PgEntryRepository {
    pool: Pool<Postgres>,
}

impl PgEntryRepository {
    /// Create a new PgEntryRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn row_to_entry(row: &sqlx::postgres::PgRow) -> Entry {
    Entry {
        id: row.get("id"),
        category_id: row.get("category_id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at_utc: row.get("created_at_utc"),
        updated_at_utc: row.get("updated_at_utc"),
    }
}

#[async_trait]
impl EntryRepository for PgEntryRepository {
    async fn create(&self, req: CreateEntryRequest) -> Result<Entry> {
        // New entries start from the empty-document sentinel unless the
        // caller provides an initial tree.
        let content = req.content.unwrap_or_else(|| serde_json::json!({}));

        let category_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM category WHERE id = $1)")
                .bind(req.category_id)
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;

        if !category_exists {
            return Err(Error::CategoryNotFound(req.category_id));
        }

        let row = sqlx::query(
            "INSERT INTO entry (category_id, title, content)
             VALUES ($1, $2, $3)
             RETURNING id, category_id, title, content, created_at_utc, updated_at_utc",
        )
        .bind(req.category_id)
        .bind(&req.title)
        .bind(&content)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row_to_entry(&row))
    }

    async fn get(&self, id: i64) -> Result<Option<Entry>> {
        let row = sqlx::query(
            "SELECT id, category_id, title, content, created_at_utc, updated_at_utc
             FROM entry WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.as_ref().map(row_to_entry))
    }

    async fn get_in_category(&self, category_id: i64, entry_id: i64) -> Result<Option<Entry>> {
        let row = sqlx::query(
            "SELECT id, category_id, title, content, created_at_utc, updated_at_utc
             FROM entry WHERE id = $1 AND category_id = $2",
        )
        .bind(entry_id)
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.as_ref().map(row_to_entry))
    }

    async fn list(&self) -> Result<Vec<EntrySummary>> {
        let rows = sqlx::query(
            "SELECT id, title, created_at_utc, updated_at_utc
             FROM entry
             ORDER BY created_at_utc DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| EntrySummary {
                id: row.get("id"),
                title: row.get("title"),
                created_at_utc: row.get("created_at_utc"),
                updated_at_utc: row.get("updated_at_utc"),
            })
            .collect())
    }

    async fn list_with_categories(&self) -> Result<Vec<EntryWithCategory>> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.title, e.created_at_utc, e.updated_at_utc,
                   c.id as category_id, c.name as category_name
            FROM entry e
            JOIN category c ON c.id = e.category_id
            ORDER BY e.created_at_utc DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| EntryWithCategory {
                id: row.get("id"),
                title: row.get("title"),
                category: CategoryRef {
                    id: row.get("category_id"),
                    name: row.get("category_name"),
                },
                created_at_utc: row.get("created_at_utc"),
                updated_at_utc: row.get("updated_at_utc"),
            })
            .collect())
    }

    async fn update_content(&self, id: i64, content: &JsonValue) -> Result<Entry> {
        let now = Utc::now();
        let row = sqlx::query(
            "UPDATE entry SET content = $1, updated_at_utc = $2
             WHERE id = $3
             RETURNING id, category_id, title, content, created_at_utc, updated_at_utc",
        )
        .bind(content)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(row_to_entry).ok_or(Error::EntryNotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM entry WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::EntryNotFound(id));
        }
        Ok(())
    }
}
