//! Repository traits for carnet's storage layer.
//!
//! These traits define the interfaces the database crate implements,
//! keeping handlers testable against the abstractions.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::models::*;

/// Request for creating a new entry.
#[derive(Debug, Clone)]
pub struct CreateEntryRequest {
    pub title: String,
    pub category_id: i64,
    /// Initial document tree. Defaults to the `{}` sentinel when omitted.
    pub content: Option<JsonValue>,
}

/// Repository for category CRUD operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a category with a unique name.
    async fn create(&self, name: &str) -> Result<Category>;

    /// Look up a category by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// Fetch a category by ID.
    async fn get(&self, id: i64) -> Result<Option<Category>>;

    /// List all categories with their entry summaries (sidebar data).
    async fn list_with_entries(&self) -> Result<Vec<CategoryWithEntries>>;

    /// Delete an empty category, returning the deleted row.
    /// Fails with `CategoryNotEmpty` while entries remain.
    async fn delete(&self, id: i64) -> Result<Category>;
}

/// Repository for entry CRUD operations.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert a new entry. The category must exist.
    async fn create(&self, req: CreateEntryRequest) -> Result<Entry>;

    /// Fetch an entry by ID.
    async fn get(&self, id: i64) -> Result<Option<Entry>>;

    /// Fetch an entry only if it belongs to the given category.
    async fn get_in_category(&self, category_id: i64, entry_id: i64) -> Result<Option<Entry>>;

    /// List all entries, newest first.
    async fn list(&self) -> Result<Vec<EntrySummary>>;

    /// List all entries with their categories, newest first.
    async fn list_with_categories(&self) -> Result<Vec<EntryWithCategory>>;

    /// Replace an entry's content tree, bumping `updated_at_utc`.
    async fn update_content(&self, id: i64, content: &JsonValue) -> Result<Entry>;

    /// Delete an entry.
    async fn delete(&self, id: i64) -> Result<()>;
}
