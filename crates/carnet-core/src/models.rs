//! Core data models for carnet.
//!
//! These types are shared across all carnet crates and represent the domain
//! entities: categories and the journal entries they contain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// =============================================================================
// CATEGORY TYPES
// =============================================================================

/// A category groups entries in the sidebar. Names are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at_utc: DateTime<Utc>,
}

/// Lightweight category reference embedded in entry listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

/// Sidebar projection: a category with its entry summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWithEntries {
    pub id: i64,
    pub name: String,
    pub entries: Vec<EntrySummary>,
}

// =============================================================================
// ENTRY TYPES
// =============================================================================

/// A full journal entry, content tree included.
///
/// `content` holds the rich-text document as stored JSON; `{}` is the
/// "no content yet" sentinel for entries that have never been edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub content: JsonValue,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

/// Entry metadata without content, for sidebar and list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySummary {
    pub id: i64,
    pub title: String,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

/// Entry summary carrying its category, for the home and month pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryWithCategory {
    pub id: i64,
    pub title: String,
    pub category: CategoryRef,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}
