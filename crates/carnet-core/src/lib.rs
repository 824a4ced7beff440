//! # carnet-core
//!
//! Core types, viewer content model, and abstractions for carnet.
//!
//! This crate provides the domain entities, error type, repository traits,
//! and the pure viewer core: content tree parsing, heading classification,
//! rendering, TOC extraction, and scroll-sync tracking.

pub mod content;
pub mod error;
pub mod headings;
pub mod logging;
pub mod models;
pub mod render;
pub mod scroll;
pub mod temporal;
pub mod traits;
pub mod view;

// Re-export commonly used types at crate root
pub use content::{ContentNode, Mark, TextStyleAttrs};
pub use error::{Error, Result};
pub use headings::{extract_headings, heading_id, is_heading, Heading, HEADING_FONT_SIZE};
pub use models::*;
pub use render::{render, render_html, Block, BlockKind, InlineStyle, Span};
pub use scroll::{
    resolve_active, HeadingGeometry, ScrollTracker, ANCHOR_BAND_BOTTOM, ANCHOR_BAND_TOP,
};
pub use temporal::{entries_for_month, group_by_month, MonthGroup, MonthKey, SortOrder};
pub use traits::*;
pub use view::EntryView;
