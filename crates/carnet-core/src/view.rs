//! Entry view assembly: blocks, table of contents, and the HTML projection.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::content::ContentNode;
use crate::error::Result;
use crate::headings::{extract_headings, Heading};
use crate::render::{render, render_html, Block};

/// The viewer projection of one entry's content tree.
///
/// Built from a snapshot of the stored document after the fetch has resolved;
/// never from a partial tree. Recomputed whenever the content changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryView {
    /// Display elements, one per top-level node in document order.
    pub blocks: Vec<Block>,
    /// Classified headings for the TOC panel. An empty list means the panel
    /// is not shown and the scroll tracker stays inactive.
    pub headings: Vec<Heading>,
    /// Server-rendered HTML fragment of the same block sequence.
    pub html: String,
}

impl EntryView {
    /// Build a view from a parsed document tree.
    pub fn from_document(doc: &ContentNode) -> Self {
        let view = Self {
            blocks: render(doc),
            headings: extract_headings(doc),
            html: render_html(doc),
        };
        tracing::debug!(
            subsystem = "viewer",
            component = "view",
            op = "build",
            block_count = view.blocks.len(),
            heading_count = view.headings.len(),
            "Entry view assembled"
        );
        view
    }

    /// Build a view from the stored JSON value, tolerating the `{}` and
    /// `null` "no content yet" sentinels.
    pub fn from_json(content: &JsonValue) -> Result<Self> {
        let doc = ContentNode::from_json(content)?;
        Ok(Self::from_document(&doc))
    }

    /// Whether the underlying document has no renderable content.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
