//! Rich-text content tree model.
//!
//! Entries store their body as a tiptap-style JSON document: a rooted tree of
//! typed nodes, where leaf "text" nodes carry the actual runs and any node may
//! carry formatting marks. The tree is read-only on this side; mutation
//! happens in the editor client, which posts the whole document back.
//!
//! An entry that has never been edited stores the sentinel `{}`. That
//! deserializes to a node with an empty type and no children, which every
//! consumer treats the same as a genuinely empty document.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;

/// One node of a rich-text document tree.
///
/// `content` is present only on container nodes ("doc", "paragraph");
/// `text` only on leaf runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContentNode {
    /// Node type: "doc", "paragraph", "text", or anything else the editor
    /// emits. Missing on the `{}` sentinel, hence the default.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Raw text of a leaf run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Formatting marks attached to this node or run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Mark>>,
    /// Child nodes of a container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<ContentNode>>,
}

impl ContentNode {
    /// Parse a document tree out of a stored JSON value.
    ///
    /// `null` and `{}` both resolve to an empty document rather than an error.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Direct children, or an empty slice for leaves and the `{}` sentinel.
    pub fn children(&self) -> &[ContentNode] {
        self.content.as_deref().unwrap_or_default()
    }

    /// Marks on this node, or an empty slice when absent.
    pub fn mark_list(&self) -> &[Mark] {
        self.marks.as_deref().unwrap_or_default()
    }

    /// Whether this node renders as a paragraph-level block.
    pub fn is_paragraph(&self) -> bool {
        self.kind == "paragraph"
    }

    /// Concatenated raw text of the direct child runs, marks stripped.
    pub fn plain_text(&self) -> String {
        self.children()
            .iter()
            .filter_map(|run| run.text.as_deref())
            .collect()
    }
}

/// Attributes of a `textStyle` mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TextStyleAttrs {
    /// CSS font size, e.g. "24px".
    #[serde(rename = "fontSize", default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    /// CSS color, e.g. "#888888".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A formatting annotation attached to a node or text run.
///
/// The editor's mark vocabulary is closed: bold and text style (font size +
/// color). Anything else deserializes to [`Mark::Unknown`] and renders with no
/// special styling, which is a safe default rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    /// Bold weight.
    Bold,
    /// Inline text style (font size, color).
    TextStyle {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<TextStyleAttrs>,
    },
    /// Any mark type this viewer does not style.
    #[serde(other)]
    Unknown,
}

impl Mark {
    /// Font size carried by a text-style mark, if any.
    pub fn font_size(&self) -> Option<&str> {
        match self {
            Mark::TextStyle { attrs: Some(a) } => a.font_size.as_deref(),
            Mark::TextStyle { attrs: None } | Mark::Bold | Mark::Unknown => None,
        }
    }

    /// Color carried by a text-style mark, if any.
    pub fn color(&self) -> Option<&str> {
        match self {
            Mark::TextStyle { attrs: Some(a) } => a.color.as_deref(),
            Mark::TextStyle { attrs: None } | Mark::Bold | Mark::Unknown => None,
        }
    }

    /// Whether this is the bold mark.
    pub fn is_bold(&self) -> bool {
        matches!(self, Mark::Bold)
    }
}
