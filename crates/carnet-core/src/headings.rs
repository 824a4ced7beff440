//! Heading classification and table-of-contents extraction.
//!
//! The editor has no structural heading node, so the viewer classifies
//! headings heuristically: a top-level node counts as a heading when one of
//! its runs is set in the heading font size and bold. Paragraphs that merely
//! use 24px bold for emphasis will be misclassified; that is a known limit of
//! the heuristic, inherited from the editor's flat document model.

use serde::{Deserialize, Serialize};

use crate::content::ContentNode;

/// Font size that marks a run as heading-styled.
pub const HEADING_FONT_SIZE: &str = "24px";

/// A table-of-contents entry, derived per view and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Anchor id, `heading-<index>` where index is the node's position among
    /// the document's top-level children.
    pub id: String,
    /// Display text for the TOC link.
    pub text: String,
}

/// Anchor id for the top-level node at `index`.
pub fn heading_id(index: usize) -> String {
    format!("heading-{index}")
}

/// Classify a node as a section heading.
///
/// True iff at least one direct child run carries a text-style mark with the
/// heading font size and, independently, a bold mark. The two marks need not
/// be the same object and their order in the mark list does not matter. A node
/// with no children or no marks is never a heading.
pub fn is_heading(node: &ContentNode) -> bool {
    node.children().iter().any(|run| {
        let marks = run.mark_list();
        marks.iter().any(|m| m.font_size() == Some(HEADING_FONT_SIZE))
            && marks.iter().any(|m| m.is_bold())
    })
}

/// Collect the headings of a document in document order.
///
/// Walks the top-level children once. Ids keep the original node index, so a
/// non-heading between two headings leaves a gap rather than compacting the
/// range. Nodes with heading styling but no text fall back to a synthesized
/// `Heading <n>` label (1-based).
pub fn extract_headings(doc: &ContentNode) -> Vec<Heading> {
    doc.children()
        .iter()
        .enumerate()
        .filter(|(_, node)| is_heading(node))
        .map(|(index, node)| {
            let text = node.plain_text();
            Heading {
                id: heading_id(index),
                text: if text.is_empty() {
                    format!("Heading {}", index + 1)
                } else {
                    text
                },
            }
        })
        .collect()
}
