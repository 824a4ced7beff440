//! Read-only renderer for entry content trees.
//!
//! Walks the document's top-level nodes once and projects each into a
//! [`Block`]. Rendering is a pure function of the tree: no state, no side
//! effects, identical output on repeated calls. The HTML projection in
//! [`render_html`] is what the view endpoint serves; the structured blocks are
//! returned alongside it so richer clients can lay the content out themselves.

use serde::{Deserialize, Serialize};

use crate::content::{ContentNode, Mark};
use crate::headings::{heading_id, is_heading};

/// Inline style attributes derived from a mark list.
///
/// Absent marks mean absent attributes: no font size, no color, normal
/// weight. Unknown mark types contribute nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InlineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
}

impl InlineStyle {
    /// Derive a style from a mark list: font size and color come verbatim
    /// from the first text-style mark carrying them, weight from the presence
    /// of a bold mark.
    pub fn from_marks(marks: &[Mark]) -> Self {
        Self {
            font_size: marks.iter().find_map(|m| m.font_size()).map(String::from),
            color: marks.iter().find_map(|m| m.color()).map(String::from),
            bold: marks.iter().any(|m| m.is_bold()),
        }
    }

    fn is_empty(&self) -> bool {
        self.font_size.is_none() && self.color.is_none() && !self.bold
    }
}

/// One styled text run inside a block. A run with no text renders as an
/// empty inline span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default)]
    pub style: InlineStyle,
}

/// Block-level dispatch. The content model is flat: paragraphs and a generic
/// fallback are the only container shapes the editor produces, and headings
/// are a presentation-derived reinterpretation of either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading,
    Paragraph,
    Generic,
}

/// One display element, produced per top-level node in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    /// Position among the document's top-level nodes.
    pub index: usize,
    /// Anchor id, set only on headings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Node-level style. Empty on headings, which use a fixed presentation
    /// and ignore the node's own marks for layout.
    #[serde(default)]
    pub style: InlineStyle,
    /// Styled runs. Empty when the node has no runs, in which case the block
    /// renders as a line-break placeholder so empty paragraphs keep a line.
    pub spans: Vec<Span>,
}

impl Block {
    /// Whether this block stands in for a visually empty paragraph.
    pub fn is_placeholder(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Render a document into its block sequence, one block per top-level child.
pub fn render(doc: &ContentNode) -> Vec<Block> {
    doc.children()
        .iter()
        .enumerate()
        .map(|(index, node)| render_node(node, index))
        .collect()
}

fn render_node(node: &ContentNode, index: usize) -> Block {
    // Run styles are derived strictly from each run's own marks, never
    // inherited from the node.
    let spans: Vec<Span> = node
        .children()
        .iter()
        .map(|run| Span {
            text: run.text.clone().unwrap_or_default(),
            style: InlineStyle::from_marks(run.mark_list()),
        })
        .collect();

    if is_heading(node) {
        return Block {
            kind: BlockKind::Heading,
            index,
            id: Some(heading_id(index)),
            style: InlineStyle::default(),
            spans,
        };
    }

    Block {
        kind: if node.is_paragraph() {
            BlockKind::Paragraph
        } else {
            BlockKind::Generic
        },
        index,
        id: None,
        style: InlineStyle::from_marks(node.mark_list()),
        spans,
    }
}

/// Render a document straight to an HTML fragment.
pub fn render_html(doc: &ContentNode) -> String {
    let mut out = String::new();
    for block in render(doc) {
        write_block_html(&mut out, &block);
    }
    out
}

fn write_block_html(out: &mut String, block: &Block) {
    let tag = match block.kind {
        BlockKind::Heading => "h2",
        BlockKind::Paragraph => "p",
        BlockKind::Generic => "div",
    };

    out.push('<');
    out.push_str(tag);
    if let Some(id) = &block.id {
        out.push_str(" id=\"");
        push_escaped(out, id);
        out.push('"');
    }
    if let Some(style) = style_attr(&block.style) {
        out.push_str(" style=\"");
        push_escaped(out, &style);
        out.push('"');
    }
    out.push('>');

    if block.is_placeholder() {
        out.push_str("<br>");
    } else {
        for span in &block.spans {
            write_span_html(out, span);
        }
    }

    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_span_html(out: &mut String, span: &Span) {
    out.push_str("<span");
    if let Some(style) = style_attr(&span.style) {
        out.push_str(" style=\"");
        push_escaped(out, &style);
        out.push('"');
    }
    out.push('>');
    push_escaped(out, &span.text);
    out.push_str("</span>");
}

fn style_attr(style: &InlineStyle) -> Option<String> {
    if style.is_empty() {
        return None;
    }
    let mut parts = Vec::with_capacity(3);
    if let Some(size) = &style.font_size {
        parts.push(format!("font-size:{size}"));
    }
    if let Some(color) = &style.color {
        parts.push(format!("color:{color}"));
    }
    if style.bold {
        parts.push("font-weight:bold".to_string());
    }
    Some(parts.join(";"))
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::TextStyleAttrs;

    fn run(text: &str, marks: Vec<Mark>) -> ContentNode {
        ContentNode {
            kind: "text".to_string(),
            text: Some(text.to_string()),
            marks: Some(marks),
            ..Default::default()
        }
    }

    fn paragraph(runs: Vec<ContentNode>) -> ContentNode {
        ContentNode {
            kind: "paragraph".to_string(),
            content: Some(runs),
            ..Default::default()
        }
    }

    fn doc(nodes: Vec<ContentNode>) -> ContentNode {
        ContentNode {
            kind: "doc".to_string(),
            content: Some(nodes),
            ..Default::default()
        }
    }

    fn text_style(font_size: Option<&str>, color: Option<&str>) -> Mark {
        Mark::TextStyle {
            attrs: Some(TextStyleAttrs {
                font_size: font_size.map(String::from),
                color: color.map(String::from),
            }),
        }
    }

    #[test]
    fn test_scenario_b_run_level_style() {
        let tree = doc(vec![paragraph(vec![run(
            "Body",
            vec![text_style(Some("12px"), Some("#888888"))],
        )])]);

        let blocks = render(&tree);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].id, None);

        let span = &blocks[0].spans[0];
        assert_eq!(span.style.font_size.as_deref(), Some("12px"));
        assert_eq!(span.style.color.as_deref(), Some("#888888"));
        assert!(!span.style.bold);
    }

    #[test]
    fn test_heading_block_gets_anchor_and_fixed_style() {
        let tree = doc(vec![paragraph(vec![run(
            "Intro",
            vec![text_style(Some("24px"), Some("#ff0000")), Mark::Bold],
        )])]);

        let blocks = render(&tree);
        assert_eq!(blocks[0].kind, BlockKind::Heading);
        assert_eq!(blocks[0].id.as_deref(), Some("heading-0"));
        // Node-level style is fixed; the run keeps its own color.
        assert_eq!(blocks[0].style, InlineStyle::default());
        assert_eq!(blocks[0].spans[0].style.color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_run_styles_are_not_inherited_from_node() {
        let mut node = paragraph(vec![run("plain", vec![])]);
        node.marks = Some(vec![text_style(Some("18px"), None), Mark::Bold]);
        let tree = doc(vec![node]);

        let blocks = render(&tree);
        assert_eq!(blocks[0].style.font_size.as_deref(), Some("18px"));
        assert!(blocks[0].style.bold);
        assert_eq!(blocks[0].spans[0].style, InlineStyle::default());
    }

    #[test]
    fn test_empty_paragraph_is_placeholder() {
        let tree = doc(vec![paragraph(vec![])]);
        let blocks = render(&tree);
        assert!(blocks[0].is_placeholder());
        assert!(render_html(&tree).contains("<br>"));
    }

    #[test]
    fn test_run_without_text_is_empty_span() {
        let mut no_text = run("", vec![Mark::Bold]);
        no_text.text = None;
        let tree = doc(vec![paragraph(vec![no_text])]);

        let blocks = render(&tree);
        assert!(!blocks[0].is_placeholder());
        assert_eq!(blocks[0].spans[0].text, "");
        assert!(blocks[0].spans[0].style.bold);
    }

    #[test]
    fn test_non_paragraph_node_renders_generic() {
        let mut node = paragraph(vec![run("x", vec![])]);
        node.kind = "blockquote".to_string();
        let tree = doc(vec![node]);

        let blocks = render(&tree);
        assert_eq!(blocks[0].kind, BlockKind::Generic);
        assert!(render_html(&tree).starts_with("<div>"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let tree = doc(vec![
            paragraph(vec![run("Intro", vec![text_style(Some("24px"), None), Mark::Bold])]),
            paragraph(vec![run("body", vec![text_style(None, Some("#888888"))])]),
            paragraph(vec![]),
        ]);

        let first = render(&tree);
        let second = render(&tree);
        assert_eq!(first, second);
        assert_eq!(render_html(&tree), render_html(&tree));
    }

    #[test]
    fn test_scenario_e_empty_document_renders_nothing() {
        assert!(render(&doc(vec![])).is_empty());
        assert!(render(&ContentNode::default()).is_empty());
        assert_eq!(render_html(&doc(vec![])), "");
    }

    #[test]
    fn test_html_escapes_text_and_attributes() {
        let tree = doc(vec![paragraph(vec![run(
            "<script>&\"",
            vec![text_style(Some("12px"), None)],
        )])]);
        let html = render_html(&tree);
        assert!(html.contains("&lt;script&gt;&amp;&quot;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_heading_html_shape() {
        let tree = doc(vec![paragraph(vec![run(
            "Intro",
            vec![text_style(Some("24px"), None), Mark::Bold],
        )])]);
        let html = render_html(&tree);
        assert!(html.starts_with("<h2 id=\"heading-0\">"));
        assert!(html.ends_with("</h2>"));
    }
}
