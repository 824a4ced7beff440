//! Contract tests for the entry view payload.
//!
//! The view endpoint flattens `EntryView` into its response, so the JSON
//! shape asserted here is exactly what clients receive alongside the entry
//! id and title.

use serde_json::json;

use carnet_core::EntryView;

fn sample_document() -> serde_json::Value {
    json!({
        "type": "doc",
        "content": [
            {
                "type": "paragraph",
                "content": [{
                    "type": "text",
                    "text": "Intro",
                    "marks": [
                        { "type": "textStyle", "attrs": { "fontSize": "24px" } },
                        { "type": "bold" }
                    ]
                }]
            },
            {
                "type": "paragraph",
                "content": [{
                    "type": "text",
                    "text": "Body",
                    "marks": [
                        { "type": "textStyle", "attrs": { "fontSize": "12px", "color": "#888888" } }
                    ]
                }]
            },
            { "type": "paragraph" }
        ]
    })
}

#[test]
fn test_view_payload_shape() {
    let view = EntryView::from_json(&sample_document()).unwrap();
    let payload = serde_json::to_value(&view).unwrap();

    let blocks = payload["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 3);

    // Heading block carries its anchor and kind; non-headings carry no id.
    assert_eq!(blocks[0]["kind"], "heading");
    assert_eq!(blocks[0]["id"], "heading-0");
    assert_eq!(blocks[1]["kind"], "paragraph");
    assert!(blocks[1].get("id").is_none());

    // Run-level style survives verbatim.
    assert_eq!(blocks[1]["spans"][0]["style"]["font_size"], "12px");
    assert_eq!(blocks[1]["spans"][0]["style"]["color"], "#888888");

    // The empty paragraph renders as a placeholder with no spans.
    assert_eq!(blocks[2]["spans"].as_array().unwrap().len(), 0);

    let headings = payload["headings"].as_array().unwrap();
    assert_eq!(headings.len(), 1);
    assert_eq!(headings[0]["id"], "heading-0");
    assert_eq!(headings[0]["text"], "Intro");

    let html = payload["html"].as_str().unwrap();
    assert!(html.contains("<h2 id=\"heading-0\">"));
    assert!(html.contains("font-size:12px"));
    assert!(html.contains("<br>"));
}

#[test]
fn test_view_payload_for_untouched_entry() {
    // Entries that were never edited store the `{}` sentinel.
    let view = EntryView::from_json(&json!({})).unwrap();
    let payload = serde_json::to_value(&view).unwrap();

    assert_eq!(payload["blocks"].as_array().unwrap().len(), 0);
    assert_eq!(payload["headings"].as_array().unwrap().len(), 0);
    assert_eq!(payload["html"], "");
}
