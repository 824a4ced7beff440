//! HTTP-level tests for the stateless viewer endpoint.
//!
//! Spawns a minimal server with only the active-heading route mounted and
//! drives it with a real client, so the wire contract (field names, null
//! handling, defaults) is exercised end to end.

use axum::{routing::post, Router};
use serde_json::json;

use carnet_api::viewer::resolve_active_heading;

/// Build a minimal test server with only the viewer route.
/// Returns the base URL (e.g., "http://127.0.0.1:PORT").
async fn spawn_viewer_test_server() -> String {
    let router = Router::new().route("/api/v1/viewer/active-heading", post(resolve_active_heading));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Give server a moment to start
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    base_url
}

#[tokio::test]
async fn test_active_heading_resolves_within_band() {
    let base_url = spawn_viewer_test_server().await;
    let client = reqwest::Client::new();

    // heading-1 sits 30px above the anchor (in band); heading-0 is 250px
    // below it (out of band).
    let resp = client
        .post(format!("{base_url}/api/v1/viewer/active-heading"))
        .json(&json!({
            "scroll_top": 700.0,
            "headings": [
                { "id": "heading-0", "offset_top": 950.0, "rect_top": 250.0 },
                { "id": "heading-1", "offset_top": 670.0, "rect_top": -30.0 }
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["active_heading_id"], "heading-1");
}

#[tokio::test]
async fn test_active_heading_null_when_nothing_eligible() {
    let base_url = spawn_viewer_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base_url}/api/v1/viewer/active-heading"))
        .json(&json!({
            "scroll_top": 0.0,
            "headings": [
                { "id": "heading-0", "offset_top": 900.0, "rect_top": 620.0 }
            ]
        }))
        .send()
        .await
        .unwrap();

    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["active_heading_id"].is_null());
}

#[tokio::test]
async fn test_active_heading_accepts_empty_heading_set() {
    let base_url = spawn_viewer_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base_url}/api/v1/viewer/active-heading"))
        .json(&json!({ "scroll_top": 120.0 }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["active_heading_id"].is_null());
}

#[tokio::test]
async fn test_active_heading_ties_go_to_first_in_order() {
    let base_url = spawn_viewer_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base_url}/api/v1/viewer/active-heading"))
        .json(&json!({
            "scroll_top": 100.0,
            "headings": [
                { "id": "heading-0", "offset_top": 90.0, "rect_top": 10.0 },
                { "id": "heading-1", "offset_top": 110.0, "rect_top": 30.0 }
            ]
        }))
        .send()
        .await
        .unwrap();

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["active_heading_id"], "heading-0");
}
