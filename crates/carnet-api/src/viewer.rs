//! Stateless viewer endpoints.
//!
//! The scroll-sync computation itself lives in `carnet_core::scroll`; this
//! module is the HTTP shim for clients that report geometry and delegate the
//! highlight decision to the server instead of embedding the core crate.

use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use carnet_core::{resolve_active, HeadingGeometry};

/// Client-reported scroll state: viewport scroll position plus the measured
/// geometry of every rendered heading.
#[derive(Debug, Deserialize)]
pub struct ActiveHeadingRequest {
    pub scroll_top: f64,
    #[serde(default)]
    pub headings: Vec<HeadingGeometry>,
}

#[derive(Debug, Serialize)]
pub struct ActiveHeadingResponse {
    /// Heading the TOC should highlight; `null` clears the highlight.
    pub active_heading_id: Option<String>,
}

/// Resolve the TOC highlight for a reported scroll position.
pub async fn resolve_active_heading(Json(body): Json<ActiveHeadingRequest>) -> impl IntoResponse {
    let active = resolve_active(&body.headings, body.scroll_top).map(String::from);
    Json(ActiveHeadingResponse {
        active_heading_id: active,
    })
}
