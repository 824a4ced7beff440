//! carnet-api - HTTP API server for carnet
//!
//! Serves the sidebar CRUD (categories, entries), the month-based browse
//! pages, and the read-only entry viewer projection (blocks, TOC, HTML).

use std::net::SocketAddr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use carnet_api::viewer::resolve_active_heading;
use carnet_core::{
    entries_for_month, group_by_month, CategoryRepository, CreateEntryRequest, EntryRepository,
    EntryView, MonthKey, SortOrder,
};
use carnet_db::Database;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically. Useful for
/// log correlation when chasing a misbehaving request.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    db: Database,
}

const REQUEST_BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;
const X_REQUEST_ID: &str = "x-request-id";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "carnet_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "carnet_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("carnet-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(non_blocking);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            } else {
                layer = layer.with_ansi(false); // no ANSI in files
            }
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/carnet".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    // Connect to database
    info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;
    info!("Database connected");

    // Run pending database migrations on startup
    info!("Running database migrations...");
    db.migrate().await?;
    info!("Database migrations complete");

    // Create app state; constructed here and passed by reference everywhere,
    // never held as a module-level global.
    let state = AppState { db };
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router.
fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Categories (sidebar)
        .route(
            "/api/v1/categories",
            get(list_categories).post(create_category),
        )
        .route("/api/v1/categories/:id", axum::routing::delete(delete_category))
        // Entries
        .route("/api/v1/entries", get(list_entries).post(create_entry))
        .route("/api/v1/entries/months", get(list_month_groups))
        .route("/api/v1/entries/months/:month", get(list_month_entries))
        .route("/api/v1/entries/:id", axum::routing::delete(delete_entry))
        // Entry access scoped to a category, as the viewer navigates
        .route(
            "/api/v1/categories/:category_id/entries/:entry_id",
            get(get_entry),
        )
        .route(
            "/api/v1/categories/:category_id/entries/:entry_id/content",
            put(update_entry_content),
        )
        .route(
            "/api/v1/categories/:category_id/entries/:entry_id/view",
            get(get_entry_view),
        )
        // Stateless viewer helper for thin clients
        .route("/api/v1/viewer/active-heading", post(resolve_active_heading))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(REQUEST_BODY_LIMIT_BYTES))
        .layer(PropagateRequestIdLayer::new(
            axum::http::HeaderName::from_static(X_REQUEST_ID),
        ))
        .layer(SetRequestIdLayer::new(
            axum::http::HeaderName::from_static(X_REQUEST_ID),
            MakeRequestUuidV7,
        ))
        .with_state(state)
}

// =============================================================================
// SYSTEM
// =============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    carnet_db::log_pool_metrics(state.db.pool());
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// =============================================================================
// CATEGORIES
// =============================================================================

async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = state.db.categories.list_with_entries().await?;
    Ok(Json(categories))
}

#[derive(Debug, Deserialize)]
struct CreateCategoryBody {
    name: String,
}

async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryBody>,
) -> Result<impl IntoResponse, ApiError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Category name is required".to_string()));
    }

    if state.db.categories.find_by_name(name).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "Category already exists: {name}"
        )));
    }

    let category = state.db.categories.create(name).await?;
    info!(category_id = category.id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state.db.categories.delete(id).await?;
    info!(category_id = id, "Category deleted");
    Ok(Json(category))
}

// =============================================================================
// ENTRIES
// =============================================================================

async fn list_entries(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let entries = state.db.entries.list_with_categories().await?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
struct CreateEntryBody {
    title: String,
    category_id: i64,
    /// Optional initial document tree; defaults to the `{}` sentinel.
    content: Option<JsonValue>,
}

async fn create_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateEntryBody>,
) -> Result<impl IntoResponse, ApiError> {
    let title = body.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Entry title is required".to_string()));
    }

    let entry = state
        .db
        .entries
        .create(CreateEntryRequest {
            title: title.to_string(),
            category_id: body.category_id,
            content: body.content,
        })
        .await?;

    info!(
        entry_id = entry.id,
        category_id = entry.category_id,
        "Entry created"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.entries.delete(id).await?;
    info!(entry_id = id, "Entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn get_entry(
    State(state): State<AppState>,
    Path((category_id, entry_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = state
        .db
        .entries
        .get_in_category(category_id, entry_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Entry not found: {entry_id}")))?;
    Ok(Json(entry))
}

#[derive(Debug, Deserialize)]
struct UpdateContentBody {
    content: Option<JsonValue>,
}

async fn update_entry_content(
    State(state): State<AppState>,
    Path((category_id, entry_id)): Path<(i64, i64)>,
    Json(body): Json<UpdateContentBody>,
) -> Result<impl IntoResponse, ApiError> {
    let content = body
        .content
        .ok_or_else(|| ApiError::BadRequest("Missing content".to_string()))?;

    // Scope the update to the category in the path.
    if state
        .db
        .entries
        .get_in_category(category_id, entry_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(format!("Entry not found: {entry_id}")));
    }

    let entry = state.db.entries.update_content(entry_id, &content).await?;
    info!(entry_id, "Entry content updated");
    Ok(Json(entry))
}

// =============================================================================
// MONTH BROWSING
// =============================================================================

async fn list_month_groups(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let entries = state.db.entries.list_with_categories().await?;
    Ok(Json(group_by_month(entries)))
}

#[derive(Debug, Deserialize)]
struct MonthQuery {
    #[serde(default)]
    sort: Option<SortOrder>,
}

async fn list_month_entries(
    State(state): State<AppState>,
    Path(month): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let month: MonthKey = month.parse()?;
    let entries = state.db.entries.list_with_categories().await?;
    let entries = entries_for_month(entries, month, query.sort.unwrap_or_default());
    Ok(Json(serde_json::json!({
        "month": month,
        "entries": entries,
    })))
}

// =============================================================================
// VIEWER
// =============================================================================

/// The viewer projection served per entry view: structured blocks, the TOC,
/// and a server-rendered HTML fragment.
#[derive(Debug, Serialize)]
struct ViewResponse {
    entry_id: i64,
    title: String,
    #[serde(flatten)]
    view: EntryView,
}

async fn get_entry_view(
    State(state): State<AppState>,
    Path((category_id, entry_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    // The content fetch resolves before any classification or rendering
    // runs; a failed fetch surfaces as an error, never as an empty document.
    let entry = state
        .db
        .entries
        .get_in_category(category_id, entry_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Entry not found: {entry_id}")))?;

    let view = EntryView::from_json(&entry.content)?;
    Ok(Json(ViewResponse {
        entry_id: entry.id,
        title: entry.title,
        view,
    }))
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
enum ApiError {
    Database(carnet_core::Error),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
}

impl From<carnet_core::Error> for ApiError {
    fn from(err: carnet_core::Error) -> Self {
        match &err {
            carnet_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            carnet_core::Error::CategoryNotFound(_) | carnet_core::Error::EntryNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            carnet_core::Error::DuplicateCategory(_) | carnet_core::Error::CategoryNotEmpty(_) => {
                ApiError::Conflict(err.to_string())
            }
            carnet_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_not_found_maps_to_404() {
        let err: ApiError = carnet_core::Error::CategoryNotFound(9).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_entry_not_found_maps_to_404() {
        let err: ApiError = carnet_core::Error::EntryNotFound(3).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_duplicate_category_maps_to_409() {
        let err: ApiError = carnet_core::Error::DuplicateCategory("Journal".to_string()).into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_non_empty_category_maps_to_409() {
        let err: ApiError = carnet_core::Error::CategoryNotEmpty(4).into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let err: ApiError = carnet_core::Error::InvalidInput("month out of range".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_database_errors_stay_500() {
        let err: ApiError =
            carnet_core::Error::Serialization("bad stored content".to_string()).into();
        assert!(matches!(err, ApiError::Database(_)));
    }

    #[test]
    fn test_month_query_sort_parses() {
        let q: MonthQuery = serde_json::from_str(r#"{"sort":"asc"}"#).unwrap();
        assert_eq!(q.sort, Some(SortOrder::Asc));

        let q: MonthQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.sort, None);
    }

}
