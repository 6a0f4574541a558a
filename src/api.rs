// Portfolio Dashboard - REST API with Axum
// All handlers read a shared, immutable Dashboard; each request brings its own selection.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::dashboard::{Dashboard, TableRow};
use crate::filter::{FilterSelection, ALL};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Filter query string: ?fund=..&industry=..&status=.., each defaulting to "all"
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    fund: Option<String>,
    industry: Option<String>,
    status: Option<String>,
}

impl FilterQuery {
    fn selection(&self) -> crate::Result<FilterSelection> {
        FilterSelection::from_values(
            self.fund.as_deref().unwrap_or(ALL),
            self.industry.as_deref().unwrap_or(ALL),
            self.status.as_deref().unwrap_or(ALL),
        )
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    records: usize,
    source: String,
    loaded_at: DateTime<Utc>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// Run `f` on the parsed selection, or answer 400 for an invalid one
fn with_selection<T, F>(query: &FilterQuery, f: F) -> Response
where
    T: Serialize,
    F: FnOnce(&FilterSelection) -> T,
{
    match query.selection() {
        Ok(selection) => (StatusCode::OK, Json(ApiResponse::ok(f(&selection)))).into_response(),
        Err(e) => {
            log::warn!("Rejected filter query {:?}: {}", query, e);
            (StatusCode::BAD_REQUEST, Json(ApiResponse::<T>::err(e.to_string()))).into_response()
        }
    }
}

/// GET /api/health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let portfolio = state.dashboard.portfolio();

    Json(ApiResponse::ok(HealthResponse {
        status: "OK",
        records: portfolio.len(),
        source: portfolio.source.clone(),
        loaded_at: portfolio.loaded_at,
    }))
}

/// GET /api/filters - Values for the filter controls
async fn get_filters(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.dashboard.options().clone()))
}

/// GET /api/records - Filtered table rows
async fn get_records(State(state): State<AppState>, Query(query): Query<FilterQuery>) -> Response {
    with_selection(&query, |selection| -> Vec<TableRow> {
        state.dashboard.view_for(selection).table
    })
}

/// GET /api/summary - Summary statistics for a selection
async fn get_summary(State(state): State<AppState>, Query(query): Query<FilterQuery>) -> Response {
    with_selection(&query, |selection| state.dashboard.view_for(selection).summary)
}

/// GET /api/dashboard - Full view: summary, charts and table
async fn get_dashboard(State(state): State<AppState>, Query(query): Query<FilterQuery>) -> Response {
    with_selection(&query, |selection| state.dashboard.view_for(selection))
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(dashboard: Arc<Dashboard>, web_dir: &Path) -> Router {
    let state = AppState { dashboard };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/filters", get(get_filters))
        .route("/records", get(get_records))
        .route("/summary", get(get_summary))
        .route("/dashboard", get(get_dashboard))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new(web_dir))
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
