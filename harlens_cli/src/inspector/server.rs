//! Inspector HTTP server

use super::html::INSPECTOR_HTML;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use harlens_common::{InspectError, InspectorEntry, PathClassifier, Severity, Trace};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

/// App state for the inspector server
#[derive(Clone)]
struct AppState {
    trace: Arc<Trace>,
    classifier: Arc<PathClassifier>,
    source: Arc<String>,
}

impl AppState {
    fn inspect(&self, search: &str) -> Result<Vec<InspectorEntry>, InspectError> {
        self.trace.inspect(search, self.classifier.as_ref())
    }
}

/// Build the inspector router for a loaded trace
pub fn router(trace: Arc<Trace>, classifier: PathClassifier, source: String) -> Router {
    let state = AppState {
        trace,
        classifier: Arc::new(classifier),
        source: Arc::new(source),
    };

    Router::new()
        // Dashboard
        .route("/", get(serve_dashboard))
        // Health check
        .route("/api/health", get(health_check))
        .route("/api/info", get(get_info))
        // Entries
        .route("/api/entries", get(get_entries))
        .route("/api/entries/{index}", get(get_entry))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router on an already bound listener
pub fn start_server(listener: TcpListener, app: Router) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Inspector server stopped: {}", e);
        }
    })
}

// ============================================================================
// Info
// ============================================================================

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    service: String,
    version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "harlens-inspector".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Trace info for the dashboard header
#[derive(Serialize)]
struct InfoResponse {
    source: String,
    creator: Option<String>,
    entries: usize,
}

async fn get_info(State(state): State<AppState>) -> Json<InfoResponse> {
    let creator = state
        .trace
        .log
        .creator
        .as_ref()
        .map(|creator| format!("{} {}", creator.name, creator.version).trim().to_string());

    Json(InfoResponse {
        source: state.source.to_string(),
        creator,
        entries: state.trace.entries().len(),
    })
}

// ============================================================================
// Entries
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    search: String,
}

/// A table row as sent to the dashboard
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryRow<'a> {
    index: usize,
    severity: Severity,
    display_url: String,
    #[serde(flatten)]
    row: &'a InspectorEntry,
}

impl<'a> EntryRow<'a> {
    fn new(index: usize, row: &'a InspectorEntry) -> Self {
        Self {
            index,
            severity: row.severity(),
            display_url: row.display_url().into_owned(),
            row,
        }
    }
}

/// Get the filtered entry list
async fn get_entries(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    match state.inspect(&params.search) {
        Ok(rows) => {
            let rows: Vec<EntryRow> = rows
                .iter()
                .enumerate()
                .map(|(index, row)| EntryRow::new(index, row))
                .collect();
            Json(rows).into_response()
        }
        Err(e) => inspect_failed(e),
    }
}

/// Get one row of the filtered entry list
async fn get_entry(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Query(params): Query<SearchParams>,
) -> Response {
    match state.inspect(&params.search) {
        Ok(rows) => match rows.get(index) {
            Some(row) => Json(EntryRow::new(index, row)).into_response(),
            None => (StatusCode::NOT_FOUND, "Entry not found").into_response(),
        },
        Err(e) => inspect_failed(e),
    }
}

/// The whole pass failed; report it instead of a partial table
fn inspect_failed(e: InspectError) -> Response {
    tracing::warn!("Failed to inspect trace: {}", e);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({ "error": e.to_string() })),
    )
        .into_response()
}

/// Serve the HTML dashboard
async fn serve_dashboard() -> Html<&'static str> {
    Html(INSPECTOR_HTML)
}
