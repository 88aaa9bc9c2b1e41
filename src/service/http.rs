//! HTTP transport — maps HTTP requests to the two entry handlers.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /read` — body is a [`ReadRequest`]; responds with the record list.
//! - `POST /write` — body is a [`WriteRequest`]; responds `204` on success.
//! - `GET /health` — health check returning `{ "ok": true }`.
//!
//! Errors respond with `{"error": "invalid" | "blocked" | "unknown"}` and the
//! matching status code (400 / 423 / 500).
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lease_lock::{service, ChoreService, InMemoryStore, LockConfig};
//!
//! let svc = Arc::new(ChoreService::new(Arc::new(InMemoryStore::new()), LockConfig::default()));
//!
//! // Get the router to compose with other axum routes
//! let app = service::router(svc.clone());
//!
//! // Or serve directly
//! service::serve(svc, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::store::Store;

use super::read::ReadRequest;
use super::write::WriteRequest;
use super::{ChoreService, ServiceError};

/// Build an axum `Router` serving the two handlers.
pub fn router<S: Store + 'static>(service: Arc<ChoreService<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/read", post(read_handler))
        .route("/write", post(write_handler))
        .with_state(service)
}

/// Serve over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S: Store + 'static>(
    service: Arc<ChoreService<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

async fn read_handler<S: Store + 'static>(
    State(service): State<Arc<ChoreService<S>>>,
    Json(req): Json<ReadRequest>,
) -> impl IntoResponse {
    match service.read(&req) {
        Ok(records) => (StatusCode::OK, Json(json!(records))).into_response(),
        Err(e) => error_response(e),
    }
}

async fn write_handler<S: Store + 'static>(
    State(service): State<Arc<ChoreService<S>>>,
    Json(req): Json<WriteRequest>,
) -> impl IntoResponse {
    match service.write(&req) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: ServiceError) -> axum::response::Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}
