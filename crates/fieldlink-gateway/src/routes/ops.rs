//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "fieldlink-gateway" }))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
