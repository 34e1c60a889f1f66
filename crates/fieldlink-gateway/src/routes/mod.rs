//! HTTP route handlers and the client-facing error surface.

pub mod control;
pub mod ops;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;

use fieldlink_core::error::{ClientCode, FieldLinkError};

use crate::app_state::AppState;
use crate::auth::{resolve_identity, Identity};

/// Client-facing rejection: stable code, short reason, no internal detail.
#[derive(Debug)]
pub struct ApiError(FieldLinkError);

impl ApiError {
    /// Stable code this rejection maps to.
    pub fn code(&self) -> ClientCode {
        self.0.client_code()
    }
}

impl From<FieldLinkError> for ApiError {
    fn from(err: FieldLinkError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let msg = match code {
            // Server-side failures never leak detail to the client.
            ClientCode::AuditWriteFailed => "audit write failed".to_string(),
            ClientCode::Internal => "internal error".to_string(),
            _ => self.0.to_string(),
        };
        let body = Json(json!({ "ok": false, "code": code.as_str(), "msg": msg }));
        (status_for(code), body).into_response()
    }
}

fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest
        | ClientCode::InvalidAssetId
        | ClientCode::InvalidIntent
        | ClientCode::PayloadTooLarge => StatusCode::BAD_REQUEST,
        ClientCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ClientCode::Forbidden => StatusCode::FORBIDDEN,
        ClientCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ClientCode::AuditWriteFailed | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Resolve the request identity or fail with 401 (counted per route).
pub fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
    route: &'static str,
) -> Result<Identity, ApiError> {
    let authorization = headers.get("authorization").and_then(|v| v.to_str().ok());
    resolve_identity(authorization, &state.cfg().auth, Utc::now()).map_err(|e| {
        state.metrics().auth_failures.inc(&[("route", route)]);
        ApiError::from(e)
    })
}

/// Count a post-auth rejection and convert it for the client.
pub fn reject(state: &AppState, err: FieldLinkError) -> ApiError {
    match err.client_code() {
        ClientCode::AuditWriteFailed => state.metrics().audit_failures.inc(&[]),
        code => state.metrics().rejections.inc(&[("code", code.as_str())]),
    }
    ApiError::from(err)
}
