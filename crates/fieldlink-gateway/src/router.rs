//! Axum router wiring.
//!
//! Route layout: operational endpoints plus the `/v1/control` surface.
//! The rate-limit layer runs before any handler; the security-headers layer
//! wraps everything so even rejections carry the hardened header set.

use axum::body::Body;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;

use crate::app_state::AppState;
use crate::ratelimit;
use crate::routes::{control, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .route("/v1/control/emergency-stop", post(control::emergency_stop))
        .route("/v1/control/command", post(control::send_command))
        .route("/v1/control/audit", get(control::list_audit))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ratelimit::rate_limit_mw,
        ))
        .layer(middleware::from_fn(security_headers_mw))
        .with_state(state)
}

/// Hardened response headers applied to every response.
const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    (
        "content-security-policy",
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline';",
    ),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

async fn security_headers_mw(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(*name, HeaderValue::from_static(value));
    }
    response
}
