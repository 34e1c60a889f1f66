//! Tiered fixed-window rate limiting.
//!
//! The store is injectable so a distributed deployment can substitute a
//! shared backend without touching the policy contract. The in-process
//! default keeps one window per client key; the per-key read-modify-write
//! happens under the map's entry guard, so concurrent bursts never
//! undercount. Entries are not evicted — bounded by distinct client keys
//! (single-process limitation, documented in DESIGN.md).

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;

use fieldlink_core::error::FieldLinkError;

use crate::app_state::AppState;
use crate::config::RateLimitSection;
use crate::routes::ApiError;

/// Route tier: authentication-adjacent routes get the stricter limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Auth,
    General,
}

impl RouteClass {
    pub fn classify(path: &str) -> Self {
        if path.contains("login") || path.starts_with("/v1/auth") {
            RouteClass::Auth
        } else {
            RouteClass::General
        }
    }
}

/// Outcome of one counter hit.
#[derive(Debug, Clone, Copy)]
pub struct RateDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
}

/// Injectable counter store (design note: swap for a shared external store
/// in a distributed deployment).
pub trait RateLimitStore: Send + Sync {
    /// Count one request for `key` at `now` and decide.
    fn hit(&self, key: &str, class: RouteClass, now: Instant) -> RateDecision;
}

#[derive(Debug)]
struct Window {
    count: u32,
    started: Instant,
}

/// In-process fixed-window counters, one per client key.
pub struct FixedWindowStore {
    windows: DashMap<String, Window>,
    window: Duration,
    general_max: u32,
    auth_max: u32,
}

impl FixedWindowStore {
    pub fn new(cfg: &RateLimitSection) -> Self {
        Self {
            windows: DashMap::new(),
            window: Duration::from_secs(cfg.window_secs),
            general_max: cfg.general_max,
            auth_max: cfg.auth_max,
        }
    }
}

impl RateLimitStore for FixedWindowStore {
    fn hit(&self, key: &str, class: RouteClass, now: Instant) -> RateDecision {
        let limit = match class {
            RouteClass::Auth => self.auth_max,
            RouteClass::General => self.general_max,
        };

        // Entry guard holds the shard lock: the reset-increment-compare
        // sequence is atomic per key.
        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert_with(|| Window { count: 0, started: now });
        if now.duration_since(entry.started) > self.window {
            entry.count = 0;
            entry.started = now;
        }
        entry.count += 1;

        RateDecision {
            allowed: entry.count <= limit,
            limit,
            remaining: limit.saturating_sub(entry.count),
        }
    }
}

/// Client key: first forwarded address when present, else the peer address.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    peer.map(|a| a.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Axum middleware: reject over-limit clients before any identity work.
/// Rejection produces no audit record — no command was formed yet.
pub async fn rate_limit_mw(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0);
    let key = client_key(req.headers(), peer);
    let class = RouteClass::classify(req.uri().path());

    let decision = state.limiter().hit(&key, class, Instant::now());
    if !decision.allowed {
        state.metrics().rate_limited.inc(&[("class", class_label(class))]);
        tracing::warn!(%key, "rate limit exceeded");
        return ApiError::from(FieldLinkError::RateLimited).into_response();
    }

    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    if let Ok(v) = decision.limit.to_string().parse() {
        headers.insert("x-ratelimit-limit", v);
    }
    if let Ok(v) = decision.remaining.to_string().parse() {
        headers.insert("x-ratelimit-remaining", v);
    }
    response
}

fn class_label(class: RouteClass) -> &'static str {
    match class {
        RouteClass::Auth => "auth",
        RouteClass::General => "general",
    }
}
