//! End-to-end pipeline through the control handlers: identity -> RBAC ->
//! safeguards -> ledger, with the in-memory collaborators.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use fieldlink_core::error::ClientCode;
use fieldlink_gateway::app_state::AppState;
use fieldlink_gateway::config::{AuthSection, GatewayConfig};
use fieldlink_gateway::dispatch::{AuditStore, BrokerSink, MemoryAuditStore};
use fieldlink_gateway::ratelimit::FixedWindowStore;
use fieldlink_gateway::routes::control::{
    emergency_stop, list_audit, send_command, AuditQuery, CommandRequest, EmergencyStopRequest,
};

const SECRET: &str = "0123456789abcdef0123456789abcdef";
const ASSET: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn test_state() -> (AppState, Arc<MemoryAuditStore>) {
    let cfg = GatewayConfig {
        version: 1,
        gateway: Default::default(),
        auth: AuthSection {
            secret: SECRET.into(),
            issuer: "fieldlink-api".into(),
            audience: "fieldlink-dashboard".into(),
            leeway_secs: 10,
            allow_dev_token: false,
        },
        rate_limit: Default::default(),
        sink: Default::default(),
    };
    let audit = Arc::new(MemoryAuditStore::new());
    let limiter = Arc::new(FixedWindowStore::new(&cfg.rate_limit));
    let state = AppState::with_parts(
        cfg,
        Arc::new(BrokerSink::new(None)),
        audit.clone(),
        limiter,
    );
    (state, audit)
}

fn headers_for(role: &str) -> HeaderMap {
    let now = Utc::now().timestamp();
    let claims = json!({
        "sub": format!("{role}-subject"),
        "role": role,
        "iss": "fieldlink-api",
        "aud": "fieldlink-dashboard",
        "iat": now,
        "exp": now + 600,
    });
    let header = json!({ "alg": "HS256", "typ": "JWT" });
    let h = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap());
    let p = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
    mac.update(format!("{h}.{p}").as_bytes());
    let sig = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    let mut headers = HeaderMap::new();
    headers.insert(
        "authorization",
        format!("Bearer {h}.{p}.{sig}").parse().unwrap(),
    );
    headers
}

fn command_body(intent: &str) -> CommandRequest {
    CommandRequest {
        asset_id: ASSET.into(),
        intent: intent.into(),
        payload: Some(serde_json::Map::new()),
        issued_by: Some("client-claimed-name".into()),
        is_override: false,
    }
}

#[tokio::test]
async fn operator_path_plan_is_accepted_and_audited() {
    let (state, audit) = test_state();

    let out = send_command(
        State(state.clone()),
        headers_for("local_operator"),
        Json(command_body("path_plan")),
    )
    .await
    .expect("must succeed");

    assert_eq!(out.0["ok"], json!(true));
    assert_eq!(out.0["asset_id"], json!(ASSET));
    assert_eq!(out.0["intent"], json!("path_plan"));
    assert_eq!(out.0["result"], json!("simulated"));

    let records = audit.recent(None, 10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].intent.as_str(), "path_plan");
    // the authenticated subject wins over the client-supplied issuer
    assert_eq!(records[0].issued_by, "local_operator-subject");
}

#[tokio::test]
async fn forbidden_intent_rejected_even_for_super_admin() {
    let (state, audit) = test_state();

    let err = send_command(
        State(state.clone()),
        headers_for("super_admin"),
        Json(command_body("destroy")),
    )
    .await
    .expect_err("must reject");
    assert_eq!(err.code(), ClientCode::InvalidIntent);
    assert!(audit.recent(None, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn unauthenticated_request_never_reaches_dispatch() {
    let (state, audit) = test_state();

    let err = send_command(
        State(state.clone()),
        HeaderMap::new(),
        Json(command_body("path_plan")),
    )
    .await
    .expect_err("must reject");
    assert_eq!(err.code(), ClientCode::Unauthenticated);
    assert!(audit.recent(None, 10).await.unwrap().is_empty());
    assert_eq!(state.metrics().auth_failures.total(), 1);
    assert_eq!(state.metrics().rejections.total(), 0);
}

#[tokio::test]
async fn agent_role_is_limited_to_its_intent_subset() {
    let (state, audit) = test_state();

    let err = send_command(
        State(state.clone()),
        headers_for("system_ai"),
        Json(command_body("take_control")),
    )
    .await
    .expect_err("must reject");
    assert_eq!(err.code(), ClientCode::InvalidIntent);
    assert!(audit.recent(None, 10).await.unwrap().is_empty());

    let out = send_command(
        State(state.clone()),
        headers_for("system_ai"),
        Json(command_body("patrol")),
    )
    .await
    .expect("must succeed");
    assert_eq!(out.0["ok"], json!(true));
}

#[tokio::test]
async fn agent_role_cannot_trigger_emergency_stop() {
    let (state, _audit) = test_state();

    let err = emergency_stop(
        State(state.clone()),
        headers_for("system_ai"),
        Json(EmergencyStopRequest {
            asset_id: None,
            issued_by: None,
        }),
    )
    .await
    .expect_err("must reject");
    assert_eq!(err.code(), ClientCode::Forbidden);
}

#[tokio::test]
async fn emergency_stop_without_asset_halts_the_fleet() {
    let (state, audit) = test_state();

    let out = emergency_stop(
        State(state.clone()),
        headers_for("super_admin"),
        Json(EmergencyStopRequest {
            asset_id: None,
            issued_by: None,
        }),
    )
    .await
    .expect("must succeed");
    assert_eq!(out.0["scope"], json!("all"));

    let records = audit.recent(None, 10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].asset_id, None);
    assert!(records[0].is_override);
}

#[tokio::test]
async fn deep_payload_rejected_at_the_gate() {
    let (state, audit) = test_state();

    let mut body = command_body("path_plan");
    let deep = json!({"a": {"b": {"c": {"d": {"e": {"f": 1}}}}}});
    body.payload = Some(deep.as_object().unwrap().clone());

    let err = send_command(State(state.clone()), headers_for("local_operator"), Json(body))
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), ClientCode::PayloadTooLarge);
    assert!(audit.recent(None, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn audit_listing_respects_role_and_filter() {
    let (state, _audit) = test_state();

    // system_ai may not read the ledger
    let err = list_audit(
        State(state.clone()),
        headers_for("system_ai"),
        axum::extract::Query(AuditQuery {
            asset_id: None,
            limit: None,
        }),
    )
    .await
    .expect_err("must reject");
    assert_eq!(err.code(), ClientCode::Forbidden);

    // seed two commands, then filter by asset
    send_command(
        State(state.clone()),
        headers_for("local_operator"),
        Json(command_body("path_plan")),
    )
    .await
    .unwrap();
    emergency_stop(
        State(state.clone()),
        headers_for("local_operator"),
        Json(EmergencyStopRequest {
            asset_id: None,
            issued_by: None,
        }),
    )
    .await
    .unwrap();

    let out = list_audit(
        State(state.clone()),
        headers_for("local_operator"),
        axum::extract::Query(AuditQuery {
            asset_id: Some(ASSET.into()),
            limit: None,
        }),
    )
    .await
    .expect("must succeed");
    assert_eq!(out.0["total"], json!(1));
    assert_eq!(out.0["items"][0]["intent"], json!("path_plan"));
}
