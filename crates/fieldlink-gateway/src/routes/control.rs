//! Control routes: emergency stop, generic command, audit listing.
//!
//! Handler order mirrors the pipeline contract: identity, role gate,
//! safeguards, then the ledger. Every rejection fires before a `Command`
//! exists, so rejected requests leave no audit trace and cost no dispatch.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use fieldlink_core::command::{Command, Role};
use fieldlink_core::policy::{parse_asset_scope, validate_intent, validate_payload, CommandOrigin};

use crate::app_state::AppState;
use crate::auth::require_role;
use crate::routes::{authenticate, reject, ApiError};

/// Roles allowed to halt assets or read the ledger.
const OPERATOR_ROLES: &[Role] = &[Role::SuperAdmin, Role::LocalOperator];
/// Roles allowed to issue commands; the agent is further constrained by its
/// intent subset.
const COMMAND_ROLES: &[Role] = &[Role::SuperAdmin, Role::LocalOperator, Role::SystemAi];

/// Ledger listing cap.
const MAX_AUDIT_LIMIT: usize = 500;

#[derive(Debug, Deserialize)]
pub struct EmergencyStopRequest {
    #[serde(default)]
    pub asset_id: Option<String>,
    /// Accepted for wire compatibility; the authenticated subject wins.
    #[serde(default)]
    pub issued_by: Option<String>,
}

pub async fn emergency_stop(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<EmergencyStopRequest>,
) -> Result<Json<Value>, ApiError> {
    let identity = authenticate(&state, &headers, "emergency_stop")?;
    require_role(&identity, OPERATOR_ROLES).map_err(|e| reject(&state, e))?;

    // Missing or empty asset_id halts the whole fleet.
    let scope = match body.asset_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_asset_scope(raw).map_err(|e| reject(&state, e))?),
    };

    let (scope, result) = state
        .ledger()
        .emergency_stop(scope, identity.subject)
        .await
        .map_err(|e| reject(&state, e))?;

    state
        .metrics()
        .dispatched
        .inc(&[("intent", "emergency_stop"), ("result", result.as_str())]);
    Ok(Json(json!({ "ok": true, "scope": scope.to_string(), "result": result })))
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub asset_id: String,
    pub intent: String,
    /// Bounded nested object; absent means empty.
    #[serde(default)]
    pub payload: Option<serde_json::Map<String, Value>>,
    /// Accepted for wire compatibility; the authenticated subject wins.
    #[serde(default)]
    pub issued_by: Option<String>,
    #[serde(default)]
    pub is_override: bool,
}

pub async fn send_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CommandRequest>,
) -> Result<Json<Value>, ApiError> {
    let identity = authenticate(&state, &headers, "command")?;
    require_role(&identity, COMMAND_ROLES).map_err(|e| reject(&state, e))?;

    let origin = if identity.role == Role::SystemAi {
        CommandOrigin::Agent
    } else {
        CommandOrigin::Operator
    };

    let scope = parse_asset_scope(&body.asset_id).map_err(|e| reject(&state, e))?;
    let intent = validate_intent(&body.intent, origin).map_err(|e| reject(&state, e))?;
    let payload = Value::Object(body.payload.unwrap_or_default());
    validate_payload(Some(&payload)).map_err(|e| reject(&state, e))?;

    let cmd = Command {
        scope,
        intent,
        payload,
        issued_by: identity.subject,
        is_override: body.is_override,
        occurred_at: Utc::now(),
    };
    let result = state
        .ledger()
        .command(cmd)
        .await
        .map_err(|e| reject(&state, e))?;

    state
        .metrics()
        .dispatched
        .inc(&[("intent", intent.as_str()), ("result", result.as_str())]);
    Ok(Json(json!({
        "ok": true,
        "asset_id": scope.to_string(),
        "intent": intent.as_str(),
        "result": result,
    })))
}

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

pub async fn list_audit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(q): Query<AuditQuery>,
) -> Result<Json<Value>, ApiError> {
    let identity = authenticate(&state, &headers, "audit")?;
    require_role(&identity, OPERATOR_ROLES).map_err(|e| reject(&state, e))?;

    let limit = q.limit.unwrap_or(100).clamp(1, MAX_AUDIT_LIMIT);
    let filter = match q.asset_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => parse_asset_scope(raw)
            .map_err(|e| reject(&state, e))?
            .audit_id(),
    };

    let items = state
        .audit()
        .recent(filter, limit)
        .await
        .map_err(|e| reject(&state, e))?;
    let total = items.len();
    Ok(Json(json!({ "items": items, "total": total })))
}
