//! Safeguard pipeline vectors: the composed checks a command must pass.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use fieldlink_core::command::{AssetScope, AuditRecord, Command, Intent};
use fieldlink_core::error::ClientCode;
use fieldlink_core::policy::{parse_asset_scope, validate_intent, validate_payload, CommandOrigin};
use fieldlink_core::sanitize::sanitize_issued_by;
use serde_json::json;

/// Run the same checks the gateway runs before a Command may exist.
fn validate(asset_id: &str, intent: &str, payload: Option<&serde_json::Value>) -> Result<(AssetScope, Intent), ClientCode> {
    let scope = parse_asset_scope(asset_id).map_err(|e| e.client_code())?;
    let intent = validate_intent(intent, CommandOrigin::Operator).map_err(|e| e.client_code())?;
    validate_payload(payload).map_err(|e| e.client_code())?;
    Ok((scope, intent))
}

#[test]
fn operator_path_plan_passes_all_stages() {
    let payload = json!({});
    let (scope, intent) = validate(
        "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "path_plan",
        Some(&payload),
    )
    .expect("must validate");
    assert!(matches!(scope, AssetScope::Asset(_)));
    assert_eq!(intent, Intent::PathPlan);
}

#[test]
fn forbidden_intent_rejected_before_anything_else_matters() {
    let err = validate("3fa85f64-5717-4562-b3fc-2c963f66afa6", "destroy", None).unwrap_err();
    assert_eq!(err.as_str(), "INVALID_INTENT");
}

#[test]
fn deep_payload_rejected_despite_valid_intent_and_asset() {
    let payload = json!({"a": {"b": {"c": {"d": {"e": {"f": 1}}}}}});
    let err = validate(
        "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "path_plan",
        Some(&payload),
    )
    .unwrap_err();
    assert_eq!(err.as_str(), "PAYLOAD_TOO_LARGE");
}

#[test]
fn audit_record_snapshots_the_command() {
    let cmd = Command {
        scope: AssetScope::All,
        intent: Intent::EmergencyStop,
        payload: json!({"scope": "all"}),
        issued_by: sanitize_issued_by(Some("ops@hq")),
        is_override: true,
        occurred_at: chrono::Utc::now(),
    };
    let rec = AuditRecord::for_command(&cmd, "simulated".into());
    assert_eq!(rec.asset_id, None);
    assert_eq!(rec.intent, Intent::EmergencyStop);
    assert!(rec.is_override);
    assert_eq!(rec.result, "simulated");
    assert_eq!(rec.payload, cmd.payload);
}
