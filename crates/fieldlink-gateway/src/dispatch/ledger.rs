//! The authoritative dispatch sequence.
//!
//! Per command: `Received -> Validated -> {Rejected | Dispatched} -> Logged
//! -> Responded`. Rejections happen upstream, before a `Command` exists, and
//! write nothing. Once a command exists it is dispatched and logged exactly
//! once — a sink failure is absorbed into the outcome marker, an audit
//! failure is fatal to the request.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;

use fieldlink_core::command::{AssetScope, AuditRecord, Command, Intent};
use fieldlink_core::error::{FieldLinkError, Result};

use super::{ActuatorSink, AuditStore};

/// Sink outcome marker when the actuator call exceeds its budget.
pub const OUTCOME_TIMEOUT: &str = "error:timeout";

pub struct CommandLedger {
    sink: Arc<dyn ActuatorSink>,
    audit: Arc<dyn AuditStore>,
    sink_timeout: Duration,
    audit_timeout: Duration,
}

impl CommandLedger {
    pub fn new(
        sink: Arc<dyn ActuatorSink>,
        audit: Arc<dyn AuditStore>,
        sink_timeout: Duration,
        audit_timeout: Duration,
    ) -> Self {
        Self {
            sink,
            audit,
            sink_timeout,
            audit_timeout,
        }
    }

    /// Fleet-halt fast path. Scope defaults to every asset; the override
    /// flag is forced regardless of caller input. Asset addressing has
    /// already been validated upstream like any other command.
    pub async fn emergency_stop(
        &self,
        scope: Option<AssetScope>,
        issued_by: String,
    ) -> Result<(AssetScope, String)> {
        let scope = scope.unwrap_or(AssetScope::All);
        let cmd = Command {
            scope,
            intent: Intent::EmergencyStop,
            payload: json!({ "scope": scope.to_string() }),
            issued_by,
            is_override: true,
            occurred_at: Utc::now(),
        };
        let outcome = self.dispatch_and_log(cmd).await?;
        Ok((scope, outcome))
    }

    /// Dispatch a validated command. Callers must have run the safeguard
    /// checks; this method trusts its input and guarantees the audit write.
    pub async fn command(&self, cmd: Command) -> Result<String> {
        self.dispatch_and_log(cmd).await
    }

    async fn dispatch_and_log(&self, cmd: Command) -> Result<String> {
        let outcome = match tokio::time::timeout(
            self.sink_timeout,
            self.sink.dispatch(&cmd.scope, cmd.intent, &cmd.payload),
        )
        .await
        {
            Ok(marker) => marker,
            Err(_) => {
                tracing::warn!(scope = %cmd.scope, intent = cmd.intent.as_str(), "actuator sink timed out");
                OUTCOME_TIMEOUT.to_string()
            }
        };

        // The audit write is synchronous and fatal on failure: an
        // unauditable privileged action must not appear to succeed.
        let record = AuditRecord::for_command(&cmd, outcome.clone());
        match tokio::time::timeout(self.audit_timeout, self.audit.append(record)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::error!(error = %e, "audit write failed");
                return Err(FieldLinkError::AuditWriteFailed(e.to_string()));
            }
            Err(_) => {
                tracing::error!("audit write timed out");
                return Err(FieldLinkError::AuditWriteFailed("audit write timed out".into()));
            }
        }

        tracing::info!(
            scope = %cmd.scope,
            intent = cmd.intent.as_str(),
            issued_by = %cmd.issued_by,
            result = %outcome,
            "command dispatched and logged"
        );
        Ok(outcome)
    }
}
