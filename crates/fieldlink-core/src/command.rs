//! Command data model: roles, intents, asset addressing, audit records.
//!
//! Roles and intents are closed enums. Anything that does not parse into a
//! variant is rejected upstream — "unlisted" is a compile-checked case, not
//! a string comparison that can silently miss.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operator role carried by a verified credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    LocalOperator,
    SystemAi,
}

impl Role {
    /// Wire string for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::LocalOperator => "local_operator",
            Role::SystemAi => "system_ai",
        }
    }

    /// Parse a role claim. Unknown strings do not resolve to any role.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim() {
            "super_admin" => Some(Role::SuperAdmin),
            "local_operator" => Some(Role::LocalOperator),
            "system_ai" => Some(Role::SystemAi),
            _ => None,
        }
    }
}

/// Named action a command requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    EmergencyStop,
    Override,
    PathPlan,
    MissionAbort,
    TakeControl,
    Investigate,
    Patrol,
    Retreat,
}

impl Intent {
    /// Wire string for this intent.
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::EmergencyStop => "emergency_stop",
            Intent::Override => "override",
            Intent::PathPlan => "path_plan",
            Intent::MissionAbort => "mission_abort",
            Intent::TakeControl => "take_control",
            Intent::Investigate => "investigate",
            Intent::Patrol => "patrol",
            Intent::Retreat => "retreat",
        }
    }

    /// Match an already-normalized (trimmed, lowercased) string against the
    /// closed intent set. Returns `None` for anything unlisted.
    pub fn from_normalized(s: &str) -> Option<Intent> {
        match s {
            "emergency_stop" => Some(Intent::EmergencyStop),
            "override" => Some(Intent::Override),
            "path_plan" => Some(Intent::PathPlan),
            "mission_abort" => Some(Intent::MissionAbort),
            "take_control" => Some(Intent::TakeControl),
            "investigate" => Some(Intent::Investigate),
            "patrol" => Some(Intent::Patrol),
            "retreat" => Some(Intent::Retreat),
            _ => None,
        }
    }
}

/// Command addressing: a single asset or the whole fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetScope {
    /// Every asset (literal `"all"` on the wire).
    All,
    /// One asset by UUID.
    Asset(Uuid),
}

impl AssetScope {
    /// UUID for the audit record; `None` for fleet-wide scope.
    pub fn audit_id(self) -> Option<Uuid> {
        match self {
            AssetScope::All => None,
            AssetScope::Asset(id) => Some(id),
        }
    }
}

impl std::fmt::Display for AssetScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetScope::All => f.write_str("all"),
            AssetScope::Asset(id) => write!(f, "{id}"),
        }
    }
}

/// A fully validated command, ready for dispatch. Immutable once built and
/// consumed exactly once by the ledger.
#[derive(Debug, Clone)]
pub struct Command {
    pub scope: AssetScope,
    pub intent: Intent,
    pub payload: serde_json::Value,
    /// Sanitized identity string of the issuer.
    pub issued_by: String,
    pub is_override: bool,
    pub occurred_at: DateTime<Utc>,
}

/// One append-only ledger entry per dispatch attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    /// `None` when the command addressed the whole fleet.
    pub asset_id: Option<Uuid>,
    pub intent: Intent,
    pub issued_by: String,
    pub is_override: bool,
    pub payload: serde_json::Value,
    /// Actuator sink outcome marker (e.g. "sent", "simulated", "error:timeout").
    pub result: String,
    pub created_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Build the ledger entry for a command and its sink outcome.
    pub fn for_command(cmd: &Command, result: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_id: cmd.scope.audit_id(),
            intent: cmd.intent,
            issued_by: cmd.issued_by.clone(),
            is_override: cmd.is_override,
            payload: cmd.payload.clone(),
            result,
            created_at: Utc::now(),
        }
    }
}
