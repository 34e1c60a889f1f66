//! Intent allowlist validation (default-deny).

use crate::command::Intent;
use crate::error::{FieldLinkError, Result};

use super::FORBIDDEN_INTENTS;

/// Where a command originates; the autonomous agent gets a narrower allowlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOrigin {
    /// Human operator (or admin) issuing through the dashboard/API.
    Operator,
    /// The autonomous decision agent.
    Agent,
}

/// Validate a raw intent string for the given origin.
///
/// Normalizes (trim + ASCII lowercase) before comparison. Forbidden intents
/// are rejected first; anything that then fails to match the closed enum is
/// rejected too — absence from the allowlist is a rejection, not a pass.
pub fn validate_intent(raw: &str, origin: CommandOrigin) -> Result<Intent> {
    let normalized = raw.trim().to_ascii_lowercase();
    if normalized.is_empty() || FORBIDDEN_INTENTS.contains(&normalized.as_str()) {
        return Err(FieldLinkError::InvalidIntent);
    }
    let intent = Intent::from_normalized(&normalized).ok_or(FieldLinkError::InvalidIntent)?;
    match origin {
        CommandOrigin::Operator => Ok(intent),
        CommandOrigin::Agent => {
            if agent_allowed(intent) {
                Ok(intent)
            } else {
                Err(FieldLinkError::InvalidIntent)
            }
        }
    }
}

/// Intents the autonomous agent may issue without a human in the loop.
fn agent_allowed(intent: Intent) -> bool {
    matches!(
        intent,
        Intent::PathPlan
            | Intent::Investigate
            | Intent::Patrol
            | Intent::Retreat
            | Intent::MissionAbort
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_rejected_for_every_origin() {
        for raw in ["lethal", "weapon", "destroy", "disable_permanent", " DESTROY "] {
            assert!(validate_intent(raw, CommandOrigin::Operator).is_err());
            assert!(validate_intent(raw, CommandOrigin::Agent).is_err());
        }
    }

    #[test]
    fn unlisted_intent_is_default_deny() {
        for raw in ["self_destruct", "reboot", "", "  "] {
            assert!(validate_intent(raw, CommandOrigin::Operator).is_err());
        }
    }

    #[test]
    fn operator_allowlist_accepts_normalized_input() {
        assert_eq!(
            validate_intent("  Path_Plan ", CommandOrigin::Operator).ok(),
            Some(Intent::PathPlan)
        );
        assert_eq!(
            validate_intent("EMERGENCY_STOP", CommandOrigin::Operator).ok(),
            Some(Intent::EmergencyStop)
        );
    }

    #[test]
    fn agent_subset_is_narrower() {
        assert!(validate_intent("patrol", CommandOrigin::Agent).is_ok());
        assert!(validate_intent("mission_abort", CommandOrigin::Agent).is_ok());
        assert!(validate_intent("take_control", CommandOrigin::Agent).is_err());
        assert!(validate_intent("override", CommandOrigin::Agent).is_err());
        assert!(validate_intent("emergency_stop", CommandOrigin::Agent).is_err());
    }
}
