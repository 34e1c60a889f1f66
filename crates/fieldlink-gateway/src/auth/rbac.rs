//! Role gate: pure predicate over an already-verified identity.

use fieldlink_core::command::Role;
use fieldlink_core::error::{FieldLinkError, Result};

use super::Identity;

/// Pass the identity through unchanged if its role is in the allowed set.
pub fn require_role(identity: &Identity, allowed: &[Role]) -> Result<()> {
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        Err(FieldLinkError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            subject: "op-1".into(),
            role,
            regions: vec![],
        }
    }

    #[test]
    fn role_in_set_passes() {
        let id = identity(Role::LocalOperator);
        assert!(require_role(&id, &[Role::SuperAdmin, Role::LocalOperator]).is_ok());
    }

    #[test]
    fn role_outside_set_is_forbidden() {
        let id = identity(Role::SystemAi);
        let err = require_role(&id, &[Role::SuperAdmin, Role::LocalOperator]);
        assert!(matches!(err, Err(FieldLinkError::Forbidden)));
    }
}
