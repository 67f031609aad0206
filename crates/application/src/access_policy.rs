use std::str::FromStr;

use bucketgate_core::{AppError, AppResult, UserIdentity};
use bucketgate_domain::{Capability, Role};

/// Resolves the caller's role from the session role claim.
pub fn resolve_role(actor: &UserIdentity) -> AppResult<Role> {
    let claim = actor.role().ok_or_else(|| {
        AppError::Unauthorized(format!(
            "subject '{}' has no resolvable role",
            actor.subject()
        ))
    })?;

    Role::from_str(claim)
}

/// Ensures the caller's role carries the capability.
pub fn require_capability(actor: &UserIdentity, capability: Capability) -> AppResult<Role> {
    let role = resolve_role(actor)?;
    if !role.has_capability(capability) {
        return Err(AppError::Unauthorized(format!(
            "role '{}' is missing capability '{}'",
            role.as_str(),
            capability.as_str()
        )));
    }

    Ok(role)
}

#[cfg(test)]
mod tests {
    use bucketgate_core::{AppError, UserIdentity};
    use bucketgate_domain::{Capability, Role};

    use super::{require_capability, resolve_role};

    fn identity(role: Option<&str>) -> UserIdentity {
        UserIdentity::new("alice", "Alice", None, None, role.map(str::to_owned))
    }

    #[test]
    fn missing_role_claim_is_unauthorized() {
        assert!(matches!(
            resolve_role(&identity(None)),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn owner_passes_capability_check() {
        let role = require_capability(&identity(Some("owner")), Capability::MonitorActiveGrants);
        assert_eq!(role.ok(), Some(Role::Owner));
    }

    #[test]
    fn member_fails_capability_check() {
        let result = require_capability(&identity(Some("member")), Capability::DecideAccessRequests);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
