//! Ownership and role rules.
//!
//! These functions are pure: callers resolve the resource owner (or learn the
//! resource is missing) before asking for a decision. Existence is always
//! settled first, so a missing resource yields [`AccessDecision::NotFound`]
//! regardless of who is asking.

use serde::Serialize;
use uuid::Uuid;

use tollgate_models::Role;

use crate::claims::SessionClaim;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    Deny,
    NotFound,
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        self == AccessDecision::Allow
    }
}

/// True only when the caller is the recorded owner.
///
/// No role (ADMIN included) bypasses ownership.
pub fn can_mutate(claim: &SessionClaim, owner_id: Uuid) -> bool {
    claim.sub == owner_id
}

/// True only when the caller's role is exactly `required`.
///
/// Roles are not hierarchical, and a claim without a role never passes.
pub fn can_perform_role_action(claim: &SessionClaim, required: Role) -> bool {
    claim.role == Some(required)
}

/// Decision for a mutation given the owner lookup result.
pub fn decide_mutation(claim: &SessionClaim, owner_id: Option<Uuid>) -> AccessDecision {
    match owner_id {
        None => AccessDecision::NotFound,
        Some(owner) if can_mutate(claim, owner) => AccessDecision::Allow,
        Some(_) => AccessDecision::Deny,
    }
}

pub fn decide_role_action(claim: &SessionClaim, required: Role) -> AccessDecision {
    if can_perform_role_action(claim, required) {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(sub: Uuid, role: Option<Role>) -> SessionClaim {
        SessionClaim {
            sub,
            role,
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[test]
    fn test_owner_can_mutate() {
        let id = Uuid::new_v4();
        assert!(can_mutate(&claim(id, Some(Role::Student)), id));
    }

    #[test]
    fn test_admin_does_not_bypass_ownership() {
        let admin = claim(Uuid::new_v4(), Some(Role::Admin));
        assert!(!can_mutate(&admin, Uuid::new_v4()));
    }

    #[test]
    fn test_roles_are_not_hierarchical() {
        let admin = claim(Uuid::new_v4(), Some(Role::Admin));
        assert!(!can_perform_role_action(&admin, Role::Instructor));
        assert!(!can_perform_role_action(&admin, Role::Student));
        assert!(can_perform_role_action(&admin, Role::Admin));
    }

    #[test]
    fn test_missing_role_never_passes() {
        let anonymous = claim(Uuid::new_v4(), None);
        for role in [Role::Student, Role::Instructor, Role::Admin] {
            assert_eq!(decide_role_action(&anonymous, role), AccessDecision::Deny);
        }
    }

    #[test]
    fn test_missing_resource_is_not_found_for_everyone() {
        let id = Uuid::new_v4();
        assert_eq!(
            decide_mutation(&claim(id, Some(Role::Instructor)), None),
            AccessDecision::NotFound
        );
        assert_eq!(
            decide_mutation(&claim(id, Some(Role::Admin)), None),
            AccessDecision::NotFound
        );
    }

    #[test]
    fn test_decide_mutation_owner_and_stranger() {
        let owner = Uuid::new_v4();
        assert_eq!(
            decide_mutation(&claim(owner, None), Some(owner)),
            AccessDecision::Allow
        );
        assert_eq!(
            decide_mutation(&claim(Uuid::new_v4(), None), Some(owner)),
            AccessDecision::Deny
        );
        assert!(AccessDecision::Allow.is_allowed());
        assert!(!AccessDecision::NotFound.is_allowed());
    }
}
