use tollgate_auth::access::{
    can_mutate, can_perform_role_action, decide_mutation, decide_role_action,
};
use tollgate_auth::{AccessDecision, SessionClaim};
use tollgate_models::Role;
use uuid::Uuid;

const ROLES: [Option<Role>; 4] = [None, Some(Role::Student), Some(Role::Instructor), Some(Role::Admin)];

fn claim(sub: Uuid, role: Option<Role>) -> SessionClaim {
    SessionClaim {
        sub,
        role,
        iat: 0,
        exp: i64::MAX,
    }
}

#[test]
fn test_can_mutate_is_id_equality() {
    for _ in 0..64 {
        let caller = Uuid::new_v4();
        let owner = Uuid::new_v4();
        for role in ROLES {
            let claim = claim(caller, role);
            assert!(can_mutate(&claim, caller));
            assert!(!can_mutate(&claim, owner));
            assert_eq!(decide_mutation(&claim, Some(caller)), AccessDecision::Allow);
            assert_eq!(decide_mutation(&claim, Some(owner)), AccessDecision::Deny);
        }
    }
}

#[test]
fn test_missing_owner_is_not_found_never_deny() {
    for role in ROLES {
        assert_eq!(
            decide_mutation(&claim(Uuid::new_v4(), role), None),
            AccessDecision::NotFound
        );
    }
}

#[test]
fn test_role_action_requires_exact_match() {
    let required_roles = [Role::Student, Role::Instructor, Role::Admin];

    for role in ROLES {
        let claim = claim(Uuid::new_v4(), role);
        for required in required_roles {
            let expected = role == Some(required);
            assert_eq!(can_perform_role_action(&claim, required), expected);
            assert_eq!(
                decide_role_action(&claim, required).is_allowed(),
                expected,
                "{role:?} vs {required:?}"
            );
        }
    }
}
