use chrono::{Duration, Utc};
use tollgate_auth::{TokenError, TokenService};
use tollgate_config::JwtConfig;
use tollgate_models::Role;
use uuid::Uuid;

const SECRET: &str = "unit-jwt-signing-key-of-a-comfortable-length";

fn service(ttl_seconds: i64) -> TokenService {
    TokenService::new(&JwtConfig::new(SECRET, ttl_seconds).unwrap())
}

#[test]
fn test_issued_token_verifies_to_same_identity_for_all_roles() {
    let tokens = service(3600);

    for role in [None, Some(Role::Student), Some(Role::Instructor), Some(Role::Admin)] {
        let id = Uuid::new_v4();
        let claim = tokens.verify(&tokens.issue_session(id, role).unwrap()).unwrap();
        assert_eq!(claim.sub, id);
        assert_eq!(claim.role, role);
    }
}

#[test]
fn test_expiry_is_issue_time_plus_ttl() {
    let tokens = service(90);
    let before = Utc::now().timestamp();
    let claim = tokens
        .verify(&tokens.issue_session(Uuid::new_v4(), None).unwrap())
        .unwrap();
    let after = Utc::now().timestamp();

    assert!(claim.iat >= before && claim.iat <= after);
    assert_eq!(claim.exp, claim.iat + 90);
    assert_eq!(tokens.default_ttl(), Duration::seconds(90));
}

#[test]
fn test_zero_ttl_token_is_expired() {
    let tokens = service(0);
    let token = tokens.issue_session(Uuid::new_v4(), Some(Role::Student)).unwrap();
    assert!(matches!(tokens.verify(&token), Err(TokenError::Expired)));
}

#[test]
fn test_tampered_signature_is_rejected() {
    let tokens = service(3600);
    let token = tokens.issue_session(Uuid::new_v4(), None).unwrap();

    let (unsigned, signature) = token.rsplit_once('.').unwrap();
    let replacement = if signature.starts_with('A') { "B" } else { "A" };
    let tampered = format!("{unsigned}.{replacement}{}", &signature[1..]);

    assert!(matches!(tokens.verify(&tampered), Err(TokenError::BadSignature)));
}

#[test]
fn test_verify_rejects_token_from_other_key() {
    let other = TokenService::new(
        &JwtConfig::new("a-completely-different-key-with-enough-bytes", 3600).unwrap(),
    );
    let token = other.issue_session(Uuid::new_v4(), None).unwrap();

    assert!(matches!(service(3600).verify(&token), Err(TokenError::BadSignature)));
}

#[test]
fn test_error_reasons() {
    assert_eq!(TokenError::Expired.reason(), "expired");
    assert_eq!(TokenError::Malformed.reason(), "malformed");
    assert_eq!(TokenError::BadSignature.reason(), "bad_signature");
}

#[test]
fn test_placeholder_secret_never_reaches_token_service() {
    assert!(JwtConfig::new("your-secret-key-change-in-production", 3600).is_err());
    assert!(JwtConfig::new("", 3600).is_err());
    assert!(JwtConfig::new("short", 3600).is_err());
}
