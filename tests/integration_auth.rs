mod common;

use axum::http::{Method, StatusCode};
use chrono::Duration;
use serde_json::json;
use uuid::Uuid;

use common::{
    TEST_TTL_SECONDS, create_logged_in_user, fake_name, generate_unique_email, send,
    setup_test_app,
};
use tollgate_auth::TokenService;
use tollgate_config::JwtConfig;
use tollgate_models::Role;

#[tokio::test]
async fn test_signup_login_authenticate_scenario() {
    let app = setup_test_app();

    let signup = json!({ "email": "a@x.com", "password": "p1", "name": "A" });

    let (status, body) = send(&app.router, Method::POST, "/api/auth/signup", None, Some(signup.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id: Uuid = serde_json::from_value(body["id"].clone()).unwrap();

    let (status, body) = send(&app.router, Method::POST, "/api/auth/signup", None, Some(signup)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "duplicate_email");

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "p1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], TEST_TTL_SECONDS);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app.router, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.to_string());
    assert!(body["role"].is_null());

    let claim = app.state.auth.authenticate(Some(&format!("Bearer {token}"))).unwrap();
    assert_eq!(claim.sub, id);
    assert!(!app.state.access.authorize_role_action(&claim, Role::Instructor).is_allowed());
}

#[tokio::test]
async fn test_signup_with_role_is_carried_into_token() {
    let app = setup_test_app();
    let user = create_logged_in_user(&app.router, Some("INSTRUCTOR")).await;

    let (status, body) = send(&app.router, Method::GET, "/api/auth/me", Some(&user.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "INSTRUCTOR");
    assert_eq!(body["id"], user.id.to_string());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = setup_test_app();
    let user = create_logged_in_user(&app.router, None).await;

    let wrong_password = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": user.email, "password": "not-the-password" })),
    )
    .await;

    let unknown_email = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": generate_unique_email(), "password": "not-the-password" })),
    )
    .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password.1["code"], "invalid_credentials");
}

#[tokio::test]
async fn test_email_match_is_case_sensitive() {
    let app = setup_test_app();
    let user = create_logged_in_user(&app.router, None).await;

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": user.email.to_uppercase(), "password": user.password })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_signups_yield_one_success() {
    let app = setup_test_app();
    let email = generate_unique_email();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let router = app.router.clone();
        let body = json!({ "email": email, "password": "p1", "name": fake_name() });
        handles.push(tokio::spawn(async move {
            send(&router, Method::POST, "/api/auth/signup", None, Some(body)).await.0
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(app.store.identity_count().await, 1);
}

#[tokio::test]
async fn test_signup_rejects_admin_role() {
    let app = setup_test_app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "email": generate_unique_email(),
            "password": "p1",
            "name": "Mallory",
            "role": "ADMIN",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "validation_error");
    assert_eq!(app.store.identity_count().await, 0);
}

#[tokio::test]
async fn test_signup_validation_errors() {
    let app = setup_test_app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": generate_unique_email(), "name": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password is required");

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": "not-an-email", "password": "p1", "name": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": generate_unique_email(), "password": "", "name": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(app.store.identity_count().await, 0);
}

#[tokio::test]
async fn test_missing_credential_is_distinct_from_invalid_token() {
    let app = setup_test_app();

    let (status, body) = send(&app.router, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "missing_credential");

    let (status, body) =
        send(&app.router, Method::GET, "/api/auth/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_token");
}

#[tokio::test]
async fn test_forged_and_malformed_tokens_look_the_same() {
    let app = setup_test_app();

    let other_key = JwtConfig::new("some-other-signing-key-also-long-enough-000", 3600).unwrap();
    let forged = TokenService::new(&other_key)
        .issue_session(Uuid::new_v4(), Some(Role::Admin))
        .unwrap();

    let forged_response = send(&app.router, Method::GET, "/api/auth/me", Some(&forged), None).await;
    let garbage_response =
        send(&app.router, Method::GET, "/api/auth/me", Some("a.b.c"), None).await;

    assert_eq!(forged_response.0, StatusCode::UNAUTHORIZED);
    assert_eq!(forged_response, garbage_response);
}

#[tokio::test]
async fn test_expired_token_is_reported_as_expired() {
    let app = setup_test_app();
    let token = app
        .state
        .auth
        .tokens()
        .issue(Uuid::new_v4(), Some(Role::Student), Duration::zero())
        .unwrap();

    let (status, body) = send(&app.router, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "token_expired");
}

#[tokio::test]
async fn test_store_failure_is_opaque() {
    let app = setup_test_app();
    app.store.set_unavailable(true);

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": generate_unique_email(), "password": "p1", "name": "A" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Internal server error", "code": "internal_error" })
    );
}

#[tokio::test]
async fn test_login_rejects_password_extending_stored_one() {
    let app = setup_test_app();
    let email = generate_unique_email();
    let password = "p".repeat(72);

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": email, "password": password, "name": fake_name() })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": format!("{password}-not-my-password") })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_credentials");

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_signup_trims_padded_email_and_name() {
    let app = setup_test_app();
    let email = generate_unique_email();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": format!("  {email} "), "password": "p1", "name": "  Ada  " })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "p1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
