#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use tollgate::router::init_router;
use tollgate::state::{AppConfig, AppState};
use tollgate_config::{CorsConfig, HashingConfig, JwtConfig, ServerConfig};
use tollgate_db::MemoryStore;

pub const TEST_SECRET: &str = "integration-test-signing-key-with-plenty-of-bytes";
pub const TEST_TTL_SECONDS: i64 = 3600;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt: JwtConfig::new(TEST_SECRET, TEST_TTL_SECONDS).unwrap(),
        // Minimum cost keeps the suite fast.
        hashing: HashingConfig { cost: 4 },
        cors: CorsConfig::from_list("http://localhost:3000"),
        server: ServerConfig { port: 0 },
    }
}

pub fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(&test_config(), store.clone()).unwrap();

    TestApp {
        router: init_router(state.clone()),
        state,
        store,
    }
}

/// Sends one request and returns the status and the JSON body (`Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

pub fn generate_unique_email() -> String {
    let email: String = SafeEmail().fake();
    format!("{}-{email}", &Uuid::new_v4().simple().to_string()[..8])
}

pub fn fake_name() -> String {
    Name().fake()
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Signs up through the API, logs in, and returns the identity with its token.
pub async fn create_logged_in_user(app: &Router, role: Option<&str>) -> TestUser {
    let email = generate_unique_email();
    let password = "correct-horse-battery".to_string();

    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "email": email,
            "password": password,
            "name": fake_name(),
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    let id: Uuid = serde_json::from_value(body["id"].clone()).unwrap();

    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    let token = body["token"].as_str().unwrap().to_string();

    TestUser {
        id,
        email,
        password,
        token,
    }
}
