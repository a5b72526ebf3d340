//! Integration tests for the login-or-register HTTP surface.
//!
//! Drives the full axum router with an in-memory credential store and a mock
//! profile notifier, so the wire contract (status codes, JSON shapes) is
//! tested without Postgres or a running profile service.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jsonwebtoken::Algorithm;
use serde_json::{json, Value};
use tower::ServiceExt;

use auth_core::domains::auth::TokenService;
use auth_core::kernel::test_dependencies::{InMemoryCredentialStore, MockProfileNotifier};
use auth_core::kernel::ProfileNotifier;
use auth_core::server::{build_app, AppState};

struct TestApp {
    router: Router,
    store: Arc<InMemoryCredentialStore>,
    notifier: Arc<MockProfileNotifier>,
    tokens: Arc<TokenService>,
}

/// Build a test app with the profile collaborator enabled.
fn test_app() -> TestApp {
    let store = Arc::new(InMemoryCredentialStore::new());
    let notifier = Arc::new(MockProfileNotifier::new());
    let tokens = Arc::new(TokenService::new("test_secret_key", Algorithm::HS256, 30));

    let state = AppState {
        store: store.clone(),
        profiles: Some(notifier.clone() as Arc<dyn ProfileNotifier>),
        tokens: tokens.clone(),
    };

    TestApp {
        router: build_app(state),
        store,
        notifier,
        tokens,
    }
}

/// Build a test app without a profile collaborator (local-only variant).
fn test_app_without_profiles() -> TestApp {
    let store = Arc::new(InMemoryCredentialStore::new());
    let notifier = Arc::new(MockProfileNotifier::new());
    let tokens = Arc::new(TokenService::new("test_secret_key", Algorithm::HS256, 30));

    let state = AppState {
        store: store.clone(),
        profiles: None,
        tokens: tokens.clone(),
    };

    TestApp {
        router: build_app(state),
        store,
        notifier,
        tokens,
    }
}

async fn post_login(router: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn root_greets() {
    let app = test_app();
    let (status, body) = get(&app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "Hello": "Auth Service" }));
}

#[tokio::test]
async fn health_reports_healthy_store() {
    let app = test_app();
    let (status, body) = get(&app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn first_login_registers_and_returns_token() {
    let app = test_app();

    let (status, body) = post_login(
        &app.router,
        json!({ "phoneNumber": "+15550001", "name": "Ada" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");

    let claims = app
        .tokens
        .verify(body["access_token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.sub, "1");
    assert_eq!(claims.phone, "+15550001");

    assert_eq!(app.store.len(), 1);
    assert_eq!(app.notifier.call_count(), 1);
    assert_eq!(app.notifier.calls()[0].auth_id, "1");
}

#[tokio::test]
async fn second_login_reuses_identity() {
    let app = test_app();

    post_login(
        &app.router,
        json!({ "phoneNumber": "+15550001", "name": "Ada" }),
    )
    .await;

    let (status, body) = post_login(
        &app.router,
        json!({ "phoneNumber": "+15550001", "name": "ignored", "balance": 99.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let claims = app
        .tokens
        .verify(body["access_token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.sub, "1");
    assert_eq!(claims.name, "Ada");

    assert_eq!(app.store.len(), 1);
    // Only the first call notified the profile service.
    assert_eq!(app.notifier.call_count(), 1);
}

#[tokio::test]
async fn registration_without_name_is_422() {
    let app = test_app();

    let (status, body) = post_login(&app.router, json!({ "phoneNumber": "+15550001" })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("name"));
    assert!(app.store.is_empty());
    assert_eq!(app.notifier.call_count(), 0);
}

#[tokio::test]
async fn empty_phone_is_422() {
    let app = test_app();

    let (status, _) = post_login(
        &app.router,
        json!({ "phoneNumber": "  ", "name": "Ada" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn missing_phone_field_is_rejected() {
    let app = test_app();

    let (status, _) = post_login(&app.router, json!({ "name": "Ada" })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn profile_outage_returns_503_but_keeps_record() {
    let app = test_app();
    app.notifier.set_failing(true);

    let (status, body) = post_login(
        &app.router,
        json!({ "phoneNumber": "+15550001", "name": "Ada" }),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["detail"].as_str().unwrap().contains("try again"));
    // The identity record is already committed and is not rolled back.
    assert_eq!(app.store.len(), 1);

    // A retry finds the record and succeeds even though the profile service
    // is still down.
    let (status, body) = post_login(
        &app.router,
        json!({ "phoneNumber": "+15550001", "name": "Ada" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let claims = app
        .tokens
        .verify(body["access_token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.sub, "1");
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn registration_works_without_profile_collaborator() {
    let app = test_app_without_profiles();

    let (status, body) = post_login(
        &app.router,
        json!({ "phoneNumber": "+15550001", "name": "Ada" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(app.store.len(), 1);
    assert_eq!(app.notifier.call_count(), 0);
}

#[tokio::test]
async fn concurrent_registrations_share_one_identity() {
    let app = test_app_without_profiles();

    let attempts = (0..8).map(|_| {
        post_login(
            &app.router,
            json!({ "phoneNumber": "+15550001", "name": "Ada" }),
        )
    });
    let results = futures::future::join_all(attempts).await;

    assert_eq!(app.store.len(), 1);
    for (status, body) in results {
        assert_eq!(status, StatusCode::OK);
        let claims = app
            .tokens
            .verify(body["access_token"].as_str().unwrap())
            .unwrap();
        assert_eq!(claims.sub, "1");
    }
}
