mod common;

use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use chrono::{Duration, Utc};
use common::{TEST_PASSWORD, TestApp, request};
use masahatak_admin::{
    TokenService,
    auth::{TokenError, bearer_token, hash_password, verify_password},
    models::AdminRole,
    repository::Repository,
};
use serde_json::json;
use uuid::Uuid;

const SECRET: &str = "token-service-test-secret";

// --- Token Service ---

#[test]
fn test_token_roundtrip_carries_identity() {
    let tokens = TokenService::new(SECRET);
    let admin_id = Uuid::new_v4();

    let token = tokens.issue(admin_id, "ops@masahatak.com").unwrap();
    let claims = tokens.verify(&token).unwrap();

    assert_eq!(claims.sub, admin_id);
    assert_eq!(claims.email, "ops@masahatak.com");
    assert_eq!(claims.exp - claims.iat, 24 * 3600);
}

#[test]
fn test_token_signed_with_other_secret_is_invalid() {
    let issuer = TokenService::new("some-other-secret");
    let verifier = TokenService::new(SECRET);

    let token = issuer.issue(Uuid::new_v4(), "a@b.c").unwrap();
    assert_eq!(verifier.verify(&token), Err(TokenError::Invalid));
}

#[test]
fn test_token_past_24_hours_is_expired() {
    let tokens = TokenService::new(SECRET);
    let issued_at = Utc::now() - Duration::hours(25);

    let token = tokens.issue_at(Uuid::new_v4(), "a@b.c", issued_at).unwrap();
    assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
}

#[test]
fn test_token_still_valid_just_before_expiry() {
    let tokens = TokenService::new(SECRET);
    let issued_at = Utc::now() - Duration::hours(23);

    let token = tokens.issue_at(Uuid::new_v4(), "a@b.c", issued_at).unwrap();
    assert!(tokens.verify(&token).is_ok());
}

#[test]
fn test_garbage_token_is_invalid() {
    let tokens = TokenService::new(SECRET);
    assert_eq!(tokens.verify("not.a.jwt"), Err(TokenError::Invalid));
    assert_eq!(tokens.verify(""), Err(TokenError::Invalid));
}

#[test]
fn test_bearer_token_parsing() {
    let mut headers = HeaderMap::new();
    assert_eq!(bearer_token(&headers), None);

    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
    assert_eq!(bearer_token(&headers), Some("abc.def"));

    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
    assert_eq!(bearer_token(&headers), None);

    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
    assert_eq!(bearer_token(&headers), None);
}

#[tokio::test]
async fn test_password_hash_roundtrip() {
    let hash = hash_password("s3cret!", 4).await.unwrap();
    assert!(verify_password("s3cret!", &hash).await.unwrap());
    assert!(!verify_password("wrong", &hash).await.unwrap());
    // An unparseable stored hash is a mismatch, not an error.
    assert!(!verify_password("s3cret!", "not-a-bcrypt-hash").await.unwrap());
}

// --- Login ---

#[tokio::test]
async fn test_login_then_protected_route_succeeds() {
    let app = TestApp::new();
    let admin = app.seed_admin("admin@masahatak.com", AdminRole::SuperAdmin).await;

    let (status, body) = app
        .send(request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "admin@masahatak.com", "password": TEST_PASSWORD })),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["admin"]["id"], admin.id.to_string());
    assert_eq!(body["admin"]["fullName"], "Test Admin");
    assert_eq!(body["admin"]["role"], "super_admin");
    assert!(body["admin"].get("passwordHash").is_none());

    let token = body["token"].as_str().unwrap().to_string();
    let (status, profile) = app.get("/api/auth/profile", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["admin"]["email"], "admin@masahatak.com");
}

#[tokio::test]
async fn test_login_rejects_wrong_password_and_unknown_email_alike() {
    let app = TestApp::new();
    app.seed_admin("admin@masahatak.com", AdminRole::Admin).await;

    for (email, password) in [
        ("admin@masahatak.com", "wrong-password"),
        ("nobody@masahatak.com", TEST_PASSWORD),
    ] {
        let (status, body) = app
            .send(request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            ))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
    }
}

// --- Authentication Middleware ---

#[tokio::test]
async fn test_missing_token_is_401() {
    let app = TestApp::new();
    let (status, body) = app
        .send(request(Method::GET, "/api/users", None, None))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "No authentication token provided");
}

#[tokio::test]
async fn test_expired_and_forged_tokens_get_the_same_401() {
    let app = TestApp::new();
    let admin = app.seed_admin("admin@masahatak.com", AdminRole::Admin).await;

    let expired = app
        .tokens
        .issue_at(admin.id, &admin.email, Utc::now() - Duration::hours(25))
        .unwrap();
    let forged = TokenService::new("attacker-secret")
        .issue(admin.id, &admin.email)
        .unwrap();

    for token in [expired, forged, "garbage".to_string()] {
        let (status, body) = app.get("/api/users", &token).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid or expired token");
    }
}

#[tokio::test]
async fn test_token_of_deleted_admin_is_403() {
    let app = TestApp::new();
    let (admin, token) = app.login_as("gone@masahatak.com", AdminRole::SuperAdmin).await;

    assert_eq!(app.get("/api/users", &token).await.0, StatusCode::OK);

    app.repo.delete_admin(admin.id).await.unwrap();

    let (status, body) = app.get("/api/users", &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied. Admin privileges required.");
}

#[tokio::test]
async fn test_role_is_reread_on_every_request() {
    let app = TestApp::new();
    let (admin, token) = app.login_as("promoted@masahatak.com", AdminRole::Admin).await;

    assert_eq!(
        app.get("/api/superadmin/admins", &token).await.0,
        StatusCode::FORBIDDEN
    );

    app.repo
        .update_admin_role(admin.id, AdminRole::SuperAdmin)
        .await
        .unwrap();

    // Same token, new role.
    assert_eq!(
        app.get("/api/superadmin/admins", &token).await.0,
        StatusCode::OK
    );
}

// --- Role Gate ---

#[tokio::test]
async fn test_plain_admin_is_refused_on_every_gated_route() {
    let app = TestApp::new();
    let (_, token) = app.login_as("admin@masahatak.com", AdminRole::Admin).await;
    let other = app.seed_admin("other@masahatak.com", AdminRole::Admin).await;

    let gated = [
        (Method::GET, "/api/superadmin/admins".to_string(), None),
        (
            Method::POST,
            "/api/superadmin/admins".to_string(),
            Some(json!({ "email": "x@y.z", "fullName": "X", "password": "secret1" })),
        ),
        (
            Method::PUT,
            format!("/api/superadmin/admins/{}/role", other.id),
            Some(json!({ "role": "super_admin" })),
        ),
        (Method::DELETE, format!("/api/superadmin/admins/{}", other.id), None),
        (Method::GET, "/api/superadmin/audit-logs".to_string(), None),
    ];

    for (method, uri, body) in gated {
        let (status, body) = app.send(request(method, &uri, Some(&token), body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body["error"], "Access denied. Super admin privileges required.");
    }

    // The refused removal left the target in place.
    assert!(app.repo.get_admin(other.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_admin_detail_is_open_to_plain_admins() {
    let app = TestApp::new();
    let (_, token) = app.login_as("admin@masahatak.com", AdminRole::Admin).await;
    let other = app.seed_admin("other@masahatak.com", AdminRole::SuperAdmin).await;

    let (status, body) = app
        .get(&format!("/api/superadmin/admins/{}", other.id), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"]["role"], "super_admin");
}

#[tokio::test]
async fn test_gated_route_without_token_is_401_not_403() {
    let app = TestApp::new();
    let (status, _) = app
        .send(request(Method::GET, "/api/superadmin/audit-logs", None, None))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// --- Public Routes ---

#[tokio::test]
async fn test_health_and_webhook_need_no_token() {
    let app = TestApp::new();

    let (status, body) = app.send(request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");

    let (status, _) = app
        .send(request(
            Method::POST,
            "/api/payments/webhook/stripe",
            None,
            Some(json!({ "event": "payment_intent.succeeded" })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let stored = app.repo.webhook_payloads().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].0, "stripe");
    assert_eq!(stored[0].1["event"], "payment_intent.succeeded");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new();
    let (status, body) = app
        .send(request(Method::GET, "/api/does-not-exist", None, None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}
