#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::{DateTime, Duration, Utc};
use masahatak_admin::{
    AppConfig, AppState, MemoryRepository, TokenService, create_router,
    models::{
        AccountStatus, AdminRecord, AdminRole, Booking, BookingStatus, Provider, Review,
        ReviewStatus, User, Workspace,
    },
    repository::RepositoryState,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

// --- Test Context ---

pub const TEST_PASSWORD: &str = "Admin@123";
pub const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
// bcrypt's minimum work factor keeps the suite fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        bcrypt_cost: TEST_BCRYPT_COST,
        ..AppConfig::default()
    }
}

/// Router over a fresh in-memory store, plus direct handles on the store and the token
/// service for seeding and assertions.
pub struct TestApp {
    pub repo: Arc<MemoryRepository>,
    pub router: Router,
    pub tokens: TokenService,
}

impl TestApp {
    pub fn new() -> Self {
        let repo = Arc::new(MemoryRepository::new());
        let state = AppState::new(repo.clone() as RepositoryState, test_config());
        let tokens = state.tokens.clone();
        Self {
            repo,
            router: create_router(state),
            tokens,
        }
    }

    /// Seeds an administrator whose password is `TEST_PASSWORD`.
    pub async fn seed_admin(&self, email: &str, role: AdminRole) -> AdminRecord {
        let admin = admin_record(email, role);
        self.repo.insert_admin(admin.clone()).await;
        admin
    }

    pub fn token_for(&self, admin: &AdminRecord) -> String {
        self.tokens.issue(admin.id, &admin.email).unwrap()
    }

    /// Seeds an administrator and returns it together with a fresh token.
    pub async fn login_as(&self, email: &str, role: AdminRole) -> (AdminRecord, String) {
        let admin = self.seed_admin(email, role).await;
        let token = self.token_for(&admin);
        (admin, token)
    }

    /// Runs one request through the router and decodes the JSON body (`Null` when empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(request(Method::GET, uri, Some(token), None)).await
    }
}

// --- Request Builders ---

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

// --- Test Data Helpers ---

pub fn admin_record(email: &str, role: AdminRole) -> AdminRecord {
    let now = Utc::now();
    AdminRecord {
        id: Uuid::new_v4(),
        email: email.to_string(),
        full_name: "Test Admin".to_string(),
        password_hash: bcrypt::hash(TEST_PASSWORD, TEST_BCRYPT_COST).unwrap(),
        role,
        status: AccountStatus::Active,
        phone: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn user(email: &str, status: AccountStatus, created_at: DateTime<Utc>) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        full_name: format!("User {email}"),
        phone_number: None,
        status,
        status_reason: None,
        created_by: None,
        updated_by: None,
        deleted_by: None,
        deleted_at: None,
        created_at,
        updated_at: created_at,
    }
}

pub fn provider(business_name: &str, status: AccountStatus) -> Provider {
    let now = Utc::now();
    Provider {
        id: Uuid::new_v4(),
        email: format!("{}@provider.test", business_name.to_lowercase().replace(' ', ".")),
        business_name: business_name.to_string(),
        full_name: "Owner".to_string(),
        phone: None,
        status,
        status_reason: None,
        updated_by: None,
        deleted_by: None,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn workspace(owner_id: Uuid, space_name: &str) -> Workspace {
    let now = Utc::now();
    Workspace {
        id: Uuid::new_v4(),
        owner_id,
        space_name: space_name.to_string(),
        location: "Amman".to_string(),
        price_per_hour: 10.0,
        status: AccountStatus::Active,
        status_reason: None,
        reviewed_by: None,
        deleted_by: None,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn booking(user_id: Uuid, workspace_id: Uuid, status: BookingStatus, amount: f64) -> Booking {
    let now = Utc::now();
    Booking {
        id: Uuid::new_v4(),
        user_id,
        workspace_id,
        provider_id: Uuid::new_v4(),
        booking_plan: "daily".to_string(),
        start_date: now,
        end_date: now + Duration::hours(8),
        total_amount: amount,
        status,
        cancellation_reason: None,
        cancelled_by: None,
        cancelled_at: None,
        created_at: now,
    }
}

pub fn review(user_id: Uuid, workspace_id: Uuid, rating: i32, status: ReviewStatus) -> Review {
    Review {
        id: Uuid::new_v4(),
        user_id,
        workspace_id,
        rating,
        comment: "Nice space".to_string(),
        status,
        flagged: false,
        flag_reason: None,
        flagged_at: None,
        flagged_by: None,
        deletion_reason: None,
        deleted_by: None,
        deleted_at: None,
        created_at: Utc::now(),
    }
}
