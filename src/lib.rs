use axum::{
    Json, Router,
    extract::FromRef,
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod repository;

// Routes grouped by required access (public, authenticated, super admin).
pub mod routes;
use routes::{authenticated, public, superadmin};

// --- Public Re-exports ---

pub use auth::TokenService;
pub use config::AppConfig;
pub use repository::{MemoryRepository, PostgresRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document for the admin API, served at `/api-docs/openapi.json` and browsable
/// through Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::system::health,
        handlers::auth::login, handlers::auth::get_profile, handlers::auth::update_profile,
        handlers::auth::change_password,
        handlers::users::list_users, handlers::users::create_user, handlers::users::get_user,
        handlers::users::update_user_status, handlers::users::delete_user,
        handlers::providers::list_providers, handlers::providers::get_provider,
        handlers::providers::update_provider_status, handlers::providers::delete_provider,
        handlers::workspaces::list_workspaces, handlers::workspaces::get_workspace,
        handlers::workspaces::update_workspace_status, handlers::workspaces::delete_workspace,
        handlers::owners::get_owner, handlers::owners::update_owner,
        handlers::owners::create_space, handlers::owners::list_owner_spaces,
        handlers::owners::update_space, handlers::owners::delete_space,
        handlers::owners::block_dates, handlers::owners::remove_block,
        handlers::owners::list_owner_bookings,
        handlers::bookings::list_bookings, handlers::bookings::get_booking,
        handlers::bookings::cancel_booking,
        handlers::payments::list_payments, handlers::payments::get_payment,
        handlers::payments::create_payment_intent, handlers::payments::payment_webhook,
        handlers::reviews::list_reviews, handlers::reviews::delete_review,
        handlers::reviews::flag_review,
        handlers::notifications::my_notifications, handlers::notifications::list_all_notifications,
        handlers::notifications::mark_read, handlers::notifications::send_notification,
        handlers::notifications::delete_notification,
        handlers::analytics::dashboard_stats, handlers::analytics::revenue,
        handlers::analytics::booking_analytics, handlers::analytics::popular_workspaces,
        handlers::superadmin::list_users, handlers::superadmin::suspend_user,
        handlers::superadmin::unsuspend_user, handlers::superadmin::list_admins,
        handlers::superadmin::get_admin, handlers::superadmin::create_admin,
        handlers::superadmin::update_admin_role, handlers::superadmin::remove_admin,
        handlers::superadmin::audit_logs,
    ),
    components(
        schemas(
            models::AdminRole, models::AccountStatus, models::BookingStatus,
            models::PaymentStatus, models::ReviewStatus, models::RecipientType,
            models::AdminView, models::AdminSummary, models::User, models::Provider,
            models::Workspace, models::Booking, models::Payment, models::Review,
            models::Notification, models::AuditLog, models::UserSummary,
            models::WorkspaceSummary, models::OwnerSummary, models::BookingListItem,
            models::BookingDetail, models::ReviewListItem, models::ProviderListItem,
            models::WorkspaceDetail, models::WorkspaceBlock, pagination::Pagination,
            dto::LoginRequest, dto::UpdateProfileRequest, dto::ChangePasswordRequest,
            dto::CreateUserRequest, dto::StatusUpdateRequest, dto::WorkspaceStatusRequest,
            dto::ReasonRequest, dto::FlagReviewRequest, dto::PaymentIntentRequest,
            dto::SendNotificationRequest, dto::CreateAdminRequest, dto::UpdateRoleRequest,
            dto::MessageResponse, dto::LoginResponse, dto::AdminResponse,
            dto::AdminListResponse, dto::AdminCreatedResponse, dto::UserCreatedResponse,
            dto::UserDetailResponse, dto::ProviderStats, dto::ProviderDetailResponse,
            dto::WorkspaceDetailResponse, dto::BookingDetailResponse, dto::PaymentResponse,
            dto::PaymentIntentResponse, dto::NotificationSentResponse,
            dto::DashboardStatsResponse, dto::RevenuePoint, dto::RevenueResponse,
            dto::BookingAnalyticsResponse, dto::PopularWorkspace,
            dto::PopularWorkspacesResponse, dto::HealthResponse, dto::UpdateOwnerRequest,
            dto::CreateSpaceRequest, dto::UpdateSpaceRequest, dto::BlockDatesRequest,
            dto::OwnerResponse, dto::SpaceCreatedResponse, dto::BlockCreatedResponse,
        )
    ),
    tags(
        (name = "masahatak-admin", description = "Masahatak coworking marketplace back office API")
    )
)]
pub struct ApiDoc;

/// AppState
///
/// Shared, cloneable container of every service a handler may need. Handlers and
/// middleware pull individual parts out through the `FromRef` impls below.
#[derive(Clone)]
pub struct AppState {
    /// Persistence layer, Postgres in production and in-memory in tests.
    pub repo: RepositoryState,
    pub config: AppConfig,
    /// Issues and verifies administrator session tokens.
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(repo: RepositoryState, config: AppConfig) -> Self {
        let tokens = TokenService::from_config(&config);
        Self {
            repo,
            config,
            tokens,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(app_state: &AppState) -> TokenService {
        app_state.tokens.clone()
    }
}

/// CORS for the dashboard SPA: its exact origin, with credentials. An origin that is
/// not a valid header value falls back to any origin without credentials.
fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match HeaderValue::from_str(allowed_origin) {
        Ok(origin) => base.allow_origin(origin).allow_credentials(true),
        Err(e) => {
            tracing::warn!(error = %e, allowed_origin, "invalid FRONTEND_URL, allowing any origin");
            base.allow_origin(Any)
        }
    }
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}

/// create_router
///
/// Assembles every route group, applies the access layers and the observability stack,
/// and registers the application state.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origin);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // `authenticate` is added last on the gated group so it runs before the role gate.
    let api = Router::new()
        .merge(public::public_routes())
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::authenticate,
            )),
        )
        .merge(
            superadmin::superadmin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::authenticate,
            )),
        );

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::system::health))
        .nest("/api", api)
        .fallback(route_not_found)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Opens the `http_request` span for `TraceLayer`, tagged with the `x-request-id` set by
/// `SetRequestIdLayer`, so every log line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
