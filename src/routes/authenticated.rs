use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Authenticated Router Module
///
/// Every route here is wrapped by `authenticate` in `create_router`, so handlers can take
/// `AuthAdmin` and trust it. Any administrator role is accepted.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // --- Own account ---
        .route(
            "/auth/profile",
            get(handlers::auth::get_profile).put(handlers::auth::update_profile),
        )
        .route("/auth/change-password", put(handlers::auth::change_password))
        // --- Users ---
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::users::get_user).delete(handlers::users::delete_user),
        )
        .route("/users/{id}/status", put(handlers::users::update_user_status))
        // --- Providers ---
        .route("/providers", get(handlers::providers::list_providers))
        .route(
            "/providers/{id}",
            get(handlers::providers::get_provider).delete(handlers::providers::delete_provider),
        )
        .route(
            "/providers/{id}/status",
            put(handlers::providers::update_provider_status),
        )
        // --- Workspaces ---
        .route("/workspaces", get(handlers::workspaces::list_workspaces))
        .route(
            "/workspaces/{id}",
            get(handlers::workspaces::get_workspace)
                .delete(handlers::workspaces::delete_workspace),
        )
        .route(
            "/workspaces/{id}/status",
            put(handlers::workspaces::update_workspace_status),
        )
        // --- Owner tools ---
        // Static `spaces` segments win over `{owner_id}`.
        .route("/owners/spaces", post(handlers::owners::create_space))
        .route(
            "/owners/spaces/{space_id}",
            put(handlers::owners::update_space).delete(handlers::owners::delete_space),
        )
        .route(
            "/owners/spaces/{space_id}/blocks",
            post(handlers::owners::block_dates),
        )
        .route(
            "/owners/spaces/{space_id}/blocks/{block_id}",
            delete(handlers::owners::remove_block),
        )
        .route(
            "/owners/{owner_id}",
            get(handlers::owners::get_owner).put(handlers::owners::update_owner),
        )
        .route(
            "/owners/{owner_id}/spaces",
            get(handlers::owners::list_owner_spaces),
        )
        .route(
            "/owners/{owner_id}/bookings",
            get(handlers::owners::list_owner_bookings),
        )
        // --- Bookings ---
        .route("/bookings", get(handlers::bookings::list_bookings))
        .route("/bookings/{id}", get(handlers::bookings::get_booking))
        .route("/bookings/{id}/cancel", put(handlers::bookings::cancel_booking))
        // --- Payments ---
        // `intent` is a static segment and wins over `{id}`.
        .route("/payments", get(handlers::payments::list_payments))
        .route("/payments/intent", post(handlers::payments::create_payment_intent))
        .route("/payments/{id}", get(handlers::payments::get_payment))
        // --- Reviews ---
        .route("/reviews", get(handlers::reviews::list_reviews))
        .route("/reviews/{id}", delete(handlers::reviews::delete_review))
        .route("/reviews/{id}/flag", put(handlers::reviews::flag_review))
        // --- Notifications ---
        .route("/notifications/me", get(handlers::notifications::my_notifications))
        .route(
            "/notifications/all",
            get(handlers::notifications::list_all_notifications),
        )
        .route(
            "/notifications/send",
            post(handlers::notifications::send_notification),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notifications::delete_notification),
        )
        .route("/notifications/{id}/read", post(handlers::notifications::mark_read))
        // --- Analytics ---
        .route(
            "/analytics/dashboard-stats",
            get(handlers::analytics::dashboard_stats),
        )
        .route("/analytics/revenue", get(handlers::analytics::revenue))
        .route("/analytics/bookings", get(handlers::analytics::booking_analytics))
        .route(
            "/analytics/popular-workspaces",
            get(handlers::analytics::popular_workspaces),
        )
        // --- Super admin console, open to every administrator ---
        .route("/superadmin/users", get(handlers::superadmin::list_users))
        .route(
            "/superadmin/users/{id}/suspend",
            post(handlers::superadmin::suspend_user),
        )
        .route(
            "/superadmin/users/{id}/unsuspend",
            post(handlers::superadmin::unsuspend_user),
        )
        // DELETE on the same path is registered by the gated router; `merge` combines
        // the two method routers.
        .route("/superadmin/admins/{id}", get(handlers::superadmin::get_admin))
}
