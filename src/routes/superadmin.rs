use crate::{AppState, auth::require_super_admin, handlers};
use axum::{
    Router,
    middleware,
    routing::{delete, get, put},
};

/// Super Admin Router Module
///
/// Administrator management and the audit trail. The role gate is applied here;
/// `create_router` adds `authenticate` outside of it, so the gate always sees an identity.
pub fn superadmin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/superadmin/admins",
            get(handlers::superadmin::list_admins).post(handlers::superadmin::create_admin),
        )
        .route(
            "/superadmin/admins/{id}",
            delete(handlers::superadmin::remove_admin),
        )
        .route(
            "/superadmin/admins/{id}/role",
            put(handlers::superadmin::update_admin_role),
        )
        .route("/superadmin/audit-logs", get(handlers::superadmin::audit_logs))
        .route_layer(middleware::from_fn(require_super_admin))
}
