use crate::{AppState, handlers};
use axum::{Router, routing::post};

/// Public Router Module
///
/// Mounted under `/api` without any authentication layer. Handlers here never see an
/// `AuthAdmin`.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // POST /api/auth/login
        // Exchanges email and password for a 24 hour session token.
        .route("/auth/login", post(handlers::auth::login))
        // POST /api/payments/webhook/{provider}
        // Callback target for payment providers. They cannot hold an admin token.
        .route(
            "/payments/webhook/{provider}",
            post(handlers::payments::payment_webhook),
        )
}
