use axum::Json;

use crate::dto::HealthResponse;

/// health
///
/// [Public Route] Liveness check. Does not touch the database.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Masahatak Admin API is running".to_string(),
    })
}
