use axum::{Json, extract::State};
use serde::Deserialize;
use uuid::Uuid;

use super::{found, status_filter};
use crate::{
    AppState,
    auth::AuthAdmin,
    dto::{MessageResponse, PaymentIntentRequest, PaymentIntentResponse, PaymentResponse},
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    models::{NewPayment, Payment},
    pagination::{Listing, PageRequest},
    repository::PaymentFilter,
};

const DEFAULT_LIMIT: u32 = 20;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct PaymentQuery {
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub limit: Option<u32>,
    /// `all` (default) or one payment status.
    pub status: Option<String>,
}

/// list_payments
///
/// [Authenticated Route] Paged payments, newest first.
#[utoipa::path(
    get,
    path = "/api/payments",
    params(PaymentQuery),
    responses((status = 200, description = "`{ success, payments, pagination }`", body = [Payment]))
)]
pub async fn list_payments(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PaymentQuery>,
) -> Result<Json<Listing<Payment>>, ApiError> {
    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let filter = PaymentFilter {
        status: status_filter(query.status.as_deref())?,
    };
    let payments = state.repo.list_payments(&filter, page).await?;
    Ok(Json(Listing::new("payments", payments, page)))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Found", body = PaymentResponse),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn get_payment(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment = found(state.repo.get_payment(id).await?, "Payment")?;
    Ok(Json(PaymentResponse {
        success: true,
        payment,
    }))
}

/// create_payment_intent
///
/// [Authenticated Route] Opens a `pending` payment for a booking's total, split between
/// the platform fee and the provider's share. No payment provider is contacted.
#[utoipa::path(
    post,
    path = "/api/payments/intent",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Intent created", body = PaymentIntentResponse),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn create_payment_intent(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, ApiError> {
    let booking = found(state.repo.get_booking(payload.booking_id).await?, "Booking")?;
    let payment = state
        .repo
        .create_payment(NewPayment {
            booking_id: booking.id,
            user_id: booking.user_id,
            provider_id: booking.provider_id,
            amount: booking.total_amount,
        })
        .await?;

    tracing::info!(
        admin_id = %admin.id,
        booking_id = %booking.id,
        payment_id = %payment.id,
        amount = payment.amount,
        "payment intent created"
    );
    Ok(Json(PaymentIntentResponse {
        success: true,
        payment_id: payment.id,
        message: "Payment intent created successfully".to_string(),
    }))
}

/// payment_webhook
///
/// [Public Route] Stores a payment provider callback verbatim. Processing is out of
/// scope: the payload is only logged for later reconciliation.
#[utoipa::path(
    post,
    path = "/api/payments/webhook/{provider}",
    params(("provider" = String, Path, description = "Payment provider name")),
    request_body(content = String, description = "Raw provider payload", content_type = "application/json"),
    responses((status = 200, description = "Stored", body = MessageResponse))
)]
pub async fn payment_webhook(
    State(state): State<AppState>,
    ApiPath(provider): ApiPath<String>,
    ApiJson(payload): ApiJson<serde_json::Value>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = state.repo.record_payment_webhook(&provider, payload).await?;
    tracing::info!(%provider, webhook_id = %id, "payment webhook stored");
    Ok(Json(MessageResponse::ok("Webhook processed successfully")))
}
