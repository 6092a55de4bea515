use axum::{Json, extract::State};
use chrono::{Days, NaiveDate, NaiveTime};
use futures::future::try_join_all;
use serde::Deserialize;
use uuid::Uuid;

use super::{found, status_filter, touched};
use crate::{
    AppState,
    auth::AuthAdmin,
    dto::{BookingDetailResponse, MessageResponse, ReasonRequest},
    error::ApiError,
    extract::{ApiPath, ApiQuery},
    models::{Booking, BookingDetail, BookingListItem, UserSummary, WorkspaceSummary},
    pagination::{Listing, PageRequest, Paged},
    repository::{BookingFilter, RepositoryState},
};

const DEFAULT_LIMIT: u32 = 10;
const DEFAULT_CANCEL_REASON: &str = "Cancelled by admin";

/// BookingQuery
///
/// Query parameters of `GET /bookings`. Both dates are calendar days (`YYYY-MM-DD`, UTC)
/// and both bounds are inclusive.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub limit: Option<u32>,
    /// `all` (default) or one booking status.
    pub status: Option<String>,
    /// Earliest start day.
    pub start_date: Option<NaiveDate>,
    /// Latest start day.
    pub end_date: Option<NaiveDate>,
}

impl BookingQuery {
    pub(crate) fn filter(&self) -> Result<BookingFilter, ApiError> {
        let midnight = |day: NaiveDate| day.and_time(NaiveTime::MIN).and_utc();
        Ok(BookingFilter {
            status: status_filter(self.status.as_deref())?,
            start_from: self.start_date.map(midnight),
            // The end day is included whole: the bound is the following midnight.
            start_before: self
                .end_date
                .and_then(|day| day.checked_add_days(Days::new(1)))
                .map(midnight),
            ..Default::default()
        })
    }
}

async fn enrich(
    repo: &RepositoryState,
    booking: Booking,
) -> Result<BookingListItem, ApiError> {
    let (user, workspace) = tokio::try_join!(
        repo.get_user(booking.user_id),
        repo.get_workspace(booking.workspace_id)
    )?;
    Ok(BookingListItem {
        booking,
        user: user.map(UserSummary::from),
        workspace: workspace.map(WorkspaceSummary::from),
    })
}

/// list_bookings
///
/// [Authenticated Route] Paged bookings, newest first. Each row carries a user and a
/// workspace summary, or `null` where the referenced document no longer exists.
#[utoipa::path(
    get,
    path = "/api/bookings",
    params(BookingQuery),
    responses((status = 200, description = "`{ success, bookings, pagination }`", body = [BookingListItem]))
)]
pub async fn list_bookings(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BookingQuery>,
) -> Result<Json<Listing<BookingListItem>>, ApiError> {
    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let bookings = state.repo.list_bookings(&query.filter()?, page).await?;

    let total = bookings.total;
    let items = try_join_all(
        bookings
            .items
            .into_iter()
            .map(|booking| enrich(&state.repo, booking)),
    )
    .await?;

    Ok(Json(Listing::new("bookings", Paged { items, total }, page)))
}

/// get_booking
///
/// [Authenticated Route] Booking with the full user, workspace and payment documents.
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Found", body = BookingDetailResponse),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<BookingDetailResponse>, ApiError> {
    let booking = found(state.repo.get_booking(id).await?, "Booking")?;
    let (user, workspace, payment) = tokio::try_join!(
        state.repo.get_user(booking.user_id),
        state.repo.get_workspace(booking.workspace_id),
        state.repo.find_payment_by_booking(id),
    )?;

    Ok(Json(BookingDetailResponse {
        success: true,
        booking: BookingDetail {
            booking,
            user,
            workspace,
            payment,
        },
    }))
}

/// cancel_booking
///
/// [Authenticated Route] Cancels a booking and records who cancelled it.
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/cancel",
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body(content = ReasonRequest, description = "Optional reason"),
    responses(
        (status = 200, description = "Cancelled", body = MessageResponse),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    body: Option<Json<ReasonRequest>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reason = body
        .and_then(|Json(body)| body.reason)
        .filter(|reason| !reason.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CANCEL_REASON.to_string());

    touched(
        state.repo.cancel_booking(id, reason.clone(), admin.id).await?,
        "Booking",
    )?;

    tracing::info!(admin_id = %admin.id, booking_id = %id, "booking cancelled");
    super::record_audit(
        &state.repo,
        admin.id,
        "booking.cancelled",
        "booking",
        Some(id),
        Some(reason),
    )
    .await;
    Ok(Json(MessageResponse::ok("Booking cancelled successfully")))
}
