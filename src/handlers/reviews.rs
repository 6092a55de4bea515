use axum::{Json, extract::State};
use futures::future::try_join_all;
use serde::Deserialize;
use uuid::Uuid;

use super::{record_audit, status_filter, touched};
use crate::{
    AppState,
    auth::AuthAdmin,
    dto::{FlagReviewRequest, MessageResponse, ReasonRequest},
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    models::{Review, ReviewListItem, UserSummary, WorkspaceSummary},
    pagination::{Listing, PageRequest, Paged},
    repository::{RepositoryState, ReviewFilter},
};

const DEFAULT_LIMIT: u32 = 10;
const DEFAULT_DELETE_REASON: &str = "Content violation";

/// ReviewQuery
///
/// Query parameters of `GET /reviews`. Ratings accept `all` like the status filter.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub limit: Option<u32>,
    /// `all` (default, excludes deleted reviews), `active` or `deleted`.
    pub status: Option<String>,
    /// Exact star rating.
    pub rating: Option<String>,
    pub min_rating: Option<String>,
    pub max_rating: Option<String>,
}

fn rating_param(raw: Option<&str>, name: &str) -> Result<Option<i32>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ApiError::bad_request(format!("Invalid {name} '{value}'"))),
    }
}

impl ReviewQuery {
    pub(crate) fn filter(&self) -> Result<ReviewFilter, ApiError> {
        Ok(ReviewFilter {
            status: status_filter(self.status.as_deref())?,
            rating: rating_param(self.rating.as_deref(), "rating")?,
            min_rating: rating_param(self.min_rating.as_deref(), "minRating")?,
            max_rating: rating_param(self.max_rating.as_deref(), "maxRating")?,
        })
    }
}

async fn enrich(repo: &RepositoryState, review: Review) -> Result<ReviewListItem, ApiError> {
    let (user, workspace) = tokio::try_join!(
        repo.get_user(review.user_id),
        repo.get_workspace(review.workspace_id)
    )?;
    Ok(ReviewListItem {
        review,
        user: user.map(UserSummary::from),
        workspace: workspace.map(WorkspaceSummary::from),
    })
}

/// list_reviews
///
/// [Authenticated Route] Paged reviews, newest first, each with its author and workspace.
#[utoipa::path(
    get,
    path = "/api/reviews",
    params(ReviewQuery),
    responses(
        (status = 200, description = "`{ success, reviews, pagination }`", body = [ReviewListItem]),
        (status = 400, description = "Unknown status or non-numeric rating")
    )
)]
pub async fn list_reviews(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReviewQuery>,
) -> Result<Json<Listing<ReviewListItem>>, ApiError> {
    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let reviews = state.repo.list_reviews(&query.filter()?, page).await?;

    let total = reviews.total;
    let items = try_join_all(
        reviews
            .items
            .into_iter()
            .map(|review| enrich(&state.repo, review)),
    )
    .await?;

    Ok(Json(Listing::new("reviews", Paged { items, total }, page)))
}

/// delete_review
///
/// [Authenticated Route] Soft delete with a moderation reason.
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    request_body(content = ReasonRequest, description = "Optional reason"),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    body: Option<Json<ReasonRequest>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reason = body
        .and_then(|Json(body)| body.reason)
        .filter(|reason| !reason.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DELETE_REASON.to_string());

    touched(
        state.repo.soft_delete_review(id, reason.clone(), admin.id).await?,
        "Review",
    )?;

    tracing::info!(admin_id = %admin.id, review_id = %id, "review deleted");
    record_audit(
        &state.repo,
        admin.id,
        "review.deleted",
        "review",
        Some(id),
        Some(reason),
    )
    .await;
    Ok(Json(MessageResponse::ok("Review deleted successfully")))
}

/// flag_review
///
/// [Authenticated Route] Sets or clears the moderation flag.
#[utoipa::path(
    put,
    path = "/api/reviews/{id}/flag",
    params(("id" = Uuid, Path, description = "Review ID")),
    request_body = FlagReviewRequest,
    responses(
        (status = 200, description = "Flag updated", body = MessageResponse),
        (status = 404, description = "Review not found")
    )
)]
pub async fn flag_review(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<FlagReviewRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reason = payload.reason.filter(|reason| !reason.trim().is_empty());
    touched(
        state
            .repo
            .flag_review(id, payload.flag, reason.clone(), admin.id)
            .await?,
        "Review",
    )?;

    let (action, message) = if payload.flag {
        ("review.flagged", "Review flagged successfully")
    } else {
        ("review.unflagged", "Review unflagged successfully")
    };
    tracing::info!(admin_id = %admin.id, review_id = %id, flag = payload.flag, "review flag updated");
    record_audit(&state.repo, admin.id, action, "review", Some(id), reason).await;
    Ok(Json(MessageResponse::ok(message)))
}
