//! Owner tools: edit a provider's business profile, manage its workspaces and their
//! blocked dates, and browse its bookings. Administrators act on behalf of the owner.

use axum::{Json, extract::State};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{found, record_audit, status_filter, touched};
use crate::{
    AppState,
    auth::AuthAdmin,
    dto::{
        BlockCreatedResponse, BlockDatesRequest, CreateSpaceRequest, MessageResponse,
        OwnerResponse, SpaceCreatedResponse, UpdateOwnerRequest, UpdateSpaceRequest,
    },
    error::{ApiError, RepoError},
    extract::{ApiJson, ApiPath, ApiQuery},
    models::{
        Booking, NewWorkspace, NewWorkspaceBlock, ProviderProfileUpdate, Workspace,
        WorkspaceUpdate,
    },
    pagination::{Listing, PageRequest},
    repository::{BookingFilter, WorkspaceFilter},
};

const DEFAULT_LIMIT: u32 = 20;

/// OwnerListQuery
///
/// Query parameters of the owner's space and booking listings.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct OwnerListQuery {
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub limit: Option<u32>,
    /// `all` (default) or one status.
    pub status: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn valid_price(price: Option<f64>) -> Result<Option<f64>, ApiError> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(ApiError::bad_request(
            "Price per hour must be a non-negative number",
        )),
        other => Ok(other),
    }
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` day (midnight UTC).
fn parse_block_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|day| day.and_time(NaiveTime::MIN).and_utc())
        })
}

// --- Profile ---

/// get_owner
///
/// [Authenticated Route] The provider record behind an owner account.
#[utoipa::path(
    get,
    path = "/api/owners/{owner_id}",
    params(("owner_id" = Uuid, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Found", body = OwnerResponse),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn get_owner(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(owner_id): ApiPath<Uuid>,
) -> Result<Json<OwnerResponse>, ApiError> {
    let owner = found(state.repo.get_provider(owner_id).await?, "Owner")?;
    Ok(Json(OwnerResponse {
        success: true,
        owner,
    }))
}

/// update_owner
///
/// [Authenticated Route] Partial edit of the business name and contact details. Records
/// `updatedBy`.
#[utoipa::path(
    put,
    path = "/api/owners/{owner_id}",
    params(("owner_id" = Uuid, Path, description = "Provider ID")),
    request_body = UpdateOwnerRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Email already in use"),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn update_owner(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(owner_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateOwnerRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let update = ProviderProfileUpdate {
        business_name: non_empty(payload.business_name),
        email: non_empty(payload.contact_email),
        phone: non_empty(payload.contact_phone),
        actor: admin.id,
    };
    match state.repo.update_provider_profile(owner_id, update).await {
        Ok(updated) => {
            found(updated, "Owner")?;
        }
        Err(RepoError::Conflict(_)) => {
            return Err(ApiError::DuplicateEmail("Email already in use".to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(admin_id = %admin.id, %owner_id, "owner profile updated");
    record_audit(
        &state.repo,
        admin.id,
        "provider.profile_updated",
        "provider",
        Some(owner_id),
        None,
    )
    .await;
    Ok(Json(MessageResponse::ok("Owner profile updated successfully")))
}

// --- Spaces ---

/// create_space
///
/// [Authenticated Route] Adds a workspace for an existing provider. The listing stays
/// `pending` until it is approved through the workspace status route.
#[utoipa::path(
    post,
    path = "/api/owners/spaces",
    request_body = CreateSpaceRequest,
    responses(
        (status = 200, description = "Created", body = SpaceCreatedResponse),
        (status = 400, description = "Missing fields or negative price"),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn create_space(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateSpaceRequest>,
) -> Result<Json<SpaceCreatedResponse>, ApiError> {
    let (Some(owner_id), Some(space_name), Some(location)) = (
        payload.provider_id,
        non_empty(payload.name),
        non_empty(payload.location),
    ) else {
        return Err(ApiError::bad_request(
            "Provider, name and location are required",
        ));
    };
    let price_per_hour = valid_price(payload.price_per_hour)?.unwrap_or(0.0);
    found(state.repo.get_provider(owner_id).await?, "Owner")?;

    let space = state
        .repo
        .create_workspace(NewWorkspace {
            owner_id,
            space_name,
            location,
            price_per_hour,
        })
        .await?;

    tracing::info!(admin_id = %admin.id, %owner_id, space_id = %space.id, "space created");
    record_audit(
        &state.repo,
        admin.id,
        "workspace.created",
        "workspace",
        Some(space.id),
        Some(format!("owner={owner_id}")),
    )
    .await;
    Ok(Json(SpaceCreatedResponse {
        success: true,
        space_id: space.id,
        message: "Space created successfully, pending admin approval".to_string(),
    }))
}

/// list_owner_spaces
///
/// [Authenticated Route] One provider's workspaces, newest first.
#[utoipa::path(
    get,
    path = "/api/owners/{owner_id}/spaces",
    params(("owner_id" = Uuid, Path, description = "Provider ID"), OwnerListQuery),
    responses((status = 200, description = "`{ success, spaces, pagination }`", body = [Workspace]))
)]
pub async fn list_owner_spaces(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(owner_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<OwnerListQuery>,
) -> Result<Json<Listing<Workspace>>, ApiError> {
    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let filter = WorkspaceFilter {
        status: status_filter(query.status.as_deref())?,
        owner_id: Some(owner_id),
    };
    let spaces = state.repo.list_workspaces(&filter, page).await?;
    Ok(Json(Listing::new("spaces", spaces, page)))
}

/// update_space
///
/// [Authenticated Route] Partial edit of name, location and hourly price. Status changes
/// go through the workspace status route instead.
#[utoipa::path(
    put,
    path = "/api/owners/spaces/{space_id}",
    params(("space_id" = Uuid, Path, description = "Workspace ID")),
    request_body = UpdateSpaceRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Negative price"),
        (status = 404, description = "Space not found")
    )
)]
pub async fn update_space(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(space_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateSpaceRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let update = WorkspaceUpdate {
        space_name: non_empty(payload.name),
        location: non_empty(payload.location),
        price_per_hour: valid_price(payload.price_per_hour)?,
    };
    found(state.repo.update_workspace(space_id, update).await?, "Space")?;

    tracing::info!(admin_id = %admin.id, %space_id, "space updated");
    record_audit(
        &state.repo,
        admin.id,
        "workspace.updated",
        "workspace",
        Some(space_id),
        None,
    )
    .await;
    Ok(Json(MessageResponse::ok("Space updated successfully")))
}

/// delete_space
///
/// [Authenticated Route] Removes the workspace and its blocked dates for good. Existing
/// bookings keep their reference and render the workspace as missing.
#[utoipa::path(
    delete,
    path = "/api/owners/spaces/{space_id}",
    params(("space_id" = Uuid, Path, description = "Workspace ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Space not found")
    )
)]
pub async fn delete_space(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(space_id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    touched(state.repo.delete_workspace(space_id).await?, "Space")?;

    tracing::info!(admin_id = %admin.id, %space_id, "space removed");
    record_audit(
        &state.repo,
        admin.id,
        "workspace.removed",
        "workspace",
        Some(space_id),
        None,
    )
    .await;
    Ok(Json(MessageResponse::ok("Space deleted successfully")))
}

// --- Blocked dates ---

/// block_dates
///
/// [Authenticated Route] Marks a date range as unavailable. Both bounds are inclusive.
#[utoipa::path(
    post,
    path = "/api/owners/spaces/{space_id}/blocks",
    params(("space_id" = Uuid, Path, description = "Workspace ID")),
    request_body = BlockDatesRequest,
    responses(
        (status = 200, description = "Blocked", body = BlockCreatedResponse),
        (status = 400, description = "Missing, malformed or reversed dates"),
        (status = 404, description = "Space not found")
    )
)]
pub async fn block_dates(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(space_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<BlockDatesRequest>,
) -> Result<Json<BlockCreatedResponse>, ApiError> {
    let (Some(start), Some(end)) = (non_empty(payload.start_date), non_empty(payload.end_date))
    else {
        return Err(ApiError::bad_request("Start date and end date are required"));
    };
    let (Some(start_date), Some(end_date)) = (parse_block_date(&start), parse_block_date(&end))
    else {
        return Err(ApiError::bad_request("Invalid date format"));
    };
    if end_date < start_date {
        return Err(ApiError::bad_request(
            "End date must not be before start date",
        ));
    }
    found(state.repo.get_workspace(space_id).await?, "Space")?;

    let block = state
        .repo
        .add_workspace_block(NewWorkspaceBlock {
            workspace_id: space_id,
            start_date,
            end_date,
            created_by: admin.id,
        })
        .await?;

    tracing::info!(admin_id = %admin.id, %space_id, block_id = %block.id, "dates blocked");
    record_audit(
        &state.repo,
        admin.id,
        "workspace.dates_blocked",
        "workspace",
        Some(space_id),
        Some(format!("{start_date} .. {end_date}")),
    )
    .await;
    Ok(Json(BlockCreatedResponse {
        success: true,
        block_id: block.id,
        message: "Dates blocked successfully".to_string(),
    }))
}

/// remove_block
///
/// [Authenticated Route] Lifts a blocked range.
#[utoipa::path(
    delete,
    path = "/api/owners/spaces/{space_id}/blocks/{block_id}",
    params(
        ("space_id" = Uuid, Path, description = "Workspace ID"),
        ("block_id" = Uuid, Path, description = "Block ID")
    ),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 404, description = "Block not found")
    )
)]
pub async fn remove_block(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath((space_id, block_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, ApiError> {
    touched(
        state.repo.delete_workspace_block(space_id, block_id).await?,
        "Block",
    )?;

    tracing::info!(admin_id = %admin.id, %space_id, %block_id, "block removed");
    record_audit(
        &state.repo,
        admin.id,
        "workspace.block_removed",
        "workspace",
        Some(space_id),
        Some(format!("block={block_id}")),
    )
    .await;
    Ok(Json(MessageResponse::ok("Block removed successfully")))
}

// --- Bookings ---

/// list_owner_bookings
///
/// [Authenticated Route] Bookings across all of one provider's workspaces, newest first.
#[utoipa::path(
    get,
    path = "/api/owners/{owner_id}/bookings",
    params(("owner_id" = Uuid, Path, description = "Provider ID"), OwnerListQuery),
    responses((status = 200, description = "`{ success, bookings, pagination }`", body = [Booking]))
)]
pub async fn list_owner_bookings(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(owner_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<OwnerListQuery>,
) -> Result<Json<Listing<Booking>>, ApiError> {
    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let filter = BookingFilter {
        status: status_filter(query.status.as_deref())?,
        provider_id: Some(owner_id),
        ..Default::default()
    };
    let bookings = state.repo.list_bookings(&filter, page).await?;
    Ok(Json(Listing::new("bookings", bookings, page)))
}
