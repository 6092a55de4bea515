use axum::{Json, extract::State};
use serde::Deserialize;
use uuid::Uuid;

use super::{found, required_status, status_filter};
use crate::{
    AppState,
    auth::AuthAdmin,
    dto::{MessageResponse, ReasonRequest, WorkspaceDetailResponse, WorkspaceStatusRequest},
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    models::{AccountKind, AccountStatus, OwnerSummary, Workspace, WorkspaceDetail},
    pagination::{Listing, PageRequest},
    repository::{BookingFilter, WorkspaceFilter},
};

const DEFAULT_LIMIT: u32 = 10;
const RECENT_BOOKINGS: u32 = 10;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct WorkspaceQuery {
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub limit: Option<u32>,
    /// `all` (default) or one account status.
    pub status: Option<String>,
}

/// list_workspaces
///
/// [Authenticated Route] Paged workspaces, newest first.
#[utoipa::path(
    get,
    path = "/api/workspaces",
    params(WorkspaceQuery),
    responses((status = 200, description = "`{ success, workspaces, pagination }`", body = [Workspace]))
)]
pub async fn list_workspaces(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<WorkspaceQuery>,
) -> Result<Json<Listing<Workspace>>, ApiError> {
    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let filter = WorkspaceFilter {
        status: status_filter(query.status.as_deref())?,
        ..Default::default()
    };
    let workspaces = state.repo.list_workspaces(&filter, page).await?;
    Ok(Json(Listing::new("workspaces", workspaces, page)))
}

/// get_workspace
///
/// [Authenticated Route] Workspace with its owner summary, latest bookings and blocked
/// date ranges. A missing owner renders as `owner: null`.
#[utoipa::path(
    get,
    path = "/api/workspaces/{id}",
    params(("id" = Uuid, Path, description = "Workspace ID")),
    responses(
        (status = 200, description = "Found", body = WorkspaceDetailResponse),
        (status = 404, description = "Workspace not found")
    )
)]
pub async fn get_workspace(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<WorkspaceDetailResponse>, ApiError> {
    let workspace = found(state.repo.get_workspace(id).await?, "Workspace")?;

    let filter = BookingFilter {
        workspace_id: Some(id),
        ..Default::default()
    };
    let (owner, recent, blocks) = tokio::join!(
        state.repo.get_provider(workspace.owner_id),
        state.repo.list_bookings(
            &filter,
            PageRequest::new(Some(1), Some(RECENT_BOOKINGS), RECENT_BOOKINGS)
        ),
        state.repo.list_workspace_blocks(id),
    );

    Ok(Json(WorkspaceDetailResponse {
        success: true,
        workspace: WorkspaceDetail {
            workspace,
            owner: owner?.map(OwnerSummary::from),
        },
        recent_bookings: recent?.items,
        blocked_dates: blocks?,
    }))
}

/// update_workspace_status
///
/// [Authenticated Route] Approve or reject a listing. Records `reviewedBy`.
#[utoipa::path(
    put,
    path = "/api/workspaces/{id}/status",
    params(("id" = Uuid, Path, description = "Workspace ID")),
    request_body = WorkspaceStatusRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 404, description = "Workspace not found")
    )
)]
pub async fn update_workspace_status(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<WorkspaceStatusRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let status: AccountStatus = required_status(payload.status.as_deref())?;
    super::change_account_status(
        &state.repo,
        AccountKind::Workspace,
        id,
        status,
        payload.rejection_reason,
        admin.id,
    )
    .await?;
    Ok(Json(MessageResponse::ok(format!(
        "Workspace {status} successfully"
    ))))
}

/// delete_workspace
///
/// [Authenticated Route] Soft delete.
#[utoipa::path(
    delete,
    path = "/api/workspaces/{id}",
    params(("id" = Uuid, Path, description = "Workspace ID")),
    request_body(content = ReasonRequest, description = "Optional reason"),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Workspace not found")
    )
)]
pub async fn delete_workspace(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    body: Option<Json<ReasonRequest>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reason = body.and_then(|Json(body)| body.reason);
    super::soft_delete_account(&state.repo, AccountKind::Workspace, id, reason, admin.id).await?;
    Ok(Json(MessageResponse::ok("Workspace deleted successfully")))
}
