use axum::{Json, extract::State};
use futures::future::try_join_all;
use serde::Deserialize;
use uuid::Uuid;

use super::{found, required_status, status_filter};
use crate::{
    AppState,
    auth::AuthAdmin,
    dto::{MessageResponse, ProviderDetailResponse, ProviderStats, ReasonRequest, StatusUpdateRequest},
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    models::{AccountKind, AccountStatus, BookingStatus, ProviderListItem},
    pagination::{Listing, PageRequest},
    repository::{BookingFilter, ProviderFilter, WorkspaceFilter},
};

const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ProviderQuery {
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub limit: Option<u32>,
    /// `all` (default) or one account status.
    pub status: Option<String>,
}

/// list_providers
///
/// [Authenticated Route] Paged providers, each with the number of workspaces they own.
#[utoipa::path(
    get,
    path = "/api/providers",
    params(ProviderQuery),
    responses((status = 200, description = "`{ success, providers, pagination }`", body = [ProviderListItem]))
)]
pub async fn list_providers(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProviderQuery>,
) -> Result<Json<Listing<ProviderListItem>>, ApiError> {
    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let filter = ProviderFilter {
        status: status_filter(query.status.as_deref())?,
    };
    let providers = state.repo.list_providers(&filter, page).await?;

    // Counts are fetched concurrently, only for the rows on this page.
    let counts = try_join_all(
        providers
            .items
            .iter()
            .map(|p| state.repo.count_workspaces_by_owner(p.id)),
    )
    .await?;

    let mut counts = counts.into_iter();
    let providers = providers.map(|provider| ProviderListItem {
        provider,
        workspace_count: counts.next().unwrap_or_default(),
    });
    Ok(Json(Listing::new("providers", providers, page)))
}

/// get_provider
///
/// [Authenticated Route] Provider, their workspaces, and totals over completed bookings.
#[utoipa::path(
    get,
    path = "/api/providers/{id}",
    params(("id" = Uuid, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Found", body = ProviderDetailResponse),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn get_provider(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ProviderDetailResponse>, ApiError> {
    let provider = found(state.repo.get_provider(id).await?, "Provider")?;
    let owned = WorkspaceFilter {
        owner_id: Some(id),
        ..Default::default()
    };
    let workspaces = state
        .repo
        .list_workspaces(&owned, PageRequest::all())
        .await?
        .items;

    let completed = try_join_all(workspaces.iter().map(|workspace| {
        let filter = BookingFilter {
            workspace_id: Some(workspace.id),
            status: Some(BookingStatus::Completed),
            ..Default::default()
        };
        let repo = state.repo.clone();
        async move { repo.list_bookings(&filter, PageRequest::all()).await }
    }))
    .await?;

    let stats = completed.iter().flat_map(|page| page.items.iter()).fold(
        ProviderStats {
            total_workspaces: workspaces.len() as u64,
            ..Default::default()
        },
        |mut stats, booking| {
            stats.total_bookings += 1;
            stats.total_revenue += booking.total_amount;
            stats
        },
    );

    Ok(Json(ProviderDetailResponse {
        success: true,
        provider,
        workspaces,
        stats,
    }))
}

/// update_provider_status
///
/// [Authenticated Route] Approve, suspend or reject a provider. Records `updatedBy`.
#[utoipa::path(
    put,
    path = "/api/providers/{id}/status",
    params(("id" = Uuid, Path, description = "Provider ID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn update_provider_status(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<StatusUpdateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let status: AccountStatus = required_status(payload.status.as_deref())?;
    super::change_account_status(
        &state.repo,
        AccountKind::Provider,
        id,
        status,
        payload.reason,
        admin.id,
    )
    .await?;
    Ok(Json(MessageResponse::ok(format!(
        "Provider {status} successfully"
    ))))
}

/// delete_provider
///
/// [Authenticated Route] Soft delete.
#[utoipa::path(
    delete,
    path = "/api/providers/{id}",
    params(("id" = Uuid, Path, description = "Provider ID")),
    request_body(content = ReasonRequest, description = "Optional reason"),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn delete_provider(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    body: Option<Json<ReasonRequest>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reason = body.and_then(|Json(body)| body.reason);
    super::soft_delete_account(&state.repo, AccountKind::Provider, id, reason, admin.id).await?;
    Ok(Json(MessageResponse::ok("Provider deleted successfully")))
}
