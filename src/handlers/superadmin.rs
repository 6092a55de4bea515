//! Super-administrator console: administrator management and the audit trail, plus the
//! console's own user list and suspension shortcuts.
//!
//! Routes marked `[Super Admin Route]` sit behind `require_super_admin`; the others only
//! need a valid session.

use axum::{Json, extract::State};
use serde::Deserialize;
use uuid::Uuid;

use super::{auth::MIN_PASSWORD_LEN, found, record_audit, touched, users::UserQuery};
use crate::{
    AppState,
    auth::{AuthAdmin, hash_password},
    dto::{
        AdminCreatedResponse, AdminListResponse, AdminResponse, CreateAdminRequest,
        MessageResponse, ReasonRequest, UpdateRoleRequest,
    },
    error::{ApiError, RepoError},
    extract::{ApiJson, ApiPath, ApiQuery},
    models::{AccountKind, AccountStatus, AdminRole, AuditLog, NewAdmin, User},
    pagination::{Listing, PageRequest},
    repository::AuditLogFilter,
};

const USERS_DEFAULT_LIMIT: u32 = 20;
const AUDIT_DEFAULT_LIMIT: u32 = 50;
const DUPLICATE_ADMIN: &str = "Admin with this email already exists";

/// list_users
///
/// [Authenticated Route] Same listing as `GET /users` with the console's page size.
#[utoipa::path(
    get,
    path = "/api/superadmin/users",
    params(UserQuery),
    responses((status = 200, description = "`{ success, users, pagination }`", body = [User]))
)]
pub async fn list_users(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> Result<Json<Listing<User>>, ApiError> {
    let page = PageRequest::new(query.page, query.limit, USERS_DEFAULT_LIMIT);
    let users = state.repo.list_users(&query.filter()?, page).await?;
    Ok(Json(Listing::new("users", users, page)))
}

#[utoipa::path(
    post,
    path = "/api/superadmin/users/{id}/suspend",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body(content = ReasonRequest, description = "Optional reason"),
    responses(
        (status = 200, description = "Suspended", body = MessageResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn suspend_user(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    body: Option<Json<ReasonRequest>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reason = body.and_then(|Json(body)| body.reason);
    super::change_account_status(
        &state.repo,
        AccountKind::User,
        id,
        AccountStatus::Suspended,
        reason,
        admin.id,
    )
    .await?;
    Ok(Json(MessageResponse::ok("User suspended successfully")))
}

/// unsuspend_user
///
/// [Authenticated Route] Reactivates a user and clears the suspension reason.
#[utoipa::path(
    post,
    path = "/api/superadmin/users/{id}/unsuspend",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Reactivated", body = MessageResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn unsuspend_user(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    super::change_account_status(
        &state.repo,
        AccountKind::User,
        id,
        AccountStatus::Active,
        None,
        admin.id,
    )
    .await?;
    Ok(Json(MessageResponse::ok("User unsuspended successfully")))
}

/// list_admins
///
/// [Super Admin Route] Every administrator, newest first.
#[utoipa::path(
    get,
    path = "/api/superadmin/admins",
    responses(
        (status = 200, description = "Administrators", body = AdminListResponse),
        (status = 403, description = "Caller is not a super admin")
    )
)]
pub async fn list_admins(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<AdminListResponse>, ApiError> {
    let admins = state.repo.list_admins().await?;
    Ok(Json(AdminListResponse {
        success: true,
        admins: admins.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/superadmin/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Found", body = AdminResponse),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn get_admin(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<AdminResponse>, ApiError> {
    let record = found(state.repo.get_admin(id).await?, "Admin")?;
    Ok(Json(AdminResponse {
        success: true,
        message: None,
        admin: record.into(),
    }))
}

/// create_admin
///
/// [Super Admin Route] Registers a new administrator. The role defaults to `admin`.
#[utoipa::path(
    post,
    path = "/api/superadmin/admins",
    request_body = CreateAdminRequest,
    responses(
        (status = 200, description = "Created", body = AdminCreatedResponse),
        (status = 400, description = "Missing fields, invalid role or duplicate email"),
        (status = 403, description = "Caller is not a super admin")
    )
)]
pub async fn create_admin(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateAdminRequest>,
) -> Result<Json<AdminCreatedResponse>, ApiError> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    let (Some(email), Some(full_name), Some(password)) = (
        non_empty(payload.email),
        non_empty(payload.full_name),
        non_empty(payload.password),
    ) else {
        return Err(ApiError::bad_request(
            "Email, full name and password are required",
        ));
    };
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }
    let role = match non_empty(payload.role) {
        None => AdminRole::Admin,
        Some(raw) => raw.trim().parse().map_err(|_| ApiError::InvalidRole)?,
    };

    let email = email.trim().to_string();
    if state.repo.find_admin_by_email(&email).await?.is_some() {
        return Err(ApiError::DuplicateEmail(DUPLICATE_ADMIN.to_string()));
    }

    let password_hash = hash_password(&password, state.config.bcrypt_cost).await?;
    let created = state
        .repo
        .create_admin(NewAdmin {
            email,
            full_name,
            password_hash,
            role,
            phone: non_empty(payload.phone),
        })
        .await
        .map_err(|e| match e {
            RepoError::Conflict(_) => ApiError::DuplicateEmail(DUPLICATE_ADMIN.to_string()),
            other => other.into(),
        })?;

    tracing::info!(admin_id = %admin.id, new_admin_id = %created.id, %role, "administrator created");
    record_audit(
        &state.repo,
        admin.id,
        "admin.created",
        "admin",
        Some(created.id),
        Some(format!("email={}; role={role}", created.email)),
    )
    .await;

    Ok(Json(AdminCreatedResponse {
        success: true,
        admin_id: created.id,
        message: "Admin created successfully".to_string(),
    }))
}

/// update_admin_role
///
/// [Super Admin Route] Changes another administrator's role. Changing one's own role is
/// refused whatever the payload.
#[utoipa::path(
    put,
    path = "/api/superadmin/admins/{id}/role",
    params(("id" = Uuid, Path, description = "Admin ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Invalid role or own account"),
        (status = 403, description = "Caller is not a super admin"),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn update_admin_role(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateRoleRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if id == admin.id {
        return Err(ApiError::SelfModificationDenied(
            "Cannot change your own role".to_string(),
        ));
    }
    let role: AdminRole = payload
        .role
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidRole)?;

    touched(state.repo.update_admin_role(id, role).await?, "Admin")?;

    tracing::info!(admin_id = %admin.id, target_admin_id = %id, %role, "administrator role changed");
    record_audit(
        &state.repo,
        admin.id,
        "admin.role_changed",
        "admin",
        Some(id),
        Some(format!("role={role}")),
    )
    .await;
    Ok(Json(MessageResponse::ok("Admin role updated successfully")))
}

/// remove_admin
///
/// [Super Admin Route] Hard delete. Outstanding tokens of the removed administrator stop
/// working on their next request, when authentication no longer finds the account.
#[utoipa::path(
    delete,
    path = "/api/superadmin/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 400, description = "Own account"),
        (status = 403, description = "Caller is not a super admin"),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn remove_admin(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if id == admin.id {
        return Err(ApiError::SelfModificationDenied(
            "Cannot remove yourself".to_string(),
        ));
    }

    touched(state.repo.delete_admin(id).await?, "Admin")?;

    tracing::info!(admin_id = %admin.id, removed_admin_id = %id, "administrator removed");
    record_audit(&state.repo, admin.id, "admin.removed", "admin", Some(id), None).await;
    Ok(Json(MessageResponse::ok("Admin removed successfully")))
}

/// AuditLogQuery
///
/// Query parameters of `GET /superadmin/audit-logs`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogQuery {
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub limit: Option<u32>,
    /// Exact action name, e.g. `admin.created`.
    pub action: Option<String>,
    pub admin_id: Option<Uuid>,
}

/// audit_logs
///
/// [Super Admin Route] Audit trail, newest first.
#[utoipa::path(
    get,
    path = "/api/superadmin/audit-logs",
    params(AuditLogQuery),
    responses(
        (status = 200, description = "`{ success, logs, pagination }`", body = [AuditLog]),
        (status = 403, description = "Caller is not a super admin")
    )
)]
pub async fn audit_logs(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AuditLogQuery>,
) -> Result<Json<Listing<AuditLog>>, ApiError> {
    let page = PageRequest::new(query.page, query.limit, AUDIT_DEFAULT_LIMIT);
    let filter = AuditLogFilter {
        action: query
            .action
            .map(|action| action.trim().to_string())
            .filter(|action| !action.is_empty() && action != "all"),
        admin_id: query.admin_id,
    };
    let logs = state.repo.list_audit_logs(&filter, page).await?;
    Ok(Json(Listing::new("logs", logs, page)))
}
