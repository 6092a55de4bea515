use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{auth::MIN_PASSWORD_LEN, found, required_status, status_filter};
use crate::{
    AppState,
    auth::{AuthAdmin, hash_password},
    dto::{
        CreateUserRequest, MessageResponse, ReasonRequest, StatusUpdateRequest,
        UserCreatedResponse, UserDetailResponse,
    },
    error::{ApiError, RepoError},
    extract::{ApiJson, ApiPath, ApiQuery},
    models::{AccountKind, AccountStatus, NewUser, User},
    pagination::{Listing, PageRequest},
    repository::{BookingFilter, UserFilter},
};

const DEFAULT_LIMIT: u32 = 10;
const RECENT_BOOKINGS: u32 = 10;

/// UserQuery
///
/// Query parameters of `GET /users`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct UserQuery {
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub limit: Option<u32>,
    /// `all` (default) or one account status.
    pub status: Option<String>,
    /// Case-insensitive match on full name or email.
    pub search: Option<String>,
}

impl UserQuery {
    pub(crate) fn filter(&self) -> Result<UserFilter, ApiError> {
        Ok(UserFilter {
            status: status_filter(self.status.as_deref())?,
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }
}

/// list_users
///
/// [Authenticated Route] Paged user accounts, newest first.
#[utoipa::path(
    get,
    path = "/api/users",
    params(UserQuery),
    responses((status = 200, description = "`{ success, users, pagination }`", body = [User]))
)]
pub async fn list_users(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> Result<Json<Listing<User>>, ApiError> {
    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let users = state.repo.list_users(&query.filter()?, page).await?;
    Ok(Json(Listing::new("users", users, page)))
}

/// create_user
///
/// [Authenticated Route] Creates an active customer account on behalf of a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = UserCreatedResponse),
        (status = 400, description = "Missing fields, short password or duplicate email")
    )
)]
pub async fn create_user(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserCreatedResponse>), ApiError> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    let (Some(email), Some(full_name), Some(phone_number), Some(password)) = (
        non_empty(payload.email),
        non_empty(payload.full_name),
        non_empty(payload.phone_number),
        non_empty(payload.password),
    ) else {
        return Err(ApiError::bad_request("All fields are required"));
    };

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }

    let email = email.trim().to_string();
    if state.repo.find_user_by_email(&email).await?.is_some() {
        return Err(ApiError::DuplicateEmail("Email already exists".to_string()));
    }

    let password_hash = hash_password(&password, state.config.bcrypt_cost).await?;
    let user = state
        .repo
        .create_user(NewUser {
            email,
            full_name,
            phone_number,
            password_hash,
            created_by: admin.id,
        })
        .await
        .map_err(|e| match e {
            RepoError::Conflict(_) => ApiError::DuplicateEmail("Email already exists".to_string()),
            other => other.into(),
        })?;

    tracing::info!(admin_id = %admin.id, user_id = %user.id, "user created");
    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            success: true,
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

/// get_user
///
/// [Authenticated Route] One user plus their ten most recent bookings.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Found", body = UserDetailResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<UserDetailResponse>, ApiError> {
    let user = found(state.repo.get_user(id).await?, "User")?;
    let filter = BookingFilter {
        user_id: Some(id),
        ..Default::default()
    };
    let recent = state
        .repo
        .list_bookings(&filter, PageRequest::new(Some(1), Some(RECENT_BOOKINGS), RECENT_BOOKINGS))
        .await?;

    Ok(Json(UserDetailResponse {
        success: true,
        user,
        recent_bookings: recent.items,
    }))
}

/// update_user_status
///
/// [Authenticated Route] Moves a user to another lifecycle status and records the acting
/// administrator in `updatedBy`.
#[utoipa::path(
    put,
    path = "/api/users/{id}/status",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user_status(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<StatusUpdateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let status: AccountStatus = required_status(payload.status.as_deref())?;
    super::change_account_status(
        &state.repo,
        AccountKind::User,
        id,
        status,
        payload.reason,
        admin.id,
    )
    .await?;

    let verb = if status == AccountStatus::Suspended {
        "suspended"
    } else {
        "activated"
    };
    Ok(Json(MessageResponse::ok(format!("User {verb} successfully"))))
}

/// delete_user
///
/// [Authenticated Route] Soft delete: the row stays, marked `deleted` with who and why.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body(content = ReasonRequest, description = "Optional reason"),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    body: Option<Json<ReasonRequest>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reason = body.and_then(|Json(body)| body.reason);
    super::soft_delete_account(&state.repo, AccountKind::User, id, reason, admin.id).await?;
    Ok(Json(MessageResponse::ok("User deleted successfully")))
}
