use axum::{Json, extract::State};

use super::found;
use crate::{
    AppState,
    auth::{AuthAdmin, hash_password, verify_password},
    dto::{
        AdminResponse, ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse,
        UpdateProfileRequest,
    },
    error::{ApiError, RepoError},
    extract::ApiJson,
    models::{AdminProfileUpdate, AdminSummary},
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub(crate) const MIN_PASSWORD_LEN: usize = 6;

/// login
///
/// [Public Route] Exchanges administrator credentials for a session token.
///
/// Unknown email and wrong password produce the same 401, so the response never reveals
/// which administrator emails exist.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = payload.email.trim();
    let Some(admin) = state.repo.find_admin_by_email(email).await? else {
        tracing::info!("login attempt for unknown email");
        return Err(ApiError::unauthenticated(INVALID_CREDENTIALS));
    };

    if !verify_password(&payload.password, &admin.password_hash).await? {
        tracing::info!(admin_id = %admin.id, "login attempt with wrong password");
        return Err(ApiError::unauthenticated(INVALID_CREDENTIALS));
    }

    let token = state.tokens.issue(admin.id, &admin.email)?;
    tracing::info!(admin_id = %admin.id, role = %admin.role, "administrator logged in");

    Ok(Json(LoginResponse {
        success: true,
        token,
        admin: AdminSummary::from(&admin),
    }))
}

/// get_profile
///
/// [Authenticated Route] The caller's own profile, without the password hash.
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Profile", body = AdminResponse),
        (status = 404, description = "Admin vanished after authentication")
    )
)]
pub async fn get_profile(
    admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<AdminResponse>, ApiError> {
    let record = found(state.repo.get_admin(admin.id).await?, "Admin")?;
    Ok(Json(AdminResponse {
        success: true,
        message: None,
        admin: record.into(),
    }))
}

/// update_profile
///
/// [Authenticated Route] Partial update of the caller's name, email and phone.
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = AdminResponse),
        (status = 400, description = "Email already in use")
    )
)]
pub async fn update_profile(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> Result<Json<AdminResponse>, ApiError> {
    // Blank name or email counts as absent.
    let non_empty = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let full_name = non_empty(payload.full_name);
    let email = non_empty(payload.email);

    if let Some(email) = email.as_deref() {
        if let Some(holder) = state.repo.find_admin_by_email(email).await? {
            if holder.id != admin.id {
                return Err(ApiError::DuplicateEmail("Email already in use".to_string()));
            }
        }
    }

    let update = AdminProfileUpdate {
        full_name,
        email,
        phone: payload.phone,
    };
    let record = match state.repo.update_admin_profile(admin.id, update).await {
        Ok(record) => found(record, "Admin")?,
        Err(RepoError::Conflict(_)) => {
            return Err(ApiError::DuplicateEmail("Email already in use".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(admin_id = %admin.id, "profile updated");
    Ok(Json(AdminResponse {
        success: true,
        message: Some("Profile updated successfully".to_string()),
        admin: record.into(),
    }))
}

/// change_password
///
/// [Authenticated Route] Replaces the caller's password after checking the current one.
#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Missing fields or new password too short"),
        (status = 401, description = "Current password is incorrect")
    )
)]
pub async fn change_password(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (Some(current), Some(new)) = (
        payload.current_password.filter(|p| !p.is_empty()),
        payload.new_password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::bad_request(
            "Current password and new password are required",
        ));
    };

    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(
            "New password must be at least 6 characters",
        ));
    }

    let record = found(state.repo.get_admin(admin.id).await?, "Admin")?;
    if !verify_password(&current, &record.password_hash).await? {
        return Err(ApiError::unauthenticated("Current password is incorrect"));
    }

    let hash = hash_password(&new, state.config.bcrypt_cost).await?;
    super::touched(
        state.repo.update_admin_password(admin.id, &hash).await?,
        "Admin",
    )?;

    tracing::info!(admin_id = %admin.id, "password changed");
    Ok(Json(MessageResponse::ok("Password changed successfully")))
}
