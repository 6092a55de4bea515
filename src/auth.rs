use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, TOKEN_TTL_HOURS},
    error::ApiError,
    models::AdminRole,
    repository::RepositoryState,
};

const MISSING_TOKEN: &str = "No authentication token provided";
const INVALID_TOKEN: &str = "Invalid or expired token";
const ADMIN_REQUIRED: &str = "Access denied. Admin privileges required.";
const SUPER_ADMIN_REQUIRED: &str = "Access denied. Super admin privileges required.";

/// Claims
///
/// Payload of an administrator session token. The token is self-contained: nothing is
/// persisted on issuance, and possession of a valid, unexpired token is the only proof
/// of identity the API accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Administrator id.
    pub sub: Uuid,
    pub email: String,
    /// Issued at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Why a presented token was rejected. Clients only ever see one generic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed or carries a bad signature")]
    Invalid,
    #[error("token has expired")]
    Expired,
}

/// TokenService
///
/// Issues and verifies HS256 session tokens signed with the configured secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret)
    }

    /// Issues a token valid for `TOKEN_TTL_HOURS` from now.
    pub fn issue(&self, admin_id: Uuid, email: &str) -> Result<String, ApiError> {
        self.issue_at(admin_id, email, Utc::now())
    }

    /// Issues a token as if it had been created at `issued_at`.
    pub fn issue_at(
        &self,
        admin_id: Uuid,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, ApiError> {
        let claims = Claims {
            sub: admin_id,
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
    }

    /// Checks signature, structure and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

/// AuthAdmin
///
/// Identity of the administrator behind the current request. Inserted into the request
/// extensions by `authenticate` and read-only from then on.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthAdmin {
    pub id: Uuid,
    pub email: String,
    pub role: AdminRole,
}

impl AuthAdmin {
    pub fn is_super_admin(&self) -> bool {
        self.role == AdminRole::SuperAdmin
    }
}

/// Handlers take `AuthAdmin` as an argument. Only routes mounted behind `authenticate`
/// can produce it; anywhere else the extractor rejects with 401.
impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthAdmin>()
            .cloned()
            .ok_or_else(|| ApiError::unauthenticated("Authentication required"))
    }
}

/// Returns the token from an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// authenticate
///
/// Middleware mounted ahead of every protected route.
///
/// 1. Missing bearer token: 401.
/// 2. Bad signature, malformed or expired token: 401 with one generic message.
/// 3. Administrator no longer exists: 403. Deleting an administrator therefore revokes
///    all of their outstanding tokens on the next request.
/// 4. Otherwise `AuthAdmin { id, email, role }` is attached to the request.
///
/// The administrator row is re-read on every request, so role changes apply immediately.
pub async fn authenticate(
    State(repo): State<RepositoryState>,
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::debug!("request without bearer token");
        ApiError::unauthenticated(MISSING_TOKEN)
    })?;

    let claims = tokens.verify(token).map_err(|e| {
        tracing::debug!(reason = %e, "token rejected");
        ApiError::unauthenticated(INVALID_TOKEN)
    })?;

    let admin = repo.get_admin(claims.sub).await?.ok_or_else(|| {
        tracing::warn!(admin_id = %claims.sub, "token references a missing administrator");
        ApiError::forbidden(ADMIN_REQUIRED)
    })?;

    request.extensions_mut().insert(AuthAdmin {
        id: admin.id,
        email: admin.email,
        role: admin.role,
    });

    Ok(next.run(request).await)
}

/// require_super_admin
///
/// Role gate layered inside `authenticate`. No side effects.
pub async fn require_super_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let admin = request
        .extensions()
        .get::<AuthAdmin>()
        .ok_or_else(|| ApiError::unauthenticated("Authentication required"))?;

    if !admin.is_super_admin() {
        tracing::warn!(admin_id = %admin.id, "super admin route refused");
        return Err(ApiError::forbidden(SUPER_ADMIN_REQUIRED));
    }

    Ok(next.run(request).await)
}

// --- Password hashing ---
//
// bcrypt is CPU bound; both directions run on the blocking pool.

pub async fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
    let password = password.to_string();
    Ok(tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??)
}

/// A stored hash that bcrypt cannot parse counts as a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let password = password.to_string();
    let hash = hash.to_string();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await?;
    Ok(verified.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "stored password hash could not be verified");
        false
    }))
}

