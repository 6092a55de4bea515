use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// RepoError
///
/// Failures raised by the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Database(sqlx::Error),
    /// A uniqueness constraint rejected the write.
    #[error("conflict on {0}")]
    Conflict(String),
    /// A stored document could not be decoded into its typed record.
    #[error("malformed record: {0}")]
    Malformed(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { index, source } => {
                Self::Malformed(format!("column {index}: {source}"))
            }
            sqlx::Error::Decode(source) => Self::Malformed(source.to_string()),
            other => Self::Database(other),
        }
    }
}

/// ApiError
///
/// Every failure a handler or middleware can surface. Each variant maps to one HTTP status
/// and renders as `{"error": "<message>"}`. Internal details are logged, never returned.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 401
    #[error("{0}")]
    Unauthenticated(String),
    // 403
    #[error("{0}")]
    Forbidden(String),
    // 404
    #[error("{0}")]
    NotFound(String),
    // 400
    #[error("{0}")]
    DuplicateEmail(String),
    #[error("Invalid role")]
    InvalidRole,
    #[error("{0}")]
    SelfModificationDenied(String),
    #[error("{0}")]
    BadRequest(String),
    // 500
    #[error("internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl ApiError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateEmail(_)
            | Self::InvalidRole
            | Self::SelfModificationDenied(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            // A unique violation that slipped past the pre-check is still a client error.
            Self::Repository(RepoError::Conflict(_)) => StatusCode::BAD_REQUEST,
            Self::Internal(_) | Self::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Repository(RepoError::Conflict(_)) => "Email already in use".to_string(),
            Self::Internal(_) | Self::Repository(_) => "Server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {err}"))
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("password hashing failed: {err}"))
    }
}
