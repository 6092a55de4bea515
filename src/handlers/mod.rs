//! Request handlers, one module per resource.
//!
//! Every handler receives the caller's identity through the `AuthAdmin` extractor (except
//! the public ones), reads through the `Repository` trait, and maps failures to `ApiError`.

use std::str::FromStr;

use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{AccountKind, AccountStatus, NewAuditLog, ParseEnumError, StatusChange},
    repository::RepositoryState,
};

pub mod analytics;
pub mod auth;
pub mod bookings;
pub mod notifications;
pub mod owners;
pub mod payments;
pub mod providers;
pub mod reviews;
pub mod superadmin;
pub mod system;
pub mod users;
pub mod workspaces;

/// Resolves a status query parameter. Absent, empty and `all` mean "no filter".
pub(crate) fn status_filter<T>(raw: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = ParseEnumError>,
{
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ApiError::bad_request(format!("Invalid status '{value}'"))),
    }
}

/// Parses a required status from a request body.
pub(crate) fn required_status<T>(raw: Option<&str>) -> Result<T, ApiError>
where
    T: FromStr<Err = ParseEnumError>,
{
    let value = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::bad_request("Status is required"))?;
    value
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid status '{value}'")))
}

/// Unwraps a lookup, answering 404 `"<label> not found"` when the document is missing.
pub(crate) fn found<T>(value: Option<T>, label: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::not_found(format!("{label} not found")))
}

/// Same as `found` for single-document mutations that report whether a row matched.
pub(crate) fn touched(updated: bool, label: &str) -> Result<(), ApiError> {
    if updated {
        Ok(())
    } else {
        Err(ApiError::not_found(format!("{label} not found")))
    }
}

/// Appends an audit entry. Best-effort: a failed write is logged and never fails the
/// request that triggered it.
pub(crate) async fn record_audit(
    repo: &RepositoryState,
    admin_id: Uuid,
    action: &str,
    target_type: &str,
    target_id: Option<Uuid>,
    details: Option<String>,
) {
    let entry = NewAuditLog {
        admin_id,
        action: action.to_string(),
        target_type: target_type.to_string(),
        target_id,
        details,
    };
    if let Err(e) = repo.record_audit(entry).await {
        tracing::warn!(error = %e, action, "failed to write audit entry");
    }
}

/// Shared body of the user, provider and workspace status routes.
pub(crate) async fn change_account_status(
    repo: &RepositoryState,
    kind: AccountKind,
    id: Uuid,
    status: AccountStatus,
    reason: Option<String>,
    actor: Uuid,
) -> Result<(), ApiError> {
    let change = StatusChange {
        status,
        reason: reason.clone(),
        actor,
    };
    touched(repo.set_account_status(kind, id, change).await?, kind.label())?;

    tracing::info!(admin_id = %actor, target = kind.table(), %id, %status, "status changed");
    let details = match reason {
        Some(reason) if !reason.is_empty() => format!("status={status}; reason={reason}"),
        _ => format!("status={status}"),
    };
    let target = kind.label().to_lowercase();
    record_audit(
        repo,
        actor,
        &format!("{target}.status_changed"),
        &target,
        Some(id),
        Some(details),
    )
    .await;
    Ok(())
}

/// Shared body of the user, provider and workspace delete routes.
pub(crate) async fn soft_delete_account(
    repo: &RepositoryState,
    kind: AccountKind,
    id: Uuid,
    reason: Option<String>,
    actor: Uuid,
) -> Result<(), ApiError> {
    touched(
        repo.soft_delete_account(kind, id, reason.clone(), actor).await?,
        kind.label(),
    )?;

    tracing::info!(admin_id = %actor, target = kind.table(), %id, "soft deleted");
    let target = kind.label().to_lowercase();
    record_audit(
        repo,
        actor,
        &format!("{target}.deleted"),
        &target,
        Some(id),
        reason.filter(|r| !r.is_empty()),
    )
    .await;
    Ok(())
}
