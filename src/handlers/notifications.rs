use axum::{Json, extract::State};
use serde::Deserialize;
use uuid::Uuid;

use super::{status_filter, touched};
use crate::{
    AppState,
    auth::AuthAdmin,
    dto::{MessageResponse, NotificationSentResponse, SendNotificationRequest},
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    models::{NewNotification, Notification, RecipientType},
    pagination::{Listing, PageRequest},
    repository::NotificationFilter,
};

const DEFAULT_LIMIT: u32 = 20;
const DEFAULT_TYPE: &str = "general";

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct MyNotificationsQuery {
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub limit: Option<u32>,
}

/// NotificationQuery
///
/// Query parameters of `GET /notifications/all`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "crate::pagination::lenient_u32")]
    pub limit: Option<u32>,
    /// `all` (default), `admin` or `user`.
    pub recipient_type: Option<String>,
    /// `all` (default), `true` or `false`.
    pub is_read: Option<String>,
}

impl NotificationQuery {
    pub(crate) fn filter(&self) -> Result<NotificationFilter, ApiError> {
        let is_read = match self.is_read.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(other) => {
                return Err(ApiError::bad_request(format!("Invalid isRead '{other}'")));
            }
        };
        Ok(NotificationFilter {
            recipient_type: status_filter(self.recipient_type.as_deref())
                .map_err(|_| ApiError::bad_request("Invalid recipientType"))?,
            is_read,
        })
    }
}

/// my_notifications
///
/// [Authenticated Route] Notifications addressed to administrators.
#[utoipa::path(
    get,
    path = "/api/notifications/me",
    params(MyNotificationsQuery),
    responses((status = 200, description = "`{ success, notifications, pagination }`", body = [Notification]))
)]
pub async fn my_notifications(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MyNotificationsQuery>,
) -> Result<Json<Listing<Notification>>, ApiError> {
    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let filter = NotificationFilter {
        recipient_type: Some(RecipientType::Admin),
        ..Default::default()
    };
    let notifications = state.repo.list_notifications(&filter, page).await?;
    Ok(Json(Listing::new("notifications", notifications, page)))
}

/// list_all_notifications
///
/// [Authenticated Route] Every notification, newest first.
#[utoipa::path(
    get,
    path = "/api/notifications/all",
    params(NotificationQuery),
    responses((status = 200, description = "`{ success, notifications, pagination }`", body = [Notification]))
)]
pub async fn list_all_notifications(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NotificationQuery>,
) -> Result<Json<Listing<Notification>>, ApiError> {
    let page = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT);
    let notifications = state
        .repo
        .list_notifications(&query.filter()?, page)
        .await?;
    Ok(Json(Listing::new("notifications", notifications, page)))
}

#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read", body = MessageResponse),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    touched(
        state.repo.mark_notification_read(id).await?,
        "Notification",
    )?;
    Ok(Json(MessageResponse::ok("Notification marked as read")))
}

/// send_notification
///
/// [Authenticated Route] Queues a notification for one user. Delivery is up to the
/// customer apps, which poll their notifications.
#[utoipa::path(
    post,
    path = "/api/notifications/send",
    request_body = SendNotificationRequest,
    responses(
        (status = 200, description = "Sent", body = NotificationSentResponse),
        (status = 400, description = "Empty title or message"),
        (status = 404, description = "User not found")
    )
)]
pub async fn send_notification(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SendNotificationRequest>,
) -> Result<Json<NotificationSentResponse>, ApiError> {
    if payload.title.trim().is_empty() || payload.message.trim().is_empty() {
        return Err(ApiError::bad_request("Title and message are required"));
    }
    super::found(state.repo.get_user(payload.user_id).await?, "User")?;

    let notification = state
        .repo
        .create_notification(NewNotification {
            user_id: Some(payload.user_id),
            recipient_type: RecipientType::User,
            title: payload.title,
            message: payload.message,
            notification_type: payload
                .notification_type
                .filter(|kind| !kind.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
        })
        .await?;

    tracing::info!(
        admin_id = %admin.id,
        user_id = %payload.user_id,
        notification_id = %notification.id,
        "notification sent"
    );
    Ok(Json(NotificationSentResponse {
        success: true,
        notification_id: notification.id,
        message: "Notification sent successfully".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn delete_notification(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    touched(state.repo.delete_notification(id).await?, "Notification")?;
    tracing::info!(admin_id = %admin.id, notification_id = %id, "notification deleted");
    Ok(Json(MessageResponse::ok("Notification deleted successfully")))
}
