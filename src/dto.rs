//! Request and response payloads of the HTTP surface.
//!
//! Request bodies keep their fields optional where the API answers a missing field with
//! its own 400 message instead of a generic deserialization rejection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    AdminSummary, AdminView, Booking, BookingDetail, Payment, Provider, User, Workspace,
    WorkspaceBlock, WorkspaceDetail,
};

// --- Requests ---

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
}

/// Body of the user and provider status routes.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceStatusRequest {
    pub status: Option<String>,
    pub rejection_reason: Option<String>,
}

/// Optional body of cancel, delete and suspend style transitions.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReasonRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlagReviewRequest {
    #[serde(default)]
    pub flag: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub booking_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub password: Option<String>,
    /// Defaults to `admin`.
    pub role: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub role: String,
}

/// Owner business profile edit. Blank values are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOwnerRequest {
    pub business_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceRequest {
    pub provider_id: Option<Uuid>,
    pub name: Option<String>,
    pub location: Option<String>,
    /// Defaults to 0.
    pub price_per_hour: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpaceRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub price_per_hour: Option<f64>,
}

/// Either an RFC 3339 timestamp or a calendar day (`YYYY-MM-DD`, midnight UTC).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlockDatesRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// --- Responses ---

/// `{ success, message }`, returned by every mutation without a richer payload.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub admin: AdminSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AdminResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub admin: AdminView,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AdminListResponse {
    pub success: bool,
    pub admins: Vec<AdminView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AdminCreatedResponse {
    pub success: bool,
    pub admin_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserCreatedResponse {
    pub success: bool,
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserDetailResponse {
    pub success: bool,
    pub user: User,
    pub recent_bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProviderStats {
    pub total_workspaces: u64,
    /// Completed bookings across the provider's workspaces.
    pub total_bookings: u64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ProviderDetailResponse {
    pub success: bool,
    pub provider: Provider,
    pub workspaces: Vec<Workspace>,
    pub stats: ProviderStats,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WorkspaceDetailResponse {
    pub success: bool,
    pub workspace: WorkspaceDetail,
    pub recent_bookings: Vec<Booking>,
    pub blocked_dates: Vec<WorkspaceBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct BookingDetailResponse {
    pub success: bool,
    pub booking: BookingDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PaymentResponse {
    pub success: bool,
    pub payment: Payment,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentIntentResponse {
    pub success: bool,
    pub payment_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NotificationSentResponse {
    pub success: bool,
    pub notification_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardStatsResponse {
    pub success: bool,
    pub total_users: i64,
    pub total_providers: i64,
    pub active_providers: i64,
    pub total_workspaces: i64,
    pub active_workspaces: i64,
    pub new_users_this_month: i64,
    pub total_revenue: f64,
    pub monthly_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RevenuePoint {
    /// `2024-03`, `2024-Q1` or `2024` depending on the grouping.
    pub period: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RevenueResponse {
    pub success: bool,
    pub total_revenue: f64,
    pub chart_data: Vec<RevenuePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookingAnalyticsResponse {
    pub success: bool,
    pub status_distribution: BTreeMap<String, u64>,
    pub plan_distribution: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PopularWorkspace {
    pub id: Uuid,
    pub space_name: String,
    pub location: String,
    pub booking_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PopularWorkspacesResponse {
    pub success: bool,
    pub workspaces: Vec<PopularWorkspace>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct OwnerResponse {
    pub success: bool,
    pub owner: Provider,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SpaceCreatedResponse {
    pub success: bool,
    pub space_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BlockCreatedResponse {
    pub success: bool,
    pub block_id: Uuid,
    pub message: String,
}
