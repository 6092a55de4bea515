use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

/// ParseEnumError
///
/// Raised when a stored or submitted string does not name a known variant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown {kind} value '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

// Closed string enums stored as TEXT. `TryFrom<String>` lets `FromRow` reject rows with
// unknown values instead of carrying them through untyped.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
        #[ts(export)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok($name::$variant),)+
                    other => Err(ParseEnumError {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseEnumError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

text_enum! {
    /// Administrator role. `SuperAdmin` is the privileged value checked by the role gate.
    AdminRole {
        Admin => "admin",
        SuperAdmin => "super_admin",
    }
}

text_enum! {
    /// Lifecycle status shared by users, providers and workspaces.
    AccountStatus {
        Active => "active",
        Suspended => "suspended",
        Pending => "pending",
        Rejected => "rejected",
        Deleted => "deleted",
    }
}

text_enum! {
    BookingStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Upcoming => "upcoming",
        InProgress => "in-progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

text_enum! {
    PaymentStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
}

text_enum! {
    ReviewStatus {
        Active => "active",
        Deleted => "deleted",
    }
}

text_enum! {
    /// Audience of a notification.
    RecipientType {
        Admin => "admin",
        User => "user",
    }
}

impl BookingStatus {
    /// Bookings that still occupy (or occupied) a workspace.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::InProgress | BookingStatus::Upcoming
        )
    }
}

/// Share of every booking amount retained by the platform.
pub const PLATFORM_FEE_RATE: f64 = 0.1;

/// Splits a gross amount into `(platform_fee, provider_amount)`.
pub fn split_platform_fee(amount: f64) -> (f64, f64) {
    let fee = (amount * PLATFORM_FEE_RATE * 100.0).round() / 100.0;
    (fee, amount - fee)
}

// --- Administrators ---

/// AdminRecord
///
/// Stored administrator row. Carries the password hash, so it is never serialized;
/// handlers convert it into `AdminView` before responding.
#[derive(Debug, Clone, FromRow)]
pub struct AdminRecord {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: AdminRole,
    #[sqlx(try_from = "String")]
    pub status: AccountStatus,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// AdminView
///
/// Administrator profile as returned to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AdminView {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: AdminRole,
    pub status: AccountStatus,
    pub phone: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl From<AdminRecord> for AdminView {
    fn from(record: AdminRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            full_name: record.full_name,
            role: record.role,
            status: record.status,
            phone: record.phone,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Identity block returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AdminSummary {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: AdminRole,
}

impl From<&AdminRecord> for AdminSummary {
    fn from(record: &AdminRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            full_name: record.full_name.clone(),
            role: record.role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: AdminRole,
    pub phone: Option<String>,
}

/// Partial profile update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct AdminProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

// --- Marketplace entities ---

/// User
///
/// A marketplace customer account.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: AccountStatus,
    pub status_reason: Option<String>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub deleted_by: Option<Uuid>,
    #[ts(type = "string | null")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub password_hash: String,
    pub created_by: Uuid,
}

/// Provider
///
/// A workspace owner account.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Provider {
    pub id: Uuid,
    pub email: String,
    pub business_name: String,
    pub full_name: String,
    pub phone: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: AccountStatus,
    pub status_reason: Option<String>,
    pub updated_by: Option<Uuid>,
    pub deleted_by: Option<Uuid>,
    #[ts(type = "string | null")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Workspace {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub space_name: String,
    pub location: String,
    pub price_per_hour: f64,
    #[sqlx(try_from = "String")]
    pub status: AccountStatus,
    pub status_reason: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub deleted_by: Option<Uuid>,
    #[ts(type = "string | null")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Business profile edit made through the owner tools. `None` leaves the column untouched.
#[derive(Debug, Clone)]
pub struct ProviderProfileUpdate {
    pub business_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub actor: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewWorkspace {
    pub owner_id: Uuid,
    pub space_name: String,
    pub location: String,
    pub price_per_hour: f64,
}

#[derive(Debug, Clone, Default)]
pub struct WorkspaceUpdate {
    pub space_name: Option<String>,
    pub location: Option<String>,
    pub price_per_hour: Option<f64>,
}

/// WorkspaceBlock
///
/// A date range during which a workspace takes no bookings.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WorkspaceBlock {
    pub id: Uuid,
    pub workspace_id: Uuid,
    #[ts(type = "string")]
    pub start_date: DateTime<Utc>,
    #[ts(type = "string")]
    pub end_date: DateTime<Utc>,
    pub created_by: Uuid,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewWorkspaceBlock {
    pub workspace_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workspace_id: Uuid,
    pub provider_id: Uuid,
    // daily | weekly | monthly | hourly
    pub booking_plan: String,
    #[ts(type = "string")]
    pub start_date: DateTime<Utc>,
    #[ts(type = "string")]
    pub end_date: DateTime<Utc>,
    pub total_amount: f64,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub cancellation_reason: Option<String>,
    pub cancelled_by: Option<Uuid>,
    #[ts(type = "string | null")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub provider_id: Uuid,
    pub amount: f64,
    pub platform_fee: f64,
    pub provider_amount: f64,
    #[sqlx(try_from = "String")]
    pub status: PaymentStatus,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub provider_id: Uuid,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workspace_id: Uuid,
    pub rating: i32,
    pub comment: String,
    #[sqlx(try_from = "String")]
    pub status: ReviewStatus,
    pub flagged: bool,
    pub flag_reason: Option<String>,
    #[ts(type = "string | null")]
    pub flagged_at: Option<DateTime<Utc>>,
    pub flagged_by: Option<Uuid>,
    pub deletion_reason: Option<String>,
    pub deleted_by: Option<Uuid>,
    #[ts(type = "string | null")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    #[sqlx(try_from = "String")]
    pub recipient_type: RecipientType,
    pub title: String,
    pub message: String,
    // `type` is reserved in Rust; exposed under its wire name.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub notification_type: String,
    pub is_read: bool,
    #[ts(type = "string | null")]
    pub read_at: Option<DateTime<Utc>>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Option<Uuid>,
    pub recipient_type: RecipientType,
    pub title: String,
    pub message: String,
    pub notification_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuditLog {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub action: String,
    pub target_type: String,
    pub target_id: Option<Uuid>,
    pub details: Option<String>,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub admin_id: Uuid,
    pub action: String,
    pub target_type: String,
    pub target_id: Option<Uuid>,
    pub details: Option<String>,
}

/// Audit breadcrumb for a soft lifecycle transition.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: AccountStatus,
    pub reason: Option<String>,
    pub actor: Uuid,
}

/// Accounts that share the soft lifecycle of `AccountStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    User,
    Provider,
    Workspace,
}

impl AccountKind {
    pub fn table(&self) -> &'static str {
        match self {
            AccountKind::User => "users",
            AccountKind::Provider => "providers",
            AccountKind::Workspace => "workspaces",
        }
    }

    /// Column recording the administrator behind a status change.
    pub fn actor_column(&self) -> &'static str {
        match self {
            AccountKind::Workspace => "reviewed_by",
            _ => "updated_by",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::User => "User",
            AccountKind::Provider => "Provider",
            AccountKind::Workspace => "Workspace",
        }
    }
}

// --- Related-entity summaries used for enrichment ---

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WorkspaceSummary {
    pub id: Uuid,
    pub space_name: String,
    pub location: String,
}

impl From<Workspace> for WorkspaceSummary {
    fn from(workspace: Workspace) -> Self {
        Self {
            id: workspace.id,
            space_name: workspace.space_name,
            location: workspace.location,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub business_name: String,
    pub email: String,
}

impl From<Provider> for OwnerSummary {
    fn from(provider: Provider) -> Self {
        Self {
            id: provider.id,
            business_name: provider.business_name,
            email: provider.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookingListItem {
    #[serde(flatten)]
    pub booking: Booking,
    pub user: Option<UserSummary>,
    pub workspace: Option<WorkspaceSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    pub user: Option<User>,
    pub workspace: Option<Workspace>,
    pub payment: Option<Payment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReviewListItem {
    #[serde(flatten)]
    pub review: Review,
    pub user: Option<UserSummary>,
    pub workspace: Option<WorkspaceSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProviderListItem {
    #[serde(flatten)]
    pub provider: Provider,
    pub workspace_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WorkspaceDetail {
    #[serde(flatten)]
    pub workspace: Workspace,
    pub owner: Option<OwnerSummary>,
}
