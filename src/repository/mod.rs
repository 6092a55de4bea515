use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::RepoError,
    models::{
        AccountKind, AccountStatus, AdminProfileUpdate, AdminRecord, AdminRole, AuditLog, Booking,
        BookingStatus, NewAdmin, NewAuditLog, NewNotification, NewPayment, NewUser, NewWorkspace,
        NewWorkspaceBlock, Notification, Payment, PaymentStatus, Provider, ProviderProfileUpdate,
        RecipientType, Review, ReviewStatus, StatusChange, User, Workspace, WorkspaceBlock,
        WorkspaceUpdate,
    },
    pagination::{PageRequest, Paged},
};

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PostgresRepository;

pub type RepoResult<T> = Result<T, RepoError>;

// --- Listing filters ---
//
// Every field is an equality or range predicate evaluated by the store. `None` means
// "no constraint" unless documented otherwise.

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub status: Option<AccountStatus>,
    /// Case-insensitive substring match on full name or email.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProviderFilter {
    pub status: Option<AccountStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkspaceFilter {
    pub status: Option<AccountStatus>,
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub user_id: Option<Uuid>,
    pub workspace_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    /// Inclusive lower bound on `start_date`.
    pub start_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `start_date`.
    pub start_before: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub status: Option<PaymentStatus>,
}

/// With `status: None`, soft-deleted reviews are excluded.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub status: Option<ReviewStatus>,
    pub rating: Option<i32>,
    pub min_rating: Option<i32>,
    pub max_rating: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    pub recipient_type: Option<RecipientType>,
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub action: Option<String>,
    pub admin_id: Option<Uuid>,
}

/// Aggregates for the analytics dashboard.
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct DashboardCounts {
    pub total_users: i64,
    pub new_users_since: i64,
    pub total_providers: i64,
    pub active_providers: i64,
    pub total_workspaces: i64,
    pub active_workspaces: i64,
    pub total_revenue: f64,
    pub revenue_since: f64,
}

/// Repository
///
/// Persistence contract for the back office. Handlers depend only on this trait, so the
/// Postgres store and the in-memory store are interchangeable.
///
/// Mutations that target a single document return `false` (or `None`) when the document
/// does not exist. Multi-document sequences are not transactional.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Administrators ---
    async fn get_admin(&self, id: Uuid) -> RepoResult<Option<AdminRecord>>;
    async fn find_admin_by_email(&self, email: &str) -> RepoResult<Option<AdminRecord>>;
    /// All administrators, newest first.
    async fn list_admins(&self) -> RepoResult<Vec<AdminRecord>>;
    /// Fails with `RepoError::Conflict` when the email is already registered.
    async fn create_admin(&self, admin: NewAdmin) -> RepoResult<AdminRecord>;
    async fn update_admin_profile(
        &self,
        id: Uuid,
        update: AdminProfileUpdate,
    ) -> RepoResult<Option<AdminRecord>>;
    async fn update_admin_password(&self, id: Uuid, password_hash: &str) -> RepoResult<bool>;
    async fn update_admin_role(&self, id: Uuid, role: AdminRole) -> RepoResult<bool>;
    /// Hard delete.
    async fn delete_admin(&self, id: Uuid) -> RepoResult<bool>;

    // --- Users ---
    async fn list_users(&self, filter: &UserFilter, page: PageRequest) -> RepoResult<Paged<User>>;
    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    async fn create_user(&self, user: NewUser) -> RepoResult<User>;

    // --- Soft lifecycle shared by users, providers and workspaces ---
    async fn set_account_status(
        &self,
        kind: AccountKind,
        id: Uuid,
        change: StatusChange,
    ) -> RepoResult<bool>;
    /// Marks the document `deleted` and records who deleted it and why.
    async fn soft_delete_account(
        &self,
        kind: AccountKind,
        id: Uuid,
        reason: Option<String>,
        actor: Uuid,
    ) -> RepoResult<bool>;

    // --- Providers ---
    async fn list_providers(
        &self,
        filter: &ProviderFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Provider>>;
    async fn get_provider(&self, id: Uuid) -> RepoResult<Option<Provider>>;
    async fn count_workspaces_by_owner(&self, owner_id: Uuid) -> RepoResult<i64>;

    // --- Workspaces ---
    async fn list_workspaces(
        &self,
        filter: &WorkspaceFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Workspace>>;
    async fn get_workspace(&self, id: Uuid) -> RepoResult<Option<Workspace>>;

    // --- Owner tools ---
    /// Fails with `RepoError::Conflict` when the email belongs to another provider.
    async fn update_provider_profile(
        &self,
        id: Uuid,
        update: ProviderProfileUpdate,
    ) -> RepoResult<Option<Provider>>;
    /// New workspaces start `pending` until an administrator approves them.
    async fn create_workspace(&self, workspace: NewWorkspace) -> RepoResult<Workspace>;
    async fn update_workspace(
        &self,
        id: Uuid,
        update: WorkspaceUpdate,
    ) -> RepoResult<Option<Workspace>>;
    /// Hard delete, together with the workspace's blocked ranges.
    async fn delete_workspace(&self, id: Uuid) -> RepoResult<bool>;
    async fn add_workspace_block(&self, block: NewWorkspaceBlock) -> RepoResult<WorkspaceBlock>;
    /// Ordered by `start_date`.
    async fn list_workspace_blocks(&self, workspace_id: Uuid) -> RepoResult<Vec<WorkspaceBlock>>;
    /// `false` when the block does not exist under that workspace.
    async fn delete_workspace_block(&self, workspace_id: Uuid, block_id: Uuid)
    -> RepoResult<bool>;

    // --- Bookings ---
    /// Newest first by `created_at`.
    async fn list_bookings(
        &self,
        filter: &BookingFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Booking>>;
    async fn get_booking(&self, id: Uuid) -> RepoResult<Option<Booking>>;
    /// Every booking, unpaged. Used by analytics.
    async fn all_bookings(&self) -> RepoResult<Vec<Booking>>;
    async fn cancel_booking(&self, id: Uuid, reason: String, actor: Uuid) -> RepoResult<bool>;

    // --- Payments ---
    /// Newest first by `created_at`.
    async fn list_payments(
        &self,
        filter: &PaymentFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Payment>>;
    async fn get_payment(&self, id: Uuid) -> RepoResult<Option<Payment>>;
    async fn find_payment_by_booking(&self, booking_id: Uuid) -> RepoResult<Option<Payment>>;
    /// Creates a `pending` payment with the platform fee split applied.
    async fn create_payment(&self, payment: NewPayment) -> RepoResult<Payment>;
    /// Every payment, unpaged. Used by analytics.
    async fn all_payments(&self) -> RepoResult<Vec<Payment>>;
    async fn record_payment_webhook(
        &self,
        provider: &str,
        payload: serde_json::Value,
    ) -> RepoResult<Uuid>;

    // --- Reviews ---
    /// Newest first by `created_at`.
    async fn list_reviews(
        &self,
        filter: &ReviewFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Review>>;
    async fn soft_delete_review(&self, id: Uuid, reason: String, actor: Uuid) -> RepoResult<bool>;
    async fn flag_review(
        &self,
        id: Uuid,
        flag: bool,
        reason: Option<String>,
        actor: Uuid,
    ) -> RepoResult<bool>;

    // --- Notifications ---
    /// Newest first by `created_at`.
    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Notification>>;
    async fn create_notification(&self, notification: NewNotification)
    -> RepoResult<Notification>;
    async fn mark_notification_read(&self, id: Uuid) -> RepoResult<bool>;
    async fn delete_notification(&self, id: Uuid) -> RepoResult<bool>;

    // --- Audit trail ---
    async fn record_audit(&self, entry: NewAuditLog) -> RepoResult<()>;
    /// Newest first by `timestamp`.
    async fn list_audit_logs(
        &self,
        filter: &AuditLogFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<AuditLog>>;

    // --- Analytics ---
    /// `since` bounds the "new users" and "revenue since" figures.
    async fn dashboard_counts(&self, since: DateTime<Utc>) -> RepoResult<DashboardCounts>;

    // --- Seeding (demo data and tests) ---
    async fn insert_user(&self, user: User) -> RepoResult<()>;
    async fn insert_provider(&self, provider: Provider) -> RepoResult<()>;
    async fn insert_workspace(&self, workspace: Workspace) -> RepoResult<()>;
    async fn insert_booking(&self, booking: Booking) -> RepoResult<()>;
    async fn insert_payment(&self, payment: Payment) -> RepoResult<()>;
    async fn insert_review(&self, review: Review) -> RepoResult<()>;
}

/// RepositoryState
///
/// Shared handle to the persistence layer stored in `AppState`.
pub type RepositoryState = Arc<dyn Repository>;
