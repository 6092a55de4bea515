use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    AuditLogFilter, BookingFilter, DashboardCounts, NotificationFilter, PaymentFilter,
    ProviderFilter, RepoResult, Repository, ReviewFilter, UserFilter, WorkspaceFilter,
};
use crate::{
    error::RepoError,
    models::{
        AccountKind, AccountStatus, AdminProfileUpdate, AdminRecord, AdminRole, AuditLog, Booking,
        NewAdmin, NewAuditLog, NewNotification, NewPayment, NewUser, NewWorkspace,
        NewWorkspaceBlock, Notification, Payment, PaymentStatus, Provider, ProviderProfileUpdate,
        Review, ReviewStatus, StatusChange, User, Workspace, WorkspaceBlock, WorkspaceUpdate,
        split_platform_fee,
    },
    pagination::{PageRequest, Paged},
};

#[derive(Default)]
struct Store {
    admins: Vec<AdminRecord>,
    users: Vec<User>,
    // Password hashes for users created through the back office, keyed by user id.
    user_credentials: Vec<(Uuid, String)>,
    providers: Vec<Provider>,
    workspaces: Vec<Workspace>,
    workspace_blocks: Vec<WorkspaceBlock>,
    bookings: Vec<Booking>,
    payments: Vec<Payment>,
    webhooks: Vec<(Uuid, String, serde_json::Value)>,
    reviews: Vec<Review>,
    notifications: Vec<Notification>,
    audit_logs: Vec<AuditLog>,
}

/// MemoryRepository
///
/// In-process implementation of `Repository`. Applies the same predicates, ordering
/// and pagination as the Postgres store, over plain vectors behind an async `RwLock`.
/// Used by the integration tests and for running the API without a database.
#[derive(Default)]
pub struct MemoryRepository {
    store: RwLock<Store>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a ready-made administrator record, bypassing the uniqueness check.
    pub async fn insert_admin(&self, admin: AdminRecord) {
        self.store.write().await.admins.push(admin);
    }

    /// Audit entries in insertion order.
    pub async fn audit_entries(&self) -> Vec<AuditLog> {
        self.store.read().await.audit_logs.clone()
    }

    /// Stored webhook payloads as `(provider, payload)` pairs.
    pub async fn webhook_payloads(&self) -> Vec<(String, serde_json::Value)> {
        self.store
            .read()
            .await
            .webhooks
            .iter()
            .map(|(_, provider, payload)| (provider.clone(), payload.clone()))
            .collect()
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> DateTime<Utc>) {
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
}

fn apply_status(
    status: &mut AccountStatus,
    status_reason: &mut Option<String>,
    actor_slot: &mut Option<Uuid>,
    updated_at: &mut DateTime<Utc>,
    change: StatusChange,
) {
    *status = change.status;
    *status_reason = change.reason;
    *actor_slot = Some(change.actor);
    *updated_at = Utc::now();
}

fn apply_soft_delete(
    status: &mut AccountStatus,
    status_reason: &mut Option<String>,
    deleted_by: &mut Option<Uuid>,
    deleted_at: &mut Option<DateTime<Utc>>,
    reason: Option<String>,
    actor: Uuid,
) {
    *status = AccountStatus::Deleted;
    *status_reason = Some(reason.unwrap_or_default());
    *deleted_by = Some(actor);
    *deleted_at = Some(Utc::now());
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn get_admin(&self, id: Uuid) -> RepoResult<Option<AdminRecord>> {
        let store = self.store.read().await;
        Ok(store.admins.iter().find(|a| a.id == id).cloned())
    }

    async fn find_admin_by_email(&self, email: &str) -> RepoResult<Option<AdminRecord>> {
        let store = self.store.read().await;
        Ok(store.admins.iter().find(|a| a.email == email).cloned())
    }

    async fn list_admins(&self) -> RepoResult<Vec<AdminRecord>> {
        let mut admins = self.store.read().await.admins.clone();
        newest_first(&mut admins, |a| a.created_at);
        Ok(admins)
    }

    async fn create_admin(&self, admin: NewAdmin) -> RepoResult<AdminRecord> {
        let mut store = self.store.write().await;
        if store.admins.iter().any(|a| a.email == admin.email) {
            return Err(RepoError::Conflict("admins.email".to_string()));
        }
        let now = Utc::now();
        let record = AdminRecord {
            id: Uuid::new_v4(),
            email: admin.email,
            full_name: admin.full_name,
            password_hash: admin.password_hash,
            role: admin.role,
            status: AccountStatus::Active,
            phone: admin.phone,
            created_at: now,
            updated_at: now,
        };
        store.admins.push(record.clone());
        Ok(record)
    }

    async fn update_admin_profile(
        &self,
        id: Uuid,
        update: AdminProfileUpdate,
    ) -> RepoResult<Option<AdminRecord>> {
        let mut store = self.store.write().await;
        if let Some(email) = &update.email {
            if store.admins.iter().any(|a| a.id != id && &a.email == email) {
                return Err(RepoError::Conflict("admins.email".to_string()));
            }
        }
        let Some(admin) = store.admins.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(full_name) = update.full_name {
            admin.full_name = full_name;
        }
        if let Some(email) = update.email {
            admin.email = email;
        }
        if let Some(phone) = update.phone {
            admin.phone = Some(phone);
        }
        admin.updated_at = Utc::now();
        Ok(Some(admin.clone()))
    }

    async fn update_admin_password(&self, id: Uuid, password_hash: &str) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        Ok(match store.admins.iter_mut().find(|a| a.id == id) {
            Some(admin) => {
                admin.password_hash = password_hash.to_string();
                admin.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn update_admin_role(&self, id: Uuid, role: AdminRole) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        Ok(match store.admins.iter_mut().find(|a| a.id == id) {
            Some(admin) => {
                admin.role = role;
                admin.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn delete_admin(&self, id: Uuid) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        let before = store.admins.len();
        store.admins.retain(|a| a.id != id);
        Ok(store.admins.len() < before)
    }

    async fn list_users(&self, filter: &UserFilter, page: PageRequest) -> RepoResult<Paged<User>> {
        let store = self.store.read().await;
        let search = filter.search.as_deref().map(str::to_lowercase);
        let mut users: Vec<User> = store
            .users
            .iter()
            .filter(|u| filter.status.is_none_or(|s| u.status == s))
            .filter(|u| {
                search.as_deref().is_none_or(|needle| {
                    contains_ci(&u.full_name, needle) || contains_ci(&u.email, needle)
                })
            })
            .cloned()
            .collect();
        newest_first(&mut users, |u| u.created_at);
        Ok(page.slice(users))
    }

    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> RepoResult<User> {
        let mut store = self.store.write().await;
        if store.users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Conflict("users.email".to_string()));
        }
        let now = Utc::now();
        let record = User {
            id: Uuid::new_v4(),
            email: user.email,
            full_name: user.full_name,
            phone_number: Some(user.phone_number),
            status: AccountStatus::Active,
            status_reason: None,
            created_by: Some(user.created_by),
            updated_by: None,
            deleted_by: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        store.user_credentials.push((record.id, user.password_hash));
        store.users.push(record.clone());
        Ok(record)
    }

    async fn set_account_status(
        &self,
        kind: AccountKind,
        id: Uuid,
        change: StatusChange,
    ) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        let found = match kind {
            AccountKind::User => store.users.iter_mut().find(|u| u.id == id).map(|u| {
                apply_status(
                    &mut u.status,
                    &mut u.status_reason,
                    &mut u.updated_by,
                    &mut u.updated_at,
                    change,
                )
            }),
            AccountKind::Provider => store.providers.iter_mut().find(|p| p.id == id).map(|p| {
                apply_status(
                    &mut p.status,
                    &mut p.status_reason,
                    &mut p.updated_by,
                    &mut p.updated_at,
                    change,
                )
            }),
            AccountKind::Workspace => store.workspaces.iter_mut().find(|w| w.id == id).map(|w| {
                apply_status(
                    &mut w.status,
                    &mut w.status_reason,
                    &mut w.reviewed_by,
                    &mut w.updated_at,
                    change,
                )
            }),
        };
        Ok(found.is_some())
    }

    async fn soft_delete_account(
        &self,
        kind: AccountKind,
        id: Uuid,
        reason: Option<String>,
        actor: Uuid,
    ) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        let found = match kind {
            AccountKind::User => store.users.iter_mut().find(|u| u.id == id).map(|u| {
                apply_soft_delete(
                    &mut u.status,
                    &mut u.status_reason,
                    &mut u.deleted_by,
                    &mut u.deleted_at,
                    reason,
                    actor,
                )
            }),
            AccountKind::Provider => store.providers.iter_mut().find(|p| p.id == id).map(|p| {
                apply_soft_delete(
                    &mut p.status,
                    &mut p.status_reason,
                    &mut p.deleted_by,
                    &mut p.deleted_at,
                    reason,
                    actor,
                )
            }),
            AccountKind::Workspace => store.workspaces.iter_mut().find(|w| w.id == id).map(|w| {
                apply_soft_delete(
                    &mut w.status,
                    &mut w.status_reason,
                    &mut w.deleted_by,
                    &mut w.deleted_at,
                    reason,
                    actor,
                )
            }),
        };
        Ok(found.is_some())
    }

    async fn list_providers(
        &self,
        filter: &ProviderFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Provider>> {
        let store = self.store.read().await;
        let mut providers: Vec<Provider> = store
            .providers
            .iter()
            .filter(|p| filter.status.is_none_or(|s| p.status == s))
            .cloned()
            .collect();
        newest_first(&mut providers, |p| p.created_at);
        Ok(page.slice(providers))
    }

    async fn get_provider(&self, id: Uuid) -> RepoResult<Option<Provider>> {
        let store = self.store.read().await;
        Ok(store.providers.iter().find(|p| p.id == id).cloned())
    }

    async fn count_workspaces_by_owner(&self, owner_id: Uuid) -> RepoResult<i64> {
        let store = self.store.read().await;
        Ok(store
            .workspaces
            .iter()
            .filter(|w| w.owner_id == owner_id)
            .count() as i64)
    }

    async fn list_workspaces(
        &self,
        filter: &WorkspaceFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Workspace>> {
        let store = self.store.read().await;
        let mut workspaces: Vec<Workspace> = store
            .workspaces
            .iter()
            .filter(|w| filter.status.is_none_or(|s| w.status == s))
            .filter(|w| filter.owner_id.is_none_or(|o| w.owner_id == o))
            .cloned()
            .collect();
        newest_first(&mut workspaces, |w| w.created_at);
        Ok(page.slice(workspaces))
    }

    async fn get_workspace(&self, id: Uuid) -> RepoResult<Option<Workspace>> {
        let store = self.store.read().await;
        Ok(store.workspaces.iter().find(|w| w.id == id).cloned())
    }

    async fn update_provider_profile(
        &self,
        id: Uuid,
        update: ProviderProfileUpdate,
    ) -> RepoResult<Option<Provider>> {
        let mut store = self.store.write().await;
        if let Some(email) = &update.email {
            if store.providers.iter().any(|p| p.id != id && &p.email == email) {
                return Err(RepoError::Conflict("providers.email".to_string()));
            }
        }
        let Some(provider) = store.providers.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(business_name) = update.business_name {
            provider.business_name = business_name;
        }
        if let Some(email) = update.email {
            provider.email = email;
        }
        if let Some(phone) = update.phone {
            provider.phone = Some(phone);
        }
        provider.updated_by = Some(update.actor);
        provider.updated_at = Utc::now();
        Ok(Some(provider.clone()))
    }

    async fn create_workspace(&self, workspace: NewWorkspace) -> RepoResult<Workspace> {
        let now = Utc::now();
        let record = Workspace {
            id: Uuid::new_v4(),
            owner_id: workspace.owner_id,
            space_name: workspace.space_name,
            location: workspace.location,
            price_per_hour: workspace.price_per_hour,
            status: AccountStatus::Pending,
            status_reason: None,
            reviewed_by: None,
            deleted_by: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        self.store.write().await.workspaces.push(record.clone());
        Ok(record)
    }

    async fn update_workspace(
        &self,
        id: Uuid,
        update: WorkspaceUpdate,
    ) -> RepoResult<Option<Workspace>> {
        let mut store = self.store.write().await;
        let Some(workspace) = store.workspaces.iter_mut().find(|w| w.id == id) else {
            return Ok(None);
        };
        if let Some(space_name) = update.space_name {
            workspace.space_name = space_name;
        }
        if let Some(location) = update.location {
            workspace.location = location;
        }
        if let Some(price_per_hour) = update.price_per_hour {
            workspace.price_per_hour = price_per_hour;
        }
        workspace.updated_at = Utc::now();
        Ok(Some(workspace.clone()))
    }

    async fn delete_workspace(&self, id: Uuid) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        let before = store.workspaces.len();
        store.workspaces.retain(|w| w.id != id);
        let removed = store.workspaces.len() < before;
        if removed {
            store.workspace_blocks.retain(|b| b.workspace_id != id);
        }
        Ok(removed)
    }

    async fn add_workspace_block(&self, block: NewWorkspaceBlock) -> RepoResult<WorkspaceBlock> {
        let record = WorkspaceBlock {
            id: Uuid::new_v4(),
            workspace_id: block.workspace_id,
            start_date: block.start_date,
            end_date: block.end_date,
            created_by: block.created_by,
            created_at: Utc::now(),
        };
        self.store.write().await.workspace_blocks.push(record.clone());
        Ok(record)
    }

    async fn list_workspace_blocks(&self, workspace_id: Uuid) -> RepoResult<Vec<WorkspaceBlock>> {
        let store = self.store.read().await;
        let mut blocks: Vec<WorkspaceBlock> = store
            .workspace_blocks
            .iter()
            .filter(|b| b.workspace_id == workspace_id)
            .cloned()
            .collect();
        blocks.sort_by_key(|b| b.start_date);
        Ok(blocks)
    }

    async fn delete_workspace_block(
        &self,
        workspace_id: Uuid,
        block_id: Uuid,
    ) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        let before = store.workspace_blocks.len();
        store
            .workspace_blocks
            .retain(|b| !(b.id == block_id && b.workspace_id == workspace_id));
        Ok(store.workspace_blocks.len() < before)
    }

    async fn list_bookings(
        &self,
        filter: &BookingFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Booking>> {
        let store = self.store.read().await;
        let mut bookings: Vec<Booking> = store
            .bookings
            .iter()
            .filter(|b| filter.status.is_none_or(|s| b.status == s))
            .filter(|b| filter.user_id.is_none_or(|id| b.user_id == id))
            .filter(|b| filter.workspace_id.is_none_or(|id| b.workspace_id == id))
            .filter(|b| filter.provider_id.is_none_or(|id| b.provider_id == id))
            .filter(|b| filter.start_from.is_none_or(|from| b.start_date >= from))
            .filter(|b| filter.start_before.is_none_or(|before| b.start_date < before))
            .cloned()
            .collect();
        newest_first(&mut bookings, |b| b.created_at);
        Ok(page.slice(bookings))
    }

    async fn get_booking(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        let store = self.store.read().await;
        Ok(store.bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn all_bookings(&self) -> RepoResult<Vec<Booking>> {
        Ok(self.store.read().await.bookings.clone())
    }

    async fn cancel_booking(&self, id: Uuid, reason: String, actor: Uuid) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        Ok(match store.bookings.iter_mut().find(|b| b.id == id) {
            Some(booking) => {
                booking.status = crate::models::BookingStatus::Cancelled;
                booking.cancellation_reason = Some(reason);
                booking.cancelled_by = Some(actor);
                booking.cancelled_at = Some(Utc::now());
                true
            }
            None => false,
        })
    }

    async fn list_payments(
        &self,
        filter: &PaymentFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Payment>> {
        let store = self.store.read().await;
        let mut payments: Vec<Payment> = store
            .payments
            .iter()
            .filter(|p| filter.status.is_none_or(|s| p.status == s))
            .cloned()
            .collect();
        newest_first(&mut payments, |p| p.created_at);
        Ok(page.slice(payments))
    }

    async fn get_payment(&self, id: Uuid) -> RepoResult<Option<Payment>> {
        let store = self.store.read().await;
        Ok(store.payments.iter().find(|p| p.id == id).cloned())
    }

    async fn find_payment_by_booking(&self, booking_id: Uuid) -> RepoResult<Option<Payment>> {
        let store = self.store.read().await;
        Ok(store
            .payments
            .iter()
            .find(|p| p.booking_id == booking_id)
            .cloned())
    }

    async fn create_payment(&self, payment: NewPayment) -> RepoResult<Payment> {
        let (platform_fee, provider_amount) = split_platform_fee(payment.amount);
        let now = Utc::now();
        let record = Payment {
            id: Uuid::new_v4(),
            booking_id: payment.booking_id,
            user_id: payment.user_id,
            provider_id: payment.provider_id,
            amount: payment.amount,
            platform_fee,
            provider_amount,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.store.write().await.payments.push(record.clone());
        Ok(record)
    }

    async fn all_payments(&self) -> RepoResult<Vec<Payment>> {
        Ok(self.store.read().await.payments.clone())
    }

    async fn record_payment_webhook(
        &self,
        provider: &str,
        payload: serde_json::Value,
    ) -> RepoResult<Uuid> {
        let id = Uuid::new_v4();
        self.store
            .write()
            .await
            .webhooks
            .push((id, provider.to_string(), payload));
        Ok(id)
    }

    async fn list_reviews(
        &self,
        filter: &ReviewFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Review>> {
        let store = self.store.read().await;
        let mut reviews: Vec<Review> = store
            .reviews
            .iter()
            .filter(|r| match filter.status {
                Some(status) => r.status == status,
                None => r.status != ReviewStatus::Deleted,
            })
            .filter(|r| filter.rating.is_none_or(|rating| r.rating == rating))
            .filter(|r| filter.min_rating.is_none_or(|min| r.rating >= min))
            .filter(|r| filter.max_rating.is_none_or(|max| r.rating <= max))
            .cloned()
            .collect();
        newest_first(&mut reviews, |r| r.created_at);
        Ok(page.slice(reviews))
    }

    async fn soft_delete_review(&self, id: Uuid, reason: String, actor: Uuid) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        Ok(match store.reviews.iter_mut().find(|r| r.id == id) {
            Some(review) => {
                review.status = ReviewStatus::Deleted;
                review.deletion_reason = Some(reason);
                review.deleted_by = Some(actor);
                review.deleted_at = Some(Utc::now());
                true
            }
            None => false,
        })
    }

    async fn flag_review(
        &self,
        id: Uuid,
        flag: bool,
        reason: Option<String>,
        actor: Uuid,
    ) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        Ok(match store.reviews.iter_mut().find(|r| r.id == id) {
            Some(review) => {
                review.flagged = flag;
                review.flag_reason = Some(reason.unwrap_or_default());
                review.flagged_at = flag.then(Utc::now);
                review.flagged_by = flag.then_some(actor);
                true
            }
            None => false,
        })
    }

    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Notification>> {
        let store = self.store.read().await;
        let mut notifications: Vec<Notification> = store
            .notifications
            .iter()
            .filter(|n| filter.recipient_type.is_none_or(|t| n.recipient_type == t))
            .filter(|n| filter.is_read.is_none_or(|read| n.is_read == read))
            .cloned()
            .collect();
        newest_first(&mut notifications, |n| n.created_at);
        Ok(page.slice(notifications))
    }

    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> RepoResult<Notification> {
        let record = Notification {
            id: Uuid::new_v4(),
            user_id: notification.user_id,
            recipient_type: notification.recipient_type,
            title: notification.title,
            message: notification.message,
            notification_type: notification.notification_type,
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        };
        self.store.write().await.notifications.push(record.clone());
        Ok(record)
    }

    async fn mark_notification_read(&self, id: Uuid) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        Ok(match store.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                notification.read_at = Some(Utc::now());
                true
            }
            None => false,
        })
    }

    async fn delete_notification(&self, id: Uuid) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        let before = store.notifications.len();
        store.notifications.retain(|n| n.id != id);
        Ok(store.notifications.len() < before)
    }

    async fn record_audit(&self, entry: NewAuditLog) -> RepoResult<()> {
        let log = AuditLog {
            id: Uuid::new_v4(),
            admin_id: entry.admin_id,
            action: entry.action,
            target_type: entry.target_type,
            target_id: entry.target_id,
            details: entry.details,
            timestamp: Utc::now(),
        };
        self.store.write().await.audit_logs.push(log);
        Ok(())
    }

    async fn list_audit_logs(
        &self,
        filter: &AuditLogFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<AuditLog>> {
        let store = self.store.read().await;
        let mut logs: Vec<AuditLog> = store
            .audit_logs
            .iter()
            .filter(|l| filter.action.as_deref().is_none_or(|a| l.action == a))
            .filter(|l| filter.admin_id.is_none_or(|id| l.admin_id == id))
            .cloned()
            .collect();
        newest_first(&mut logs, |l| l.timestamp);
        Ok(page.slice(logs))
    }

    async fn dashboard_counts(&self, since: DateTime<Utc>) -> RepoResult<DashboardCounts> {
        let store = self.store.read().await;
        let completed = || {
            store
                .payments
                .iter()
                .filter(|p| p.status == PaymentStatus::Completed)
        };
        Ok(DashboardCounts {
            total_users: store.users.len() as i64,
            new_users_since: store.users.iter().filter(|u| u.created_at >= since).count() as i64,
            total_providers: store.providers.len() as i64,
            active_providers: store
                .providers
                .iter()
                .filter(|p| p.status == AccountStatus::Active)
                .count() as i64,
            total_workspaces: store.workspaces.len() as i64,
            active_workspaces: store
                .workspaces
                .iter()
                .filter(|w| w.status == AccountStatus::Active)
                .count() as i64,
            total_revenue: completed().map(|p| p.amount).sum(),
            revenue_since: completed()
                .filter(|p| p.created_at >= since)
                .map(|p| p.amount)
                .sum(),
        })
    }

    async fn insert_user(&self, user: User) -> RepoResult<()> {
        self.store.write().await.users.push(user);
        Ok(())
    }

    async fn insert_provider(&self, provider: Provider) -> RepoResult<()> {
        self.store.write().await.providers.push(provider);
        Ok(())
    }

    async fn insert_workspace(&self, workspace: Workspace) -> RepoResult<()> {
        self.store.write().await.workspaces.push(workspace);
        Ok(())
    }

    async fn insert_booking(&self, booking: Booking) -> RepoResult<()> {
        self.store.write().await.bookings.push(booking);
        Ok(())
    }

    async fn insert_payment(&self, payment: Payment) -> RepoResult<()> {
        self.store.write().await.payments.push(payment);
        Ok(())
    }

    async fn insert_review(&self, review: Review) -> RepoResult<()> {
        self.store.write().await.reviews.push(review);
        Ok(())
    }
}
