use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, postgres::PgRow};
use uuid::Uuid;

use super::{
    AuditLogFilter, BookingFilter, DashboardCounts, NotificationFilter, PaymentFilter,
    ProviderFilter, RepoResult, Repository, ReviewFilter, UserFilter, WorkspaceFilter,
};
use crate::{
    error::RepoError,
    models::{
        AccountKind, AccountStatus, AdminProfileUpdate, AdminRecord, AdminRole, AuditLog,
        Booking, BookingStatus, NewAdmin, NewAuditLog, NewNotification, NewPayment, NewUser,
        NewWorkspace, NewWorkspaceBlock, Notification, Payment, Provider, ProviderProfileUpdate,
        Review, StatusChange, User, Workspace, WorkspaceBlock, WorkspaceUpdate,
        split_platform_fee,
    },
    pagination::{PageRequest, Paged},
};

/// PostgresRepository
///
/// `Repository` backed by PostgreSQL. Listing predicates are pushed through `QueryBuilder`
/// so every client-supplied value is a bound parameter.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the same predicate twice: once under `COUNT(*)` for the total, once under the
    /// paged `SELECT`.
    async fn fetch_page<T, F>(
        &self,
        table: &str,
        order_by: &str,
        page: PageRequest,
        push_filter: F,
    ) -> RepoResult<Paged<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
        F: Fn(&mut QueryBuilder<'_, Postgres>),
    {
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT COUNT(*) FROM {table} WHERE TRUE"));
        push_filter(&mut count);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut select: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT * FROM {table} WHERE TRUE"));
        push_filter(&mut select);
        select.push(format!(" ORDER BY {order_by} DESC LIMIT "));
        select.push_bind(i64::from(page.limit));
        select.push(" OFFSET ");
        select.push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
        let items = select.build_query_as::<T>().fetch_all(&self.pool).await?;

        Ok(Paged {
            items,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }
}

fn conflict_or(err: sqlx::Error, target: &str) -> RepoError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Conflict(target.to_string())
        }
        _ => err.into(),
    }
}

/// ILIKE pattern matching `search` literally anywhere in the column. Pairs with
/// `ESCAPE '\'`.
fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn get_admin(&self, id: Uuid) -> RepoResult<Option<AdminRecord>> {
        Ok(sqlx::query_as("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_admin_by_email(&self, email: &str) -> RepoResult<Option<AdminRecord>> {
        Ok(sqlx::query_as("SELECT * FROM admins WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_admins(&self) -> RepoResult<Vec<AdminRecord>> {
        Ok(sqlx::query_as("SELECT * FROM admins ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create_admin(&self, admin: NewAdmin) -> RepoResult<AdminRecord> {
        sqlx::query_as(
            r#"
            INSERT INTO admins (id, email, full_name, password_hash, role, status, phone)
            VALUES ($1, $2, $3, $4, $5, 'active', $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&admin.email)
        .bind(&admin.full_name)
        .bind(&admin.password_hash)
        .bind(admin.role.as_str())
        .bind(&admin.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or(e, "admins.email"))
    }

    async fn update_admin_profile(
        &self,
        id: Uuid,
        update: AdminProfileUpdate,
    ) -> RepoResult<Option<AdminRecord>> {
        // COALESCE keeps the stored value for every field left out of the update.
        sqlx::query_as(
            r#"
            UPDATE admins SET
                full_name = COALESCE($1, full_name),
                email = COALESCE($2, email),
                phone = COALESCE($3, phone),
                updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(update.full_name)
        .bind(update.email)
        .bind(update.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_or(e, "admins.email"))
    }

    async fn update_admin_password(&self, id: Uuid, password_hash: &str) -> RepoResult<bool> {
        let result =
            sqlx::query("UPDATE admins SET password_hash = $1, updated_at = NOW() WHERE id = $2")
                .bind(password_hash)
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_admin_role(&self, id: Uuid, role: AdminRole) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE admins SET role = $1, updated_at = NOW() WHERE id = $2")
            .bind(role.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_admin(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_users(&self, filter: &UserFilter, page: PageRequest) -> RepoResult<Paged<User>> {
        self.fetch_page("users", "created_at", page, |b| {
            if let Some(status) = filter.status {
                b.push(" AND status = ").push_bind(status.as_str());
            }
            if let Some(search) = &filter.search {
                let pattern = contains_pattern(search);
                b.push(" AND (full_name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" ESCAPE '\\' OR email ILIKE ")
                    .push_bind(pattern)
                    .push(" ESCAPE '\\')");
            }
        })
        .await
    }

    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_user(&self, user: NewUser) -> RepoResult<User> {
        sqlx::query_as(
            r#"
            INSERT INTO users (id, email, full_name, phone_number, password_hash, status, created_by)
            VALUES ($1, $2, $3, $4, $5, 'active', $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.phone_number)
        .bind(&user.password_hash)
        .bind(user.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or(e, "users.email"))
    }

    async fn set_account_status(
        &self,
        kind: AccountKind,
        id: Uuid,
        change: StatusChange,
    ) -> RepoResult<bool> {
        let sql = format!(
            "UPDATE {} SET status = $1, status_reason = $2, {} = $3, updated_at = NOW() WHERE id = $4",
            kind.table(),
            kind.actor_column()
        );
        let result = sqlx::query(&sql)
            .bind(change.status.as_str())
            .bind(change.reason)
            .bind(change.actor)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete_account(
        &self,
        kind: AccountKind,
        id: Uuid,
        reason: Option<String>,
        actor: Uuid,
    ) -> RepoResult<bool> {
        let sql = format!(
            "UPDATE {} SET status = 'deleted', status_reason = $1, deleted_by = $2, \
             deleted_at = NOW(), updated_at = NOW() WHERE id = $3",
            kind.table()
        );
        let result = sqlx::query(&sql)
            .bind(reason.unwrap_or_default())
            .bind(actor)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_providers(
        &self,
        filter: &ProviderFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Provider>> {
        self.fetch_page("providers", "created_at", page, |b| {
            if let Some(status) = filter.status {
                b.push(" AND status = ").push_bind(status.as_str());
            }
        })
        .await
    }

    async fn get_provider(&self, id: Uuid) -> RepoResult<Option<Provider>> {
        Ok(sqlx::query_as("SELECT * FROM providers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn count_workspaces_by_owner(&self, owner_id: Uuid) -> RepoResult<i64> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM workspaces WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn list_workspaces(
        &self,
        filter: &WorkspaceFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Workspace>> {
        self.fetch_page("workspaces", "created_at", page, |b| {
            if let Some(status) = filter.status {
                b.push(" AND status = ").push_bind(status.as_str());
            }
            if let Some(owner_id) = filter.owner_id {
                b.push(" AND owner_id = ").push_bind(owner_id);
            }
        })
        .await
    }

    async fn get_workspace(&self, id: Uuid) -> RepoResult<Option<Workspace>> {
        Ok(sqlx::query_as("SELECT * FROM workspaces WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_provider_profile(
        &self,
        id: Uuid,
        update: ProviderProfileUpdate,
    ) -> RepoResult<Option<Provider>> {
        sqlx::query_as(
            r#"
            UPDATE providers SET
                business_name = COALESCE($1, business_name),
                email = COALESCE($2, email),
                phone = COALESCE($3, phone),
                updated_by = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(update.business_name)
        .bind(update.email)
        .bind(update.phone)
        .bind(update.actor)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_or(e, "providers.email"))
    }

    async fn create_workspace(&self, workspace: NewWorkspace) -> RepoResult<Workspace> {
        Ok(sqlx::query_as(
            r#"
            INSERT INTO workspaces (id, owner_id, space_name, location, price_per_hour, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(workspace.owner_id)
        .bind(&workspace.space_name)
        .bind(&workspace.location)
        .bind(workspace.price_per_hour)
        .bind(AccountStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_workspace(
        &self,
        id: Uuid,
        update: WorkspaceUpdate,
    ) -> RepoResult<Option<Workspace>> {
        Ok(sqlx::query_as(
            r#"
            UPDATE workspaces SET
                space_name = COALESCE($1, space_name),
                location = COALESCE($2, location),
                price_per_hour = COALESCE($3, price_per_hour),
                updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(update.space_name)
        .bind(update.location)
        .bind(update.price_per_hour)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_workspace(&self, id: Uuid) -> RepoResult<bool> {
        // workspace_blocks rows go with it (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM workspaces WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_workspace_block(&self, block: NewWorkspaceBlock) -> RepoResult<WorkspaceBlock> {
        Ok(sqlx::query_as(
            r#"
            INSERT INTO workspace_blocks (id, workspace_id, start_date, end_date, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(block.workspace_id)
        .bind(block.start_date)
        .bind(block.end_date)
        .bind(block.created_by)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_workspace_blocks(&self, workspace_id: Uuid) -> RepoResult<Vec<WorkspaceBlock>> {
        Ok(sqlx::query_as(
            "SELECT * FROM workspace_blocks WHERE workspace_id = $1 ORDER BY start_date",
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete_workspace_block(
        &self,
        workspace_id: Uuid,
        block_id: Uuid,
    ) -> RepoResult<bool> {
        let result =
            sqlx::query("DELETE FROM workspace_blocks WHERE id = $1 AND workspace_id = $2")
                .bind(block_id)
                .bind(workspace_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_bookings(
        &self,
        filter: &BookingFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Booking>> {
        self.fetch_page("bookings", "created_at", page, |b| {
            if let Some(status) = filter.status {
                b.push(" AND status = ").push_bind(status.as_str());
            }
            if let Some(user_id) = filter.user_id {
                b.push(" AND user_id = ").push_bind(user_id);
            }
            if let Some(workspace_id) = filter.workspace_id {
                b.push(" AND workspace_id = ").push_bind(workspace_id);
            }
            if let Some(provider_id) = filter.provider_id {
                b.push(" AND provider_id = ").push_bind(provider_id);
            }
            if let Some(from) = filter.start_from {
                b.push(" AND start_date >= ").push_bind(from);
            }
            if let Some(before) = filter.start_before {
                b.push(" AND start_date < ").push_bind(before);
            }
        })
        .await
    }

    async fn get_booking(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        Ok(sqlx::query_as("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn all_bookings(&self) -> RepoResult<Vec<Booking>> {
        Ok(sqlx::query_as("SELECT * FROM bookings ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?)
    }

    async fn cancel_booking(&self, id: Uuid, reason: String, actor: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                status = $1,
                cancellation_reason = $2,
                cancelled_by = $3,
                cancelled_at = NOW()
            WHERE id = $4
            "#,
        )
        .bind(BookingStatus::Cancelled.as_str())
        .bind(reason)
        .bind(actor)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_payments(
        &self,
        filter: &PaymentFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Payment>> {
        self.fetch_page("payments", "created_at", page, |b| {
            if let Some(status) = filter.status {
                b.push(" AND status = ").push_bind(status.as_str());
            }
        })
        .await
    }

    async fn get_payment(&self, id: Uuid) -> RepoResult<Option<Payment>> {
        Ok(sqlx::query_as("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_payment_by_booking(&self, booking_id: Uuid) -> RepoResult<Option<Payment>> {
        Ok(sqlx::query_as(
            "SELECT * FROM payments WHERE booking_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_payment(&self, payment: NewPayment) -> RepoResult<Payment> {
        let (platform_fee, provider_amount) = split_platform_fee(payment.amount);
        Ok(sqlx::query_as(
            r#"
            INSERT INTO payments
                (id, booking_id, user_id, provider_id, amount, platform_fee, provider_amount, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(payment.booking_id)
        .bind(payment.user_id)
        .bind(payment.provider_id)
        .bind(payment.amount)
        .bind(platform_fee)
        .bind(provider_amount)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn all_payments(&self) -> RepoResult<Vec<Payment>> {
        Ok(sqlx::query_as("SELECT * FROM payments ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?)
    }

    async fn record_payment_webhook(
        &self,
        provider: &str,
        payload: serde_json::Value,
    ) -> RepoResult<Uuid> {
        Ok(sqlx::query_scalar(
            "INSERT INTO payment_webhooks (id, provider, payload) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(Uuid::new_v4())
        .bind(provider)
        .bind(sqlx::types::Json(payload))
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_reviews(
        &self,
        filter: &ReviewFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Review>> {
        self.fetch_page("reviews", "created_at", page, |b| {
            match filter.status {
                Some(status) => b.push(" AND status = ").push_bind(status.as_str()),
                None => b.push(" AND status <> 'deleted'"),
            };
            if let Some(rating) = filter.rating {
                b.push(" AND rating = ").push_bind(rating);
            }
            if let Some(min) = filter.min_rating {
                b.push(" AND rating >= ").push_bind(min);
            }
            if let Some(max) = filter.max_rating {
                b.push(" AND rating <= ").push_bind(max);
            }
        })
        .await
    }

    async fn soft_delete_review(&self, id: Uuid, reason: String, actor: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE reviews SET
                status = 'deleted',
                deletion_reason = $1,
                deleted_by = $2,
                deleted_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(reason)
        .bind(actor)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn flag_review(
        &self,
        id: Uuid,
        flag: bool,
        reason: Option<String>,
        actor: Uuid,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE reviews SET
                flagged = $1::BOOLEAN,
                flag_reason = $2,
                flagged_at = CASE WHEN $1::BOOLEAN THEN NOW() ELSE NULL END,
                flagged_by = CASE WHEN $1::BOOLEAN THEN $3::UUID ELSE NULL END
            WHERE id = $4
            "#,
        )
        .bind(flag)
        .bind(reason.unwrap_or_default())
        .bind(actor)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<Notification>> {
        self.fetch_page("notifications", "created_at", page, |b| {
            if let Some(recipient_type) = filter.recipient_type {
                b.push(" AND recipient_type = ")
                    .push_bind(recipient_type.as_str());
            }
            if let Some(is_read) = filter.is_read {
                b.push(" AND is_read = ").push_bind(is_read);
            }
        })
        .await
    }

    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> RepoResult<Notification> {
        Ok(sqlx::query_as(
            r#"
            INSERT INTO notifications (id, user_id, recipient_type, title, message, "type")
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(notification.user_id)
        .bind(notification.recipient_type.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.notification_type)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn mark_notification_read(&self, id: Uuid) -> RepoResult<bool> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE, read_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_notification(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn record_audit(&self, entry: NewAuditLog) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (id, admin_id, action, target_type, target_id, details)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.admin_id)
        .bind(&entry.action)
        .bind(&entry.target_type)
        .bind(entry.target_id)
        .bind(&entry.details)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_audit_logs(
        &self,
        filter: &AuditLogFilter,
        page: PageRequest,
    ) -> RepoResult<Paged<AuditLog>> {
        self.fetch_page("audit_logs", "timestamp", page, |b| {
            if let Some(action) = &filter.action {
                b.push(" AND action = ").push_bind(action.clone());
            }
            if let Some(admin_id) = filter.admin_id {
                b.push(" AND admin_id = ").push_bind(admin_id);
            }
        })
        .await
    }

    async fn dashboard_counts(&self, since: DateTime<Utc>) -> RepoResult<DashboardCounts> {
        Ok(sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM users WHERE created_at >= $1) AS new_users_since,
                (SELECT COUNT(*) FROM providers) AS total_providers,
                (SELECT COUNT(*) FROM providers WHERE status = 'active') AS active_providers,
                (SELECT COUNT(*) FROM workspaces) AS total_workspaces,
                (SELECT COUNT(*) FROM workspaces WHERE status = 'active') AS active_workspaces,
                (SELECT COALESCE(SUM(amount), 0)::FLOAT8 FROM payments
                    WHERE status = 'completed') AS total_revenue,
                (SELECT COALESCE(SUM(amount), 0)::FLOAT8 FROM payments
                    WHERE status = 'completed' AND created_at >= $1) AS revenue_since
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn insert_user(&self, user: User) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users
                (id, email, full_name, phone_number, status, status_reason, created_by,
                 updated_by, deleted_by, deleted_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.phone_number)
        .bind(user.status.as_str())
        .bind(&user.status_reason)
        .bind(user.created_by)
        .bind(user.updated_by)
        .bind(user.deleted_by)
        .bind(user.deleted_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or(e, "users.email"))?;
        Ok(())
    }

    async fn insert_provider(&self, provider: Provider) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO providers
                (id, email, business_name, full_name, phone, status, status_reason,
                 updated_by, deleted_by, deleted_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(provider.id)
        .bind(&provider.email)
        .bind(&provider.business_name)
        .bind(&provider.full_name)
        .bind(&provider.phone)
        .bind(provider.status.as_str())
        .bind(&provider.status_reason)
        .bind(provider.updated_by)
        .bind(provider.deleted_by)
        .bind(provider.deleted_at)
        .bind(provider.created_at)
        .bind(provider.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or(e, "providers.email"))?;
        Ok(())
    }

    async fn insert_workspace(&self, workspace: Workspace) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO workspaces
                (id, owner_id, space_name, location, price_per_hour, status, status_reason,
                 reviewed_by, deleted_by, deleted_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(workspace.id)
        .bind(workspace.owner_id)
        .bind(&workspace.space_name)
        .bind(&workspace.location)
        .bind(workspace.price_per_hour)
        .bind(workspace.status.as_str())
        .bind(&workspace.status_reason)
        .bind(workspace.reviewed_by)
        .bind(workspace.deleted_by)
        .bind(workspace.deleted_at)
        .bind(workspace.created_at)
        .bind(workspace.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_booking(&self, booking: Booking) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, user_id, workspace_id, provider_id, booking_plan, start_date, end_date,
                 total_amount, status, cancellation_reason, cancelled_by, cancelled_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.workspace_id)
        .bind(booking.provider_id)
        .bind(&booking.booking_plan)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.total_amount)
        .bind(booking.status.as_str())
        .bind(&booking.cancellation_reason)
        .bind(booking.cancelled_by)
        .bind(booking.cancelled_at)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_payment(&self, payment: Payment) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payments
                (id, booking_id, user_id, provider_id, amount, platform_fee, provider_amount,
                 status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(payment.id)
        .bind(payment.booking_id)
        .bind(payment.user_id)
        .bind(payment.provider_id)
        .bind(payment.amount)
        .bind(payment.platform_fee)
        .bind(payment.provider_amount)
        .bind(payment.status.as_str())
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_review(&self, review: Review) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews
                (id, user_id, workspace_id, rating, comment, status, flagged, flag_reason,
                 flagged_at, flagged_by, deletion_reason, deleted_by, deleted_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(review.id)
        .bind(review.user_id)
        .bind(review.workspace_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.status.as_str())
        .bind(review.flagged)
        .bind(&review.flag_reason)
        .bind(review.flagged_at)
        .bind(review.flagged_by)
        .bind(&review.deletion_reason)
        .bind(review.deleted_by)
        .bind(review.deleted_at)
        .bind(review.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
