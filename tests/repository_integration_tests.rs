//! Postgres-backed repository tests. They need a reachable `DATABASE_URL` and are
//! ignored by default: `cargo test -- --ignored`.

mod common;

use chrono::Utc;
use masahatak_admin::{
    error::RepoError,
    models::{
        AccountKind, AccountStatus, AdminRole, BookingStatus, NewAdmin, NewAuditLog, NewPayment,
        NewUser, NewWorkspace, NewWorkspaceBlock, ProviderProfileUpdate, ReviewStatus,
        StatusChange, WorkspaceUpdate,
    },
    pagination::PageRequest,
    repository::{
        AuditLogFilter, BookingFilter, PostgresRepository, Repository, ReviewFilter, UserFilter,
    },
};
use sqlx::PgPool;
use uuid::Uuid;

use common::{booking, provider, review, user, workspace};

// --- Test Context and Setup ---

struct DbTestContext {
    pool: PgPool,
}

impl DbTestContext {
    async fn setup() -> Self {
        dotenv::dotenv().ok();

        let db_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set to run integration tests");

        let pool = PgPool::connect(&db_url)
            .await
            .expect("Failed to connect to database for integration tests.");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run database migrations.");

        DbTestContext { pool }
    }

    fn repository(&self) -> PostgresRepository {
        PostgresRepository::new(self.pool.clone())
    }
}

/// Address unique to this run, so tests can share a database.
fn unique_email(prefix: &str) -> String {
    format!("{prefix}.{}@test.masahatak.com", Uuid::new_v4().simple())
}

fn new_admin(email: &str) -> NewAdmin {
    NewAdmin {
        email: email.to_string(),
        full_name: "Repo Test Admin".to_string(),
        password_hash: "$2b$04$not-a-real-hash".to_string(),
        role: AdminRole::Admin,
        phone: None,
    }
}

// --- Administrators ---

#[tokio::test]
#[ignore]
async fn test_admin_create_conflict_role_and_delete() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let email = unique_email("admin");

    let admin = repo.create_admin(new_admin(&email)).await.unwrap();
    assert_eq!(admin.role, AdminRole::Admin);
    assert_eq!(admin.status, AccountStatus::Active);

    let duplicate = repo.create_admin(new_admin(&email)).await;
    assert!(matches!(duplicate, Err(RepoError::Conflict(_))));

    assert!(repo
        .update_admin_role(admin.id, AdminRole::SuperAdmin)
        .await
        .unwrap());
    let found = repo.find_admin_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found.role, AdminRole::SuperAdmin);

    assert!(repo.delete_admin(admin.id).await.unwrap());
    assert!(repo.get_admin(admin.id).await.unwrap().is_none());
    assert!(!repo.delete_admin(admin.id).await.unwrap());
}

// --- Users ---

#[tokio::test]
#[ignore]
async fn test_user_search_status_and_soft_lifecycle() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let marker = Uuid::new_v4().simple().to_string();
    let actor = Uuid::new_v4();

    let created = repo
        .create_user(NewUser {
            email: format!("{marker}@test.masahatak.com"),
            full_name: "Searchable Person".to_string(),
            phone_number: "+962790000000".to_string(),
            password_hash: "hash".to_string(),
            created_by: actor,
        })
        .await
        .unwrap();
    assert_eq!(created.status, AccountStatus::Active);
    assert_eq!(created.created_by, Some(actor));

    let filter = UserFilter {
        search: Some(marker.to_uppercase()),
        ..Default::default()
    };
    let page = repo
        .list_users(&filter, PageRequest::new(None, None, 10))
        .await
        .unwrap();
    assert_eq!(page.total, 1);

    let changed = repo
        .set_account_status(
            AccountKind::User,
            created.id,
            StatusChange {
                status: AccountStatus::Suspended,
                reason: Some("Chargebacks".to_string()),
                actor,
            },
        )
        .await
        .unwrap();
    assert!(changed);

    let suspended = UserFilter {
        status: Some(AccountStatus::Suspended),
        search: Some(marker.clone()),
    };
    let page = repo
        .list_users(&suspended, PageRequest::new(None, None, 10))
        .await
        .unwrap();
    assert_eq!(page.items[0].status_reason.as_deref(), Some("Chargebacks"));
    assert_eq!(page.items[0].updated_by, Some(actor));

    assert!(repo
        .soft_delete_account(AccountKind::User, created.id, None, actor)
        .await
        .unwrap());
    let stored = repo.get_user(created.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AccountStatus::Deleted);
    assert_eq!(stored.deleted_by, Some(actor));

    let missing = repo
        .set_account_status(
            AccountKind::User,
            Uuid::new_v4(),
            StatusChange {
                status: AccountStatus::Active,
                reason: None,
                actor,
            },
        )
        .await
        .unwrap();
    assert!(!missing);
}

#[tokio::test]
#[ignore]
async fn test_user_search_escapes_like_wildcards() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let marker = Uuid::new_v4().simple().to_string();

    for email in [
        format!("{marker}_50%@test.masahatak.com"),
        format!("{marker}x50y@test.masahatak.com"),
    ] {
        repo.insert_user(user(&email, AccountStatus::Active, Utc::now()))
            .await
            .unwrap();
    }

    let filter = UserFilter {
        search: Some(format!("{marker}_50%")),
        ..Default::default()
    };
    let page = repo
        .list_users(&filter, PageRequest::new(None, None, 10))
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert!(page.items[0].email.contains("_50%"));
}

// --- Bookings & Payments ---

#[tokio::test]
#[ignore]
async fn test_booking_cancel_and_payment_intent() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let customer = user(&unique_email("customer"), AccountStatus::Active, Utc::now());
    repo.insert_user(customer.clone()).await.unwrap();
    let space = workspace(Uuid::new_v4(), "Repo Test Desk");
    repo.insert_workspace(space.clone()).await.unwrap();

    let row = booking(customer.id, space.id, BookingStatus::Upcoming, 80.0);
    repo.insert_booking(row.clone()).await.unwrap();

    let filter = BookingFilter {
        user_id: Some(customer.id),
        status: Some(BookingStatus::Upcoming),
        ..Default::default()
    };
    let page = repo.list_bookings(&filter, PageRequest::all()).await.unwrap();
    assert_eq!(page.total, 1);

    let actor = Uuid::new_v4();
    assert!(repo
        .cancel_booking(row.id, "Overbooked".to_string(), actor)
        .await
        .unwrap());
    let stored = repo.get_booking(row.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Cancelled);
    assert_eq!(stored.cancelled_by, Some(actor));
    assert!(stored.cancelled_at.is_some());

    let payment = repo
        .create_payment(NewPayment {
            booking_id: row.id,
            user_id: row.user_id,
            provider_id: row.provider_id,
            amount: row.total_amount,
        })
        .await
        .unwrap();
    assert_eq!(payment.platform_fee, 8.0);
    assert_eq!(payment.provider_amount, 72.0);

    let linked = repo.find_payment_by_booking(row.id).await.unwrap().unwrap();
    assert_eq!(linked.id, payment.id);
}

// --- Owner tools ---

#[tokio::test]
#[ignore]
async fn test_owner_profile_spaces_and_blocks() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let actor = Uuid::new_v4();

    let mut owner = provider("Repo Owner", AccountStatus::Active);
    owner.email = unique_email("owner");
    let mut rival = provider("Repo Rival", AccountStatus::Active);
    rival.email = unique_email("rival");
    repo.insert_provider(owner.clone()).await.unwrap();
    repo.insert_provider(rival.clone()).await.unwrap();

    let clash = repo
        .update_provider_profile(
            owner.id,
            ProviderProfileUpdate {
                business_name: None,
                email: Some(rival.email.clone()),
                phone: None,
                actor,
            },
        )
        .await;
    assert!(matches!(clash, Err(RepoError::Conflict(_))));

    let renamed = repo
        .update_provider_profile(
            owner.id,
            ProviderProfileUpdate {
                business_name: Some("Renamed Owner".to_string()),
                email: None,
                phone: None,
                actor,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.business_name, "Renamed Owner");
    assert_eq!(renamed.email, owner.email);
    assert_eq!(renamed.updated_by, Some(actor));

    let space = repo
        .create_workspace(NewWorkspace {
            owner_id: owner.id,
            space_name: "Repo Loft".to_string(),
            location: "Irbid".to_string(),
            price_per_hour: 4.0,
        })
        .await
        .unwrap();
    assert_eq!(space.status, AccountStatus::Pending);

    let updated = repo
        .update_workspace(
            space.id,
            WorkspaceUpdate {
                price_per_hour: Some(6.0),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.price_per_hour, 6.0);
    assert_eq!(updated.space_name, "Repo Loft");

    let now = Utc::now();
    let block = repo
        .add_workspace_block(NewWorkspaceBlock {
            workspace_id: space.id,
            start_date: now,
            end_date: now + chrono::Duration::days(2),
            created_by: actor,
        })
        .await
        .unwrap();
    assert!(!repo.delete_workspace_block(Uuid::new_v4(), block.id).await.unwrap());
    assert_eq!(repo.list_workspace_blocks(space.id).await.unwrap().len(), 1);

    assert!(repo.delete_workspace(space.id).await.unwrap());
    assert!(repo.list_workspace_blocks(space.id).await.unwrap().is_empty());
    assert!(!repo.delete_workspace(space.id).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_bookings_filter_by_provider() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let owner = Uuid::new_v4();

    let mut mine = booking(Uuid::new_v4(), Uuid::new_v4(), BookingStatus::Completed, 20.0);
    mine.provider_id = owner;
    repo.insert_booking(mine.clone()).await.unwrap();
    repo.insert_booking(booking(
        Uuid::new_v4(),
        Uuid::new_v4(),
        BookingStatus::Completed,
        20.0,
    ))
    .await
    .unwrap();

    let filter = BookingFilter {
        provider_id: Some(owner),
        ..Default::default()
    };
    let page = repo.list_bookings(&filter, PageRequest::all()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, mine.id);
}

// --- Reviews ---

#[tokio::test]
#[ignore]
async fn test_review_moderation() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let space = Uuid::new_v4();
    let target = review(Uuid::new_v4(), space, 1, ReviewStatus::Active);
    repo.insert_review(target.clone()).await.unwrap();

    let actor = Uuid::new_v4();
    assert!(repo
        .flag_review(target.id, true, Some("Abusive".to_string()), actor)
        .await
        .unwrap());
    assert!(repo
        .soft_delete_review(target.id, "Content violation".to_string(), actor)
        .await
        .unwrap());

    let filter = ReviewFilter {
        status: Some(ReviewStatus::Deleted),
        rating: Some(1),
        ..Default::default()
    };
    let page = repo.list_reviews(&filter, PageRequest::all()).await.unwrap();
    let stored = page
        .items
        .into_iter()
        .find(|r| r.id == target.id)
        .expect("deleted review is listed under status=deleted");
    assert!(stored.flagged);
    assert_eq!(stored.flagged_by, Some(actor));
    assert_eq!(stored.deletion_reason.as_deref(), Some("Content violation"));
}

// --- Audit trail ---

#[tokio::test]
#[ignore]
async fn test_audit_log_filter_by_admin_and_action() {
    let ctx = DbTestContext::setup().await;
    let repo = ctx.repository();
    let admin = repo
        .create_admin(new_admin(&unique_email("auditor")))
        .await
        .unwrap();

    for action in ["user.deleted", "user.deleted", "booking.cancelled"] {
        repo.record_audit(NewAuditLog {
            admin_id: admin.id,
            action: action.to_string(),
            target_type: "user".to_string(),
            target_id: Some(Uuid::new_v4()),
            details: None,
        })
        .await
        .unwrap();
    }

    let filter = AuditLogFilter {
        action: Some("user.deleted".to_string()),
        admin_id: Some(admin.id),
    };
    let page = repo
        .list_audit_logs(&filter, PageRequest::new(None, Some(1), 50))
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 1);
}
