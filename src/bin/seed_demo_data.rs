//! Fills an empty database with a small, deterministic marketplace so the dashboard has
//! something to show: users, providers, workspaces, bookings, payments, reviews and
//! notifications. Running it twice inserts a second batch.

use chrono::{Duration, Utc};
use masahatak_admin::{
    AppConfig, PostgresRepository,
    models::{
        AccountStatus, Booking, BookingStatus, NewNotification, Payment, PaymentStatus, Provider,
        RecipientType, Review, ReviewStatus, User, Workspace, split_platform_fee,
    },
    repository::Repository,
};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

const FIRST_NAMES: [&str; 6] = ["Ahmad", "Lina", "Omar", "Sara", "Yousef", "Rana"];
const CITIES: [&str; 4] = ["Amman", "Irbid", "Zarqa", "Aqaba"];
const PLANS: [&str; 4] = ["hourly", "daily", "weekly", "monthly"];
const BOOKING_STATUSES: [BookingStatus; 5] = [
    BookingStatus::Completed,
    BookingStatus::Upcoming,
    BookingStatus::Confirmed,
    BookingStatus::Cancelled,
    BookingStatus::Pending,
];
const COMMENTS: [&str; 4] = [
    "Great workspace, very comfortable and well equipped.",
    "Good value for money. Will book again.",
    "Nice space but a bit noisy.",
    "Clean and professional environment.",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed_demo_data=info".into()),
        )
        .init();

    let config = AppConfig::load();
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.db_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    let repo = PostgresRepository::new(pool);

    let now = Utc::now();
    let batch = &Uuid::new_v4().simple().to_string()[..6];

    let mut users = Vec::new();
    for (i, name) in FIRST_NAMES.iter().enumerate() {
        let user = User {
            id: Uuid::new_v4(),
            email: format!("{}.{batch}@example.com", name.to_lowercase()),
            full_name: format!("{name} Demo"),
            phone_number: Some(format!("+96279000{i:04}")),
            status: if i == 5 {
                AccountStatus::Suspended
            } else {
                AccountStatus::Active
            },
            status_reason: None,
            created_by: None,
            updated_by: None,
            deleted_by: None,
            deleted_at: None,
            created_at: now - Duration::days(40 - i as i64 * 6),
            updated_at: now,
        };
        repo.insert_user(user.clone()).await?;
        users.push(user);
    }

    let mut providers = Vec::new();
    for i in 0..3 {
        let provider = Provider {
            id: Uuid::new_v4(),
            email: format!("provider{i}.{batch}@example.com"),
            business_name: format!("{} Hub {i}", CITIES[i % CITIES.len()]),
            full_name: format!("{} Owner", FIRST_NAMES[i]),
            phone: None,
            status: if i == 2 {
                AccountStatus::Pending
            } else {
                AccountStatus::Active
            },
            status_reason: None,
            updated_by: None,
            deleted_by: None,
            deleted_at: None,
            created_at: now - Duration::days(60),
            updated_at: now,
        };
        repo.insert_provider(provider.clone()).await?;
        providers.push(provider);
    }

    let mut workspaces = Vec::new();
    for i in 0..6 {
        let owner = &providers[i % providers.len()];
        let workspace = Workspace {
            id: Uuid::new_v4(),
            owner_id: owner.id,
            space_name: format!("{} Desk {}", owner.business_name, i + 1),
            location: CITIES[i % CITIES.len()].to_string(),
            price_per_hour: 5.0 + i as f64 * 2.5,
            status: if i == 5 {
                AccountStatus::Pending
            } else {
                AccountStatus::Active
            },
            status_reason: None,
            reviewed_by: None,
            deleted_by: None,
            deleted_at: None,
            created_at: now - Duration::days(50),
            updated_at: now,
        };
        repo.insert_workspace(workspace.clone()).await?;
        workspaces.push(workspace);
    }

    let (mut bookings, mut payments, mut reviews) = (0, 0, 0);
    for i in 0..20usize {
        let user = &users[i % users.len()];
        let workspace = &workspaces[(i * 7) % workspaces.len()];
        let status = BOOKING_STATUSES[i % BOOKING_STATUSES.len()];
        let start = now + Duration::days(i as i64 * 3 - 30);
        let hours = (i % 8 + 1) as i64;
        let total_amount = hours as f64 * workspace.price_per_hour;
        let created_at = now - Duration::days((i % 30) as i64);

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: user.id,
            workspace_id: workspace.id,
            provider_id: workspace.owner_id,
            booking_plan: PLANS[i % PLANS.len()].to_string(),
            start_date: start,
            end_date: start + Duration::hours(hours),
            total_amount,
            status,
            cancellation_reason: (status == BookingStatus::Cancelled)
                .then(|| "User requested cancellation".to_string()),
            cancelled_by: None,
            cancelled_at: (status == BookingStatus::Cancelled).then_some(now),
            created_at,
        };
        repo.insert_booking(booking.clone()).await?;
        bookings += 1;

        let payment_status = match status {
            BookingStatus::Completed | BookingStatus::Confirmed => Some(PaymentStatus::Completed),
            BookingStatus::Cancelled => Some(PaymentStatus::Refunded),
            BookingStatus::Upcoming => Some(PaymentStatus::Pending),
            _ => None,
        };
        if let Some(payment_status) = payment_status {
            let (platform_fee, provider_amount) = split_platform_fee(total_amount);
            repo.insert_payment(Payment {
                id: Uuid::new_v4(),
                booking_id: booking.id,
                user_id: booking.user_id,
                provider_id: booking.provider_id,
                amount: total_amount,
                platform_fee,
                provider_amount,
                status: payment_status,
                created_at,
                updated_at: now,
            })
            .await?;
            payments += 1;
        }

        if status == BookingStatus::Completed {
            repo.insert_review(Review {
                id: Uuid::new_v4(),
                user_id: booking.user_id,
                workspace_id: booking.workspace_id,
                rating: 3 + (i % 3) as i32,
                comment: COMMENTS[i % COMMENTS.len()].to_string(),
                status: ReviewStatus::Active,
                flagged: false,
                flag_reason: None,
                flagged_at: None,
                flagged_by: None,
                deletion_reason: None,
                deleted_by: None,
                deleted_at: None,
                created_at: booking.end_date + Duration::days(1),
            })
            .await?;
            reviews += 1;
        }
    }

    repo.create_notification(NewNotification {
        user_id: None,
        recipient_type: RecipientType::Admin,
        title: "New provider awaiting approval".to_string(),
        message: format!("{} registered and is pending review.", providers[2].business_name),
        notification_type: "provider".to_string(),
    })
    .await?;
    repo.create_notification(NewNotification {
        user_id: Some(users[0].id),
        recipient_type: RecipientType::User,
        title: "Welcome to Masahatak".to_string(),
        message: "Your account is ready. Find a workspace near you.".to_string(),
        notification_type: "general".to_string(),
    })
    .await?;

    tracing::info!(
        users = users.len(),
        providers = providers.len(),
        workspaces = workspaces.len(),
        bookings,
        payments,
        reviews,
        notifications = 2,
        "demo data inserted"
    );
    Ok(())
}
