//! Connectivity check: connects with `DATABASE_URL` and lists the administrator
//! accounts. Password hashes are never printed.

use masahatak_admin::{AppConfig, PostgresRepository, repository::Repository};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "check_db=info".into()),
        )
        .init();

    let config = AppConfig::load();
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.db_url)
        .await?;
    tracing::info!("connected to Postgres");

    let repo = PostgresRepository::new(pool);
    let admins = repo.list_admins().await?;
    if admins.is_empty() {
        tracing::warn!("no administrator accounts found; run seed-admin");
        return Ok(());
    }

    tracing::info!(count = admins.len(), "administrator accounts");
    for admin in admins {
        tracing::info!(
            id = %admin.id,
            email = %admin.email,
            full_name = %admin.full_name,
            role = %admin.role,
            created_at = %admin.created_at,
            has_password = !admin.password_hash.is_empty(),
            "admin"
        );
    }
    Ok(())
}
