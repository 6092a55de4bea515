//! Creates the bootstrap super administrator, or resets its password when the account
//! already exists. Credentials come from `SEED_ADMIN_EMAIL` / `SEED_ADMIN_PASSWORD`.

use std::env;

use masahatak_admin::{
    AppConfig, PostgresRepository,
    auth::hash_password,
    models::{AdminRole, NewAdmin},
    repository::Repository,
};
use sqlx::postgres::PgPoolOptions;

const DEFAULT_EMAIL: &str = "admin@masahatak.com";
const DEFAULT_PASSWORD: &str = "Admin@123";
const DEFAULT_NAME: &str = "System Administrator";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed_admin=info,masahatak_admin=info".into()),
        )
        .init();

    let config = AppConfig::load();
    let email = env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_EMAIL.to_string());
    let password = env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.db_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    let repo = PostgresRepository::new(pool);

    let password_hash = hash_password(&password, config.bcrypt_cost).await?;

    match repo.find_admin_by_email(&email).await? {
        Some(existing) => {
            repo.update_admin_password(existing.id, &password_hash).await?;
            tracing::info!(admin_id = %existing.id, %email, "password reset for existing administrator");
        }
        None => {
            let admin = repo
                .create_admin(NewAdmin {
                    email: email.clone(),
                    full_name: DEFAULT_NAME.to_string(),
                    password_hash,
                    role: AdminRole::SuperAdmin,
                    phone: None,
                })
                .await?;
            tracing::info!(admin_id = %admin.id, %email, "super administrator created");
        }
    }

    Ok(())
}
