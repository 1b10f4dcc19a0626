//! Bootstrap the first admin account.
//!
//! Idempotent: exits cleanly when an admin already exists. Credentials
//! come from ADMIN_USERNAME / ADMIN_EMAIL / ADMIN_PASSWORD, with
//! throwaway defaults for local development.

use anyhow::Context;
use shared::models::{Role, UserCreate};
use venue_server::core::Config;
use venue_server::db::repository::user as user_repo;
use venue_server::db::DbService;
use venue_server::services::UserService;
use venue_server::utils::logger::init_logger_with_file;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let db = DbService::new(&config.database_path)
        .await
        .context("failed to open database")?;

    if let Some(admin) = user_repo::find_admin(&db.pool).await? {
        println!("Admin user '{}' already exists.", admin.username);
        return Ok(());
    }

    let data = UserCreate {
        username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
        email: std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".into()),
        password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "password".into()),
        role: Role::Admin,
        branch_id: None,
    };

    let user = UserService::new(db.pool.clone())
        .register(None, data)
        .await
        .context("failed to create admin user")?;
    println!("Admin user '{}' created successfully.", user.username);
    Ok(())
}
