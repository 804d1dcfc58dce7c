use uuid::Uuid;

use crate::auth::hash_password;
use crate::config::Config;
use crate::db::Db;

/// Seeds the development account from `DEV_EMAIL` / `DEV_PASSWORD`.
/// Safe to call on every startup — existence is checked before inserting.
/// Does nothing outside the development environment.
pub async fn seed_accounts(pool: &Db, config: &Config) -> anyhow::Result<()> {
    if !config.is_development() {
        return Ok(());
    }

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
        .bind(&config.dev_email)
        .fetch_one(pool)
        .await?;

    if exists {
        return Ok(());
    }

    let hash = hash_password(&config.dev_password)?;
    let id   = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO users (id, email, password_hash) VALUES (?, ?, ?)")
        .bind(id)
        .bind(&config.dev_email)
        .bind(hash)
        .execute(pool)
        .await?;
    tracing::info!(email = %config.dev_email, "Seeded development account");

    Ok(())
}
