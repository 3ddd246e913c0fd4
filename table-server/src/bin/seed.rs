//! Seed the database with the admin account and the sample menu
//!
//! ```text
//! DATABASE_URL=table_order.db ADMIN_PASSWORD=... cargo run --bin seed
//! ```

use table_server::Config;
use table_server::db::DbService;
use table_server::db::seed::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, seed_admin, seed_menu};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    table_server::init_logger(&config.log_level)?;

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(p) if !p.is_empty() => p,
        _ if config.is_production() => {
            anyhow::bail!("ADMIN_PASSWORD must be set in production");
        }
        _ => DEFAULT_ADMIN_PASSWORD.to_string(),
    };

    let db = DbService::new(&config.database_url).await?;

    if seed_admin(&db.pool, &email, &password).await? {
        tracing::info!(email = %email, "Admin account created, change the password after first login");
    } else {
        tracing::info!(email = %email, "Admin account already exists");
    }

    let added = seed_menu(&db.pool).await?;
    if added > 0 {
        tracing::info!(count = added, "Sample menu inserted");
    } else {
        tracing::info!("Menu not empty, sample menu skipped");
    }

    Ok(())
}
