use table_server::{Config, Server, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenv::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    )?;

    tracing::info!(
        "Starting table-server (env: {}, db: {})",
        config.environment,
        config.database_url
    );

    Server::new(config).run().await?;

    Ok(())
}
