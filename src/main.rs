use anyhow::Result;
use campus_hub::config::Config;
use campus_hub::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        database = %config.masked_database_url(),
        listen = %config.listen_addr,
        policy = ?config.club_delete_policy,
        "Starting campus-hub"
    );

    server::run(config).await
}
