//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, service wiring, and Axum server lifecycle.

use anyhow::Result;
use axum::extract::Request;
use axum::ServiceExt;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{
    AnalyticsService, AuthService, ClubService, EventService, UserService,
};
use crate::config::Config;
use crate::infrastructure::persistence::{
    PgClubRepository, PgEventRepository, PgUserRepository,
};
use crate::infrastructure::storage::{HttpImageStorage, ImageStorage};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Pending migrations
/// - Image host client
/// - Repository and service graph
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!(database = %config.masked_database_url(), "Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let club_repository = Arc::new(PgClubRepository::new(pool.clone()));
    let event_repository = Arc::new(PgEventRepository::new(pool.clone()));

    let storage: Arc<dyn ImageStorage> = Arc::new(HttpImageStorage::new(
        config.image_storage_url.clone(),
        config.image_storage_key.clone(),
    ));

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            user_repository.clone(),
            &config.jwt_secret,
            Duration::from_secs(config.jwt_ttl_seconds),
        )),
        user_service: Arc::new(UserService::new(user_repository.clone())),
        club_service: Arc::new(ClubService::new(
            club_repository.clone(),
            event_repository.clone(),
            storage.clone(),
            config.club_delete_policy,
        )),
        event_service: Arc::new(EventService::new(
            event_repository.clone(),
            club_repository,
            storage,
        )),
        analytics_service: Arc::new(AnalyticsService::new(event_repository, user_repository)),
        max_upload_bytes: config.max_upload_bytes,
    };

    let app = app_router(state, &config);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
