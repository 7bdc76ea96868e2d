#![allow(dead_code)]

use async_trait::async_trait;
use axum::routing::get;
use axum::Router;
use axum_test::TestServer;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use campus_hub::api::handlers::health_handler;
use campus_hub::api::routes::api_routes;
use campus_hub::application::services::{
    AnalyticsService, AuthService, ClubDeletePolicy, ClubService, EventService, UserService,
};
use campus_hub::error::AppError;
use campus_hub::infrastructure::persistence::{
    PgClubRepository, PgEventRepository, PgUserRepository,
};
use campus_hub::infrastructure::storage::{ImageStorage, StoredImage};
use campus_hub::state::AppState;
use campus_hub::utils::password::hash_password;

/// In-memory stand-in for the external image host.
///
/// Records uploads and deletes so tests can assert on storage traffic.
#[derive(Default)]
pub struct FakeImageStorage {
    uploads: AtomicUsize,
    pub deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageStorage for FakeImageStorage {
    async fn upload(&self, _data: Bytes, folder: &str) -> Result<StoredImage, AppError> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(StoredImage {
            url: format!("https://img.test/{folder}/{n}"),
            storage_id: format!("{folder}/{n}"),
        })
    }

    async fn delete(&self, storage_id: &str) -> Result<(), AppError> {
        self.deleted.lock().unwrap().push(storage_id.to_string());
        Ok(())
    }
}

pub fn create_test_state(pool: PgPool) -> (AppState, Arc<FakeImageStorage>) {
    create_test_state_with_policy(pool, ClubDeletePolicy::Orphan)
}

pub fn create_test_state_with_policy(
    pool: PgPool,
    policy: ClubDeletePolicy,
) -> (AppState, Arc<FakeImageStorage>) {
    let pool = Arc::new(pool);
    let storage = Arc::new(FakeImageStorage::default());

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let club_repo = Arc::new(PgClubRepository::new(pool.clone()));
    let event_repo = Arc::new(PgEventRepository::new(pool));

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            user_repo.clone(),
            "test-jwt-secret",
            Duration::from_secs(3600),
        )),
        user_service: Arc::new(UserService::new(user_repo.clone())),
        club_service: Arc::new(ClubService::new(
            club_repo.clone(),
            event_repo.clone(),
            storage.clone(),
            policy,
        )),
        event_service: Arc::new(EventService::new(
            event_repo.clone(),
            club_repo,
            storage.clone(),
        )),
        analytics_service: Arc::new(AnalyticsService::new(event_repo, user_repo)),
        max_upload_bytes: 1024 * 1024,
    };

    (state, storage)
}

/// Full application router with cookie persistence enabled.
pub fn test_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes(state.clone()))
        .with_state(state);

    let mut server = TestServer::new(app).unwrap();
    server.save_cookies();
    server
}

/// Inserts an account with password `password1`; returns its id.
pub async fn create_test_user(pool: &PgPool, username: &str, email: &str, role: &str) -> i64 {
    let hash = hash_password("password1").unwrap();
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, email, password_hash, role)
         VALUES ($1, $2, $3, $4::user_role) RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(hash)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Logs the server in as an existing account; the session cookie is stored
/// on the server for subsequent requests.
pub async fn login(server: &TestServer, email: &str) {
    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({ "email": email, "password": "password1" }))
        .await;
    response.assert_status_ok();
}

pub async fn create_test_club(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO clubs (name, image_url, image_storage_id, description, fb_link)
         VALUES ($1, $2, $3, 'A club', 'https://facebook.com/club') RETURNING id",
    )
    .bind(name)
    .bind(format!("https://img.test/clubs/{name}"))
    .bind(format!("clubs/{name}"))
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_event(
    pool: &PgPool,
    name: &str,
    club_id: i64,
    created_by: i64,
    date: DateTime<Utc>,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO events (name, image_url, image_storage_id, date, buttons, club_id, created_by, description)
         VALUES ($1, $2, $3, $4, '[]'::jsonb, $5, $6, 'An event') RETURNING id",
    )
    .bind(name)
    .bind(format!("https://img.test/events/{name}"))
    .bind(format!("events/{name}"))
    .bind(date)
    .bind(club_id)
    .bind(created_by)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT count(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
