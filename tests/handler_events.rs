mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use sqlx::PgPool;

#[sqlx::test]
async fn test_list_events_soonest_first_with_club_filter(pool: PgPool) {
    let (state, _storage) = common::create_test_state(pool.clone());
    let server = common::test_server(state);

    let user = common::create_test_user(&pool, "carol", "carol@campus.edu", "user").await;
    let chess = common::create_test_club(&pool, "Chess Club").await;
    let robotics = common::create_test_club(&pool, "Robotics").await;

    common::create_test_event(&pool, "late", chess, user, Utc::now() + Duration::days(30)).await;
    common::create_test_event(&pool, "soon", chess, user, Utc::now() + Duration::days(1)).await;
    common::create_test_event(&pool, "expo", robotics, user, Utc::now() + Duration::days(10))
        .await;

    let response = server.get("/api/events").await;
    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let events = json["data"]["events"].as_array().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["name"], "soon");
    assert_eq!(events[2]["name"], "late");

    let response = server
        .get("/api/events")
        .add_query_param("club", chess.to_string())
        .await;
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["data"]["events"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["pagination"]["total"], 2);
}

#[sqlx::test]
async fn test_list_events_date_window(pool: PgPool) {
    let (state, _storage) = common::create_test_state(pool.clone());
    let server = common::test_server(state);

    let user = common::create_test_user(&pool, "carol", "carol@campus.edu", "user").await;
    let club = common::create_test_club(&pool, "Chess Club").await;

    common::create_test_event(&pool, "inside", club, user, Utc::now() + Duration::days(5)).await;
    common::create_test_event(&pool, "outside", club, user, Utc::now() + Duration::days(50))
        .await;

    let from = (Utc::now() + Duration::days(1)).to_rfc3339();
    let to = (Utc::now() + Duration::days(10)).to_rfc3339();

    let response = server
        .get("/api/events")
        .add_query_param("startDate", from)
        .add_query_param("endDate", to)
        .await;
    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let events = json["data"]["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["name"], "inside");
}

#[sqlx::test]
async fn test_list_events_by_creator_latest_first(pool: PgPool) {
    let (state, _storage) = common::create_test_state(pool.clone());
    let server = common::test_server(state);

    let carol = common::create_test_user(&pool, "carol", "carol@campus.edu", "user").await;
    let dave = common::create_test_user(&pool, "dave", "dave@campus.edu", "user").await;
    let club = common::create_test_club(&pool, "Chess Club").await;

    common::create_test_event(&pool, "first", club, carol, Utc::now() + Duration::days(1)).await;
    common::create_test_event(&pool, "second", club, carol, Utc::now() + Duration::days(9)).await;
    common::create_test_event(&pool, "other", club, dave, Utc::now() + Duration::days(5)).await;

    let response = server.get(&format!("/api/events/creator/{carol}")).await;
    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let events = json["data"]["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    // Latest event date first for the creator view.
    assert_eq!(events[0]["name"], "second");
    assert_eq!(events[1]["name"], "first");
}

#[sqlx::test]
async fn test_list_events_by_creator_date_window(pool: PgPool) {
    let (state, _storage) = common::create_test_state(pool.clone());
    let server = common::test_server(state);

    let carol = common::create_test_user(&pool, "carol", "carol@campus.edu", "user").await;
    let club = common::create_test_club(&pool, "Chess Club").await;

    common::create_test_event(&pool, "inside", club, carol, Utc::now() + Duration::days(5)).await;
    common::create_test_event(&pool, "outside", club, carol, Utc::now() + Duration::days(50))
        .await;

    let from = (Utc::now() + Duration::days(1)).to_rfc3339();
    let to = (Utc::now() + Duration::days(10)).to_rfc3339();

    let response = server
        .get(&format!("/api/events/creator/{carol}"))
        .add_query_param("startDate", from)
        .add_query_param("endDate", to)
        .await;
    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let events = json["data"]["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["name"], "inside");
    assert_eq!(json["data"]["pagination"]["total"], 1);
}

#[sqlx::test]
async fn test_get_event_includes_buttons(pool: PgPool) {
    let (state, _storage) = common::create_test_state(pool.clone());
    let server = common::test_server(state);

    let user = common::create_test_user(&pool, "carol", "carol@campus.edu", "user").await;
    let club = common::create_test_club(&pool, "Chess Club").await;
    let event =
        common::create_test_event(&pool, "open", club, user, Utc::now() + Duration::days(3)).await;

    sqlx::query("UPDATE events SET buttons = $1::jsonb WHERE id = $2")
        .bind(serde_json::json!([{"label": "RSVP", "url": "https://forms.test/rsvp"}, {"label": "Info"}]))
        .bind(event)
        .execute(&pool)
        .await
        .unwrap();

    let response = server.get(&format!("/api/events/{event}")).await;
    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let buttons = json["data"]["buttons"].as_array().unwrap();
    assert_eq!(buttons.len(), 2);
    assert_eq!(buttons[0]["label"], "RSVP");
    assert!(buttons[1].get("url").is_none());

    server.get("/api/events/9999").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_event_mutations_require_session(pool: PgPool) {
    let (state, _storage) = common::create_test_state(pool.clone());
    let server = common::test_server(state);

    let user = common::create_test_user(&pool, "carol", "carol@campus.edu", "user").await;
    let club = common::create_test_club(&pool, "Chess Club").await;
    let event =
        common::create_test_event(&pool, "open", club, user, Utc::now() + Duration::days(3)).await;

    server
        .delete(&format!("/api/events/{event}"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_delete_event_releases_image_and_keeps_club(pool: PgPool) {
    let (state, storage) = common::create_test_state(pool.clone());
    let server = common::test_server(state);

    let user = common::create_test_user(&pool, "carol", "carol@campus.edu", "user").await;
    let club = common::create_test_club(&pool, "Chess Club").await;
    let event =
        common::create_test_event(&pool, "open", club, user, Utc::now() + Duration::days(3)).await;

    common::login(&server, "carol@campus.edu").await;

    server
        .delete(&format!("/api/events/{event}"))
        .await
        .assert_status_ok();

    assert_eq!(common::count_rows(&pool, "events").await, 0);
    assert_eq!(common::count_rows(&pool, "clubs").await, 1);
    let deleted = storage.deleted.lock().unwrap().clone();
    assert_eq!(deleted, vec!["events/open".to_string()]);
}
