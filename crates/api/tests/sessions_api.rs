//! HTTP-level integration tests for the legacy name-keyed session endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, get, post_json};
use sqlx::PgPool;

/// Save a legacy session and return the JSON response.
async fn save_session(
    pool: &PgPool,
    child_name: &str,
    mode: &str,
    tasks: serde_json::Value,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "child_name": child_name,
        "mode": mode,
        "total_wrong": 3,
        "total_hints": 1,
        "total_time_ms": 120000,
        "tasks": tasks,
    });
    let response = post_json(app, "/save-session", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_and_fetch_last_session(pool: PgPool) {
    let tasks = serde_json::json!([
        { "question": "How much is 6 × 6?", "answer": 36, "given": 36, "correct": true },
    ]);
    let saved = save_session(&pool, "Mila", "multiplication", tasks.clone()).await;
    assert_eq!(saved["ok"], true);
    assert!(saved["session_id"].is_i64());
    assert!(saved["created_at"].is_string());

    let app = common::build_test_app(pool);
    let response = get(app, "/last-session-stats?child_name=Mila").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["child_name"], "Mila");
    assert_eq!(json["mode"], "multiplication");
    assert_eq!(json["total_wrong"], 3);
    // Opaque payload: read back exactly as written.
    assert_eq!(json["tasks"], tasks);
    // Anonymous writes have no child link.
    assert_eq!(json["child_id"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_last_session_returns_most_recent(pool: PgPool) {
    save_session(&pool, "Mila", "multiplication", serde_json::json!([1])).await;
    let second = save_session(&pool, "Mila", "multiplication", serde_json::json!([2])).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/last-session-stats?child_name=Mila").await;
    let json = body_json(response).await;

    assert_eq!(json["id"], second["session_id"]);
    assert_eq!(json["tasks"], serde_json::json!([2]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_last_session_mode_filter(pool: PgPool) {
    save_session(&pool, "Mila", "multiplication", serde_json::json!([])).await;
    save_session(&pool, "Mila", "division", serde_json::json!([])).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/last-session-stats?child_name=Mila&mode=multiplication").await;
    let json = body_json(response).await;
    assert_eq!(json["mode"], "multiplication");

    // An unmatched mode is a 404, not an empty result.
    let app = common::build_test_app(pool);
    let response = get(app, "/last-session-stats?child_name=Mila&mode=addition").await;
    assert_error(response, StatusCode::NOT_FOUND, "not_found").await;
}

/// A present-but-empty mode parameter behaves like an omitted one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_last_session_empty_mode_is_no_filter(pool: PgPool) {
    save_session(&pool, "Mila", "multiplication", serde_json::json!([])).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/last-session-stats?child_name=Mila&mode=").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["mode"], "multiplication");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_last_session_requires_child_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/last-session-stats").await;
    assert_error(response, StatusCode::BAD_REQUEST, "missing_child_name").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_last_session_unknown_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/last-session-stats?child_name=Nobody").await;
    assert_error(response, StatusCode::NOT_FOUND, "not_found").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_session_validates_fields(pool: PgPool) {
    // Missing tasks array.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "child_name": "Mila", "mode": "multiplication" });
    let response = post_json(app, "/save-session", body).await;
    assert_error(response, StatusCode::BAD_REQUEST, "missing_fields").await;

    // Missing child_name.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "mode": "multiplication", "tasks": [] });
    let response = post_json(app, "/save-session", body).await;
    assert_error(response, StatusCode::BAD_REQUEST, "missing_fields").await;

    // Missing mode: unlike the authenticated path, the legacy path has no
    // default and rejects.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "child_name": "Mila", "tasks": [] });
    let response = post_json(app, "/save-session", body).await;
    assert_error(response, StatusCode::BAD_REQUEST, "missing_fields").await;
}

/// The legacy path and the authenticated path write to the same table but
/// stay independent: a legacy record for a name does not appear under a
/// child account's listing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_legacy_records_have_no_child_link(pool: PgPool) {
    save_session(&pool, "Mila K", "multiplication", serde_json::json!([])).await;

    let row: (Option<i64>,) =
        sqlx::query_as("SELECT child_id FROM session_stats WHERE child_name = 'Mila K'")
            .fetch_one(&pool)
            .await
            .expect("row must exist");
    assert_eq!(row.0, None);
}
