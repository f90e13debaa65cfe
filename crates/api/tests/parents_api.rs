//! HTTP-level integration tests for the parent account family.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, get_auth, post_json, test_token};
use sqlx::PgPool;

use classbum_core::roles::{ROLE_CHILD, ROLE_PARENT};

/// Register a parent via the API and return the JSON response.
async fn register_parent(pool: &PgPool, email: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "email": email,
        "password": "family-secret",
        "name": "Kira",
        "phone": "+1000000",
    });
    let response = post_json(app, "/auth/register-parent", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Insert a child row linked to a parent, bypassing the API. Parent-child
/// linkage has no write endpoint; it is seeded state.
async fn seed_linked_child(pool: &PgPool, parent_id: i64, login: &str, first_name: &str) {
    sqlx::query(
        "INSERT INTO children
            (public_id, login, password_hash, first_name, last_name, class, parent_id)
         VALUES ($1, $2, 'x', $3, 'Linked', '2A', $4)",
    )
    .bind(format!("pub-{login}"))
    .bind(login)
    .bind(first_name)
    .bind(parent_id)
    .execute(pool)
    .await
    .expect("seed insert should succeed");
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_parent_success(pool: PgPool) {
    let json = register_parent(&pool, "kira@example.com").await;

    assert!(json["token"].is_string(), "response must contain a token");
    assert_eq!(json["parent"]["email"], "kira@example.com");
    assert_eq!(json["parent"]["name"], "Kira");
    assert!(
        json["parent"].get("password_hash").is_none(),
        "password hash must never be serialized"
    );
}

/// The parent family reports duplicate email as 400, not 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_parent_email_in_use(pool: PgPool) {
    register_parent(&pool, "kira@example.com").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "kira@example.com", "password": "other" });
    let response = post_json(app, "/auth/register-parent", body).await;
    assert_error(response, StatusCode::BAD_REQUEST, "email_in_use").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_parent_missing_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "kira@example.com" });
    let response = post_json(app, "/auth/register-parent", body).await;
    assert_error(response, StatusCode::BAD_REQUEST, "missing_email_or_password").await;
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_parent_success(pool: PgPool) {
    register_parent(&pool, "kira@example.com").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "kira@example.com", "password": "family-secret" });
    let response = post_json(app, "/auth/login-parent", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["parent"]["email"], "kira@example.com");
}

/// Unknown email and wrong password must be outwardly indistinguishable:
/// same status, byte-identical body.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_parent_failure_modes_are_identical(pool: PgPool) {
    register_parent(&pool, "kira@example.com").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "nobody@example.com", "password": "family-secret" });
    let unknown_email = post_json(app, "/auth/login-parent", body).await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_body = body_json(unknown_email).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "kira@example.com", "password": "wrong" });
    let wrong_password = post_json(app, "/auth/login-parent", body).await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_body = body_json(wrong_password).await;

    assert_eq!(unknown_body, wrong_body);
    assert_eq!(unknown_body["error"], "invalid_credentials");
}

// ---------------------------------------------------------------------------
// Profile + children
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_lists_children_newest_first(pool: PgPool) {
    let json = register_parent(&pool, "kira@example.com").await;
    let token = json["token"].as_str().unwrap().to_string();
    let parent_id = json["parent"]["id"].as_i64().unwrap();

    seed_linked_child(&pool, parent_id, "older", "First").await;
    seed_linked_child(&pool, parent_id, "newer", "Second").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["parent"]["email"], "kira@example.com");

    let children = json["children"].as_array().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["first_name"], "Second");
    assert_eq!(children[1]["first_name"], "First");
    assert_eq!(children[0]["grade"], "2A");
    assert_eq!(children[0]["is_active"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/auth/me", "garbage").await;
    assert_error(response, StatusCode::UNAUTHORIZED, "invalid_token").await;
}

/// A child token on a parent route is a role failure: 403, distinct from
/// a missing or invalid token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_child_token_forbidden_on_parent_route(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = test_token(1, ROLE_CHILD);
    let response = get_auth(app, "/auth/me", &token).await;
    assert_error(response, StatusCode::FORBIDDEN, "forbidden").await;
}

/// A parent token that outlives its account is rejected: the gateway
/// re-loads the row on every request.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_for_missing_account_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = test_token(987654, ROLE_PARENT);
    let response = get_auth(app, "/auth/me", &token).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "invalid_token").await;
}
