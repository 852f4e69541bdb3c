//! Login and session boundary tests

mod common;

use common::{app, seed_user, send, test_state};
use http::StatusCode;
use serde_json::json;
use shared::Role;

#[tokio::test]
async fn health_is_public() {
    let (state, _dir) = test_state().await;
    let app = app(&state);

    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "E0000");
    assert_eq!(body["data"]["service"], "repertoire-server");
}

#[tokio::test]
async fn login_returns_usable_token() {
    let (state, _dir) = test_state().await;
    let app = app(&state);
    seed_user(&state, "admin@example.org", "s3cret-pass", Role::Admin).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "admin@example.org", "password": "s3cret-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "admin");
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "admin@example.org");
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let (state, _dir) = test_state().await;
    let app = app(&state);
    seed_user(&state, "staff@example.org", "right-password", Role::Editor).await;

    let (status, wrong_password) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "staff@example.org", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, unknown_account) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "nobody@example.org", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Same message whether the account exists or not
    assert_eq!(wrong_password["message"], unknown_account["message"]);
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let (state, _dir) = test_state().await;
    let app = app(&state);

    let (status, body) = send(&app, "GET", "/api/repetiteurs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    let (status, _) = send(&app, "GET", "/api/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn forged_token_is_rejected() {
    let (state, _dir) = test_state().await;
    let app = app(&state);

    let (status, body) = send(
        &app,
        "GET",
        "/api/repetiteurs",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");
}

#[tokio::test]
async fn deleted_account_token_no_longer_resolves() {
    let (state, _dir) = test_state().await;
    let app = app(&state);
    let (user, token) = seed_user(&state, "gone@example.org", "password123", Role::Admin).await;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(&user.id)
        .execute(state.pool())
        .await
        .expect("delete");

    let (status, _) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
