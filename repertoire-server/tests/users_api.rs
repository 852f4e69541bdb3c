//! Staff account management tests

mod common;

use common::{app, seed_user, send, test_state};
use http::StatusCode;
use repertoire_server::db::users;
use repertoire_server::utils::password::verify_password;
use serde_json::json;
use shared::Role;

#[tokio::test]
async fn only_admin_manages_accounts() {
    let (state, _dir) = test_state().await;
    let app = app(&state);

    let new_account = json!({
        "name": "Nouvel",
        "email": "new@example.org",
        "password": "password123",
        "role": "viewer"
    });

    for role in [Role::Editor, Role::Creator, Role::Viewer] {
        let email = format!("{role}@example.org");
        let (_, token) = seed_user(&state, &email, "password123", role).await;

        let (status, _) = send(&app, "GET", "/api/users", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{role} listing accounts");

        let (status, _) = send(
            &app,
            "POST",
            "/api/users",
            Some(&token),
            Some(new_account.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{role} creating account");
    }

    let (_, admin_token) = seed_user(&state, "admin@example.org", "password123", Role::Admin).await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin_token),
        Some(new_account),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "viewer");
    assert!(body["data"]["id"].as_str().is_some());
}

#[tokio::test]
async fn duplicate_email_conflicts_and_leaves_original_intact() {
    let (state, _dir) = test_state().await;
    let app = app(&state);
    let (_, admin_token) = seed_user(&state, "admin@example.org", "password123", Role::Admin).await;
    let (original, _) = seed_user(&state, "taken@example.org", "password123", Role::Editor).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin_token),
        Some(json!({
            "name": "Imposter",
            "email": "taken@example.org",
            "password": "password456",
            "role": "admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");

    let unchanged = users::find_by_id(state.pool(), &original.id)
        .await
        .expect("query")
        .expect("still there");
    assert_eq!(unchanged.name, original.name);
    assert_eq!(unchanged.role, original.role);
    assert_eq!(unchanged.hashed_password, original.hashed_password);
}

#[tokio::test]
async fn blank_password_update_preserves_the_stored_hash() {
    let (state, _dir) = test_state().await;
    let app = app(&state);
    let (_, admin_token) = seed_user(&state, "admin@example.org", "password123", Role::Admin).await;
    let (account, _) = seed_user(&state, "staff@example.org", "original-pass", Role::Creator).await;

    // Update without a new password
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/users/{}", account.id),
        Some(&admin_token),
        Some(json!({
            "name": "Renamed",
            "email": "staff@example.org",
            "role": "editor",
            "new_password": ""
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let after = users::find_by_id(state.pool(), &account.id)
        .await
        .expect("query")
        .expect("present");
    assert_eq!(after.name, "Renamed");
    assert_eq!(after.role, "editor");
    assert_eq!(after.hashed_password, account.hashed_password);
    assert!(verify_password("original-pass", &after.hashed_password));
}

#[tokio::test]
async fn non_blank_password_update_replaces_the_credential() {
    let (state, _dir) = test_state().await;
    let app = app(&state);
    let (_, admin_token) = seed_user(&state, "admin@example.org", "password123", Role::Admin).await;
    let (account, _) = seed_user(&state, "staff@example.org", "original-pass", Role::Creator).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/users/{}", account.id),
        Some(&admin_token),
        Some(json!({
            "name": "Staff",
            "email": "staff@example.org",
            "role": "creator",
            "new_password": "fresh-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let after = users::find_by_id(state.pool(), &account.id)
        .await
        .expect("query")
        .expect("present");
    assert_ne!(after.hashed_password, account.hashed_password);
    assert!(!verify_password("original-pass", &after.hashed_password));
    assert!(verify_password("fresh-password", &after.hashed_password));
}

#[tokio::test]
async fn update_cannot_take_over_another_email() {
    let (state, _dir) = test_state().await;
    let app = app(&state);
    let (_, admin_token) = seed_user(&state, "admin@example.org", "password123", Role::Admin).await;
    seed_user(&state, "a@example.org", "password123", Role::Viewer).await;
    let (b, _) = seed_user(&state, "b@example.org", "password123", Role::Viewer).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/users/{}", b.id),
        Some(&admin_token),
        Some(json!({
            "name": "B",
            "email": "a@example.org",
            "role": "viewer"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn updating_a_missing_account_is_not_found() {
    let (state, _dir) = test_state().await;
    let app = app(&state);
    let (_, admin_token) = seed_user(&state, "admin@example.org", "password123", Role::Admin).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/users/no-such-id",
        Some(&admin_token),
        Some(json!({
            "name": "Ghost",
            "email": "ghost@example.org",
            "role": "viewer"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
