//! Test harness: in-memory service over a throwaway SQLite file

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use repertoire_server::api;
use repertoire_server::core::{Config, ServerState};
use repertoire_server::db::users::{self, User};
use repertoire_server::utils::password::hash_password;
use shared::Role;
use shared::util::now_millis;

pub const TEST_SECRET: &str = "integration-test-secret-32-bytes!!";

/// Fresh state backed by a tempdir database. Keep the TempDir alive
/// for the duration of the test.
pub async fn test_state() -> (ServerState, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .into_owned();

    let config = Config {
        db_path,
        http_port: 0,
        environment: "development".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration_minutes: 60,
        log_dir: None,
    };

    let state = ServerState::initialize(&config).await.expect("state");
    (state, dir)
}

pub fn app(state: &ServerState) -> Router {
    api::create_router(state.clone())
}

/// Insert an account directly and return it with a valid token.
pub async fn seed_user(
    state: &ServerState,
    email: &str,
    password: &str,
    role: Role,
) -> (User, String) {
    let id = uuid::Uuid::new_v4().to_string();
    let hashed = hash_password(password).expect("hash");
    users::create(
        state.pool(),
        &id,
        "Test User",
        email,
        &hashed,
        role,
        now_millis(),
    )
    .await
    .expect("seed user");

    let user = users::find_by_id(state.pool(), &id)
        .await
        .expect("query")
        .expect("seeded user present");
    let token = state.jwt_service.generate_token(&user).expect("token");
    (user, token)
}

/// Drive one request through the router and parse the JSON envelope.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Minimal valid tutor payload for create/update calls.
pub fn repetiteur_payload() -> Value {
    serde_json::json!({
        "nom": "Issoufou",
        "prenom": "Amina",
        "telephone": "+22790000000",
        "ville": "Niamey",
        "departement": "Niamey",
        "diplome": "Licence",
        "annee_entree": 2022,
        "matieres": ["Mathématiques", "Anglais"],
        "niveaux": ["secondaire_sup"],
        "classes": ["1ère"]
    })
}
