//! API routes
//!
//! # Structure
//!
//! - [`health`] - health probe
//! - [`auth`] - login and current-actor lookup
//! - [`repetiteurs`] - tutor records (staff CRUD + public registration)
//! - [`users`] - staff account management
//! - [`setup`] - first-admin bootstrap

pub mod auth;
pub mod health;
pub mod repetiteurs;
pub mod setup;
pub mod users;

use axum::routing::{get, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// Build the full application router. The auth middleware wraps every
/// route; public paths are allowlisted inside it.
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/inscription", post(repetiteurs::public_register))
        .route(
            "/api/setup-admin",
            get(setup::check_admin).post(setup::setup_admin),
        )
        .route(
            "/api/repetiteurs",
            get(repetiteurs::list).post(repetiteurs::create),
        )
        .route(
            "/api/repetiteurs/{id}",
            get(repetiteurs::get_by_id)
                .put(repetiteurs::update)
                .delete(repetiteurs::delete),
        )
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/{id}", put(users::update))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
