//! Shared application state

use std::sync::Arc;

use crate::auth::{JwtConfig, JwtService};
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// State shared by every handler
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Open the database, run migrations and build the token service.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.db_path).await?;

        let mut jwt_config = JwtConfig::new(config.jwt_secret.clone());
        jwt_config.expiration_minutes = config.jwt_expiration_minutes;
        let jwt_service = Arc::new(JwtService::with_config(jwt_config));

        Ok(Self {
            config: Arc::new(config.clone()),
            db,
            jwt_service,
        })
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.db.pool
    }
}
