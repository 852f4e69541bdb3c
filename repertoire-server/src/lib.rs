//! Répertoire des répétiteurs — registry HTTP service
//!
//! Role-gated CRUD over tutor records and staff accounts, with the
//! competency codec from the `shared` crate packing each tutor's
//! subjects, cycles and classes into the single stored text column.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use utils::AppError;

/// Load `.env` and initialize logging.
pub fn setup_environment() -> Result<(), AppError> {
    let _ = dotenvy::dotenv();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_dir.as_deref());
    Ok(())
}
