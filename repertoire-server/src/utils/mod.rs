//! Shared server utilities

pub mod error;
pub mod logger;
pub mod password;
pub mod validation;

pub use error::{AppError, AppResponse, ok, ok_with_message};
