//! Authentication and authorization
//!
//! - [`JwtService`] - token issue/validate
//! - [`CurrentUser`] - the acting account, passed explicitly to handlers
//! - [`require_auth`] - middleware gating all non-public API routes

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
