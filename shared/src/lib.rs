//! Shared domain types for the répétiteur registry
//!
//! Everything a client binding needs without pulling in the server:
//!
//! - [`competence`]: the competency codec — cycles, controlled
//!   vocabularies, and the encode/decode pair for the single stored
//!   text column
//! - [`role`]: staff roles and the permission matrix derived from them
//! - [`client`]: request/response DTOs for the HTTP API
//! - [`util`]: small time helpers

pub mod client;
pub mod competence;
pub mod role;
pub mod util;

pub use competence::{Cycle, Selection};
pub use role::{Permission, PermissionKind, Role};
