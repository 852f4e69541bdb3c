//! Request and response types for the HTTP API
//!
//! Shared between the server handlers and any client binding.

use serde::{Deserialize, Serialize};

use crate::competence::Selection;
use crate::role::Role;

/// Login credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: bearer token plus the actor's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Public view of a staff account (never carries the hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create a staff account
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Update a staff account.
///
/// `new_password` absent or blank means the stored credential is left
/// unchanged.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Bootstrap request for the very first administrator account
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetupAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Answer to the bootstrap probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminExistsResponse {
    pub admin_exists: bool,
}

/// Tutor form payload, used for staff create, public registration and
/// update. Multi-valued competency fields arrive structured; the
/// server encodes them before persisting.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepetiteurPayload {
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub ville: String,
    pub departement: String,
    pub diplome: String,
    pub annee_entree: i32,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub nationalite: Option<String>,
    #[serde(default)]
    pub moyen_transport: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub statut: Option<String>,
    #[serde(flatten)]
    pub competences: Selection,
}

/// Tutor record as served to clients, with the stored encoding and
/// its decoded structured form side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepetiteurResponse {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub email: Option<String>,
    pub ville: String,
    pub departement: String,
    pub diplome: String,
    pub annee_entree: i32,
    pub age: Option<i32>,
    pub genre: Option<String>,
    pub nationalite: Option<String>,
    pub moyen_transport: Option<String>,
    pub photo_url: Option<String>,
    pub matieres: String,
    pub competences: Selection,
    pub statut: String,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// List filters; all substring matches are case-insensitive
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RepetiteurQuery {
    /// Matches nom or prenom
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub ville: Option<String>,
    #[serde(default)]
    pub departement: Option<String>,
    /// Substring match against the stored competency text
    #[serde(default)]
    pub matiere: Option<String>,
    /// Cycle key, matched as a substring of the stored competency text
    #[serde(default)]
    pub niveau: Option<String>,
    #[serde(default)]
    pub statut: Option<String>,
}
