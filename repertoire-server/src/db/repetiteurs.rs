//! Tutor record queries
//!
//! The `matieres` column stores the encoded competency text; callers
//! encode before writing and decode after reading. This module treats
//! it as opaque except for the substring filters, which match against
//! the stored text by design.

use shared::client::{RepetiteurPayload, RepetiteurQuery, RepetiteurResponse};
use shared::competence;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// Stored tutor row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Repetiteur {
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
    pub statut: String,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Repetiteur {
    /// Client view with the stored encoding decoded alongside it.
    pub fn into_response(self) -> RepetiteurResponse {
        let competences = competence::decode(&self.matieres);
        RepetiteurResponse {
            id: self.id,
            nom: self.nom,
            prenom: self.prenom,
            telephone: self.telephone,
            email: self.email,
            ville: self.ville,
            departement: self.departement,
            diplome: self.diplome,
            annee_entree: self.annee_entree,
            age: self.age,
            genre: self.genre,
            nationalite: self.nationalite,
            moyen_transport: self.moyen_transport,
            photo_url: self.photo_url,
            matieres: self.matieres,
            competences,
            statut: self.statut,
            created_by: self.created_by,
            updated_by: self.updated_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Insert a new tutor record. `matieres` is the already-encoded
/// competency text; `created_by` is NULL for public self-registration.
pub async fn create(
    pool: &SqlitePool,
    data: &RepetiteurPayload,
    matieres: &str,
    created_by: Option<&str>,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let statut = data.statut.as_deref().unwrap_or("Actif");
    let result = sqlx::query(
        "INSERT INTO repetiteurs
         (nom, prenom, telephone, email, ville, departement, diplome, annee_entree,
          age, genre, nationalite, moyen_transport, photo_url, matieres, statut,
          created_by, updated_by, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&data.nom)
    .bind(&data.prenom)
    .bind(&data.telephone)
    .bind(&data.email)
    .bind(&data.ville)
    .bind(&data.departement)
    .bind(&data.diplome)
    .bind(data.annee_entree)
    .bind(data.age)
    .bind(&data.genre)
    .bind(&data.nationalite)
    .bind(&data.moyen_transport)
    .bind(&data.photo_url)
    .bind(matieres)
    .bind(statut)
    .bind(created_by)
    .bind(created_by)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Full-row update; returns 0 when the id does not exist.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &RepetiteurPayload,
    matieres: &str,
    updated_by: &str,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let statut = data.statut.as_deref().unwrap_or("Actif");
    let result = sqlx::query(
        "UPDATE repetiteurs
         SET nom = ?, prenom = ?, telephone = ?, email = ?, ville = ?, departement = ?,
             diplome = ?, annee_entree = ?, age = ?, genre = ?, nationalite = ?,
             moyen_transport = ?, photo_url = ?, matieres = ?, statut = ?,
             updated_by = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(&data.nom)
    .bind(&data.prenom)
    .bind(&data.telephone)
    .bind(&data.email)
    .bind(&data.ville)
    .bind(&data.departement)
    .bind(&data.diplome)
    .bind(data.annee_entree)
    .bind(data.age)
    .bind(&data.genre)
    .bind(&data.nationalite)
    .bind(&data.moyen_transport)
    .bind(&data.photo_url)
    .bind(matieres)
    .bind(statut)
    .bind(updated_by)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Repetiteur>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM repetiteurs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM repetiteurs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Filtered listing. Text filters are case-insensitive substring
/// matches; `matiere` and `niveau` match against the stored encoded
/// competency column.
pub async fn search(
    pool: &SqlitePool,
    filter: &RepetiteurQuery,
) -> Result<Vec<Repetiteur>, sqlx::Error> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM repetiteurs WHERE 1=1");

    if let Some(q) = non_blank(&filter.q) {
        let pattern = like_pattern(q);
        qb.push(" AND (nom LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR prenom LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
    if let Some(ville) = non_blank(&filter.ville) {
        qb.push(" AND ville LIKE ")
            .push_bind(like_pattern(ville))
            .push(" ESCAPE '\\'");
    }
    if let Some(departement) = non_blank(&filter.departement) {
        qb.push(" AND departement LIKE ")
            .push_bind(like_pattern(departement))
            .push(" ESCAPE '\\'");
    }
    if let Some(matiere) = non_blank(&filter.matiere) {
        qb.push(" AND matieres LIKE ")
            .push_bind(like_pattern(matiere))
            .push(" ESCAPE '\\'");
    }
    if let Some(niveau) = non_blank(&filter.niveau) {
        qb.push(" AND matieres LIKE ")
            .push_bind(like_pattern(niveau))
            .push(" ESCAPE '\\'");
    }
    if let Some(statut) = non_blank(&filter.statut) {
        qb.push(" AND statut = ").push_bind(statut.to_string());
    }

    qb.push(" ORDER BY nom ASC, prenom ASC");
    qb.build_query_as().fetch_all(pool).await
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn like_pattern(term: &str) -> String {
    // Escape LIKE metacharacters so user input stays a literal match
    let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}
