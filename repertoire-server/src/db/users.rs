//! Staff account queries

use shared::Role;
use shared::client::UserInfo;
use sqlx::SqlitePool;

/// Stored staff account row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub role: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl User {
    /// Parsed role; unknown stored text degrades to the least
    /// privileged role so a bad row can never widen access.
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Viewer)
    }

    pub fn into_info(self) -> UserInfo {
        let role = self.role();
        UserInfo {
            id: self.id,
            name: self.name,
            email: self.email,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

pub async fn create(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    email: &str,
    hashed_password: &str,
    role: Role,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, name, email, hashed_password, role, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(hashed_password)
    .bind(role.as_str())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Update profile fields; a `None` password keeps the stored hash.
pub async fn update(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    email: &str,
    role: Role,
    hashed_password: Option<&str>,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users
         SET name = ?, email = ?, role = ?,
             hashed_password = COALESCE(?, hashed_password),
             updated_at = ?
         WHERE id = ?",
    )
    .bind(name)
    .bind(email)
    .bind(role.as_str())
    .bind(hashed_password)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users ORDER BY created_at ASC")
        .fetch_all(pool)
        .await
}

pub async fn admin_exists(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let exists: (i64,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE role = 'admin')")
            .fetch_one(pool)
            .await?;
    Ok(exists.0 != 0)
}

/// Insert the bootstrap administrator in a single statement that is a
/// no-op once any admin row exists. Returns false when the guard
/// suppressed the insert, so two concurrent bootstrap calls can never
/// both succeed.
pub async fn create_admin_if_none(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    email: &str,
    hashed_password: &str,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO users (id, name, email, hashed_password, role, created_at, updated_at)
         SELECT ?, ?, ?, ?, 'admin', ?, ?
         WHERE NOT EXISTS (SELECT 1 FROM users WHERE role = 'admin')",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(hashed_password)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}
