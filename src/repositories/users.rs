use sqlx::PgPool;

use crate::db::models::{User, UserRoleRow};

const COLUMNS: &str = "\
    user_id, role_id, first_name, last_name, email, phone, password_hash, \
    is_active, created_at, updated_at";

pub(crate) async fn find_by_id(pool: &PgPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE user_id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Matches the full name, the first name or the last name; the oldest account wins.
pub(crate) async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS}
         FROM users
         WHERE CONCAT(first_name, ' ', last_name) = $1 OR first_name = $1 OR last_name = $1
         ORDER BY user_id
         LIMIT 1"
    ))
    .bind(name.trim())
    .fetch_optional(pool)
    .await
}

pub(crate) async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE email = $1"))
        .bind(email.trim())
        .fetch_optional(pool)
        .await
}

pub(crate) async fn exists_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT user_id FROM users WHERE email = $1")
        .bind(email.trim())
        .fetch_optional(pool)
        .await
}

pub(crate) async fn find_role_by_id(
    pool: &PgPool,
    user_id: i64,
) -> Result<Option<UserRoleRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRoleRow>(
        "SELECT role_id, first_name, last_name FROM users WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users ORDER BY user_id"))
        .fetch_all(pool)
        .await
}

pub(crate) struct CreateUser<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: Option<&'a str>,
    pub password_hash: String,
}

/// Role and active flag come from the column defaults.
pub(crate) async fn create(pool: &PgPool, params: CreateUser<'_>) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (email, first_name, last_name, phone, password_hash)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {COLUMNS}",
    ))
    .bind(params.email.trim())
    .bind(params.first_name.trim())
    .bind(params.last_name.trim())
    .bind(params.phone.map(str::trim).filter(|phone| !phone.is_empty()))
    .bind(params.password_hash)
    .fetch_one(pool)
    .await
}
