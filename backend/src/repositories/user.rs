//! Repository functions for user accounts.

use chrono::Utc;
use sqlx::PgPool;

use crate::models::user::User;

const USER_COLUMNS: &str =
    "id, username, password_hash, full_name, role, nrp, is_active, created_at, updated_at";

pub async fn insert_user(pool: &PgPool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, username, password_hash, full_name, role, nrp, is_active, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.full_name)
    .bind(user.role.as_str())
    .bind(&user.nrp)
    .bind(user.is_active)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn find_user_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id ASC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn update_user(pool: &PgPool, user: &User) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET full_name = $1, role = $2, nrp = $3, is_active = $4, updated_at = $5 \
         WHERE id = $6",
    )
    .bind(&user.full_name)
    .bind(user.role.as_str())
    .bind(&user.nrp)
    .bind(user.is_active)
    .bind(Utc::now())
    .bind(&user.id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn update_password(
    pool: &PgPool,
    user_id: &str,
    password_hash: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET password_hash = $1, updated_at = $2 WHERE id = $3")
        .bind(password_hash)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn deactivate_user(pool: &PgPool, user_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET is_active = FALSE, updated_at = $1 WHERE id = $2")
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn admin_exists(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let result: Option<(i32,)> =
        sqlx::query_as("SELECT 1 FROM users WHERE role = 'admin' LIMIT 1")
            .fetch_optional(pool)
            .await?;
    Ok(result.is_some())
}
