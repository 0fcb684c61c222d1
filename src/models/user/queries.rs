use sqlx::PgPool;
use super::types::{NewUser, User};

const SELECT_USER: &str = "SELECT id, email, password_hash, display_name FROM users";

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Emails are matched case-insensitively.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE lower(email) = lower($1)"))
        .bind(email.trim())
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, new: &NewUser) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, display_name) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(new.email.trim())
    .bind(&new.password_hash)
    .bind(new.display_name.trim())
    .fetch_one(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}
