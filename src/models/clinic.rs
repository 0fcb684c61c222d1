use sqlx::PgPool;

/// Tenant record. Every booking belongs to exactly one clinic.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Clinic {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
}

/// The clinic owned by `user_id`, if any.
pub async fn find_by_owner(pool: &PgPool, user_id: i64) -> Result<Option<Clinic>, sqlx::Error> {
    sqlx::query_as::<_, Clinic>("SELECT id, owner_id, name FROM clinics WHERE owner_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, owner_id: i64, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("INSERT INTO clinics (owner_id, name) VALUES ($1, $2) RETURNING id")
        .bind(owner_id)
        .bind(name)
        .fetch_one(pool)
        .await
}
