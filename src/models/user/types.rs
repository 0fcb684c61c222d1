use serde::Deserialize;

/// Internal user struct for authentication — includes password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
}

impl User {
    /// Display name, or the email when none is set.
    pub fn name(&self) -> &str {
        if self.display_name.trim().is_empty() { &self.email } else { &self.display_name }
    }
}

/// New user data for creation. `password_hash` must already be hashed.
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}
