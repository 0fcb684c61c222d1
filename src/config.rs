use std::env;

/// Runtime settings read from the environment (and `.env`, via dotenvy).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Raw SESSION_KEY; shorter than 64 bytes means a random key per process.
    pub session_key: Option<String>,
    pub cookie_secure: bool,
    pub app_name: String,
    pub seed_demo: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;
        Ok(AppConfig {
            database_url,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            session_key: env::var("SESSION_KEY").ok(),
            cookie_secure: flag("COOKIE_SECURE"),
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "Clinicdesk".to_string()),
            seed_demo: flag("SEED_DEMO"),
        })
    }

    /// Defaults for tests and tools that never read the environment.
    pub fn for_database(database_url: &str) -> Self {
        AppConfig {
            database_url: database_url.to_string(),
            bind_addr: "127.0.0.1:8080".to_string(),
            session_key: None,
            cookie_secure: false,
            app_name: "Clinicdesk".to_string(),
            seed_demo: false,
        }
    }
}

fn flag(name: &str) -> bool {
    parse_flag(env::var(name).ok().as_deref())
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
