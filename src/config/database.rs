use std::env;

use sqlx::postgres::PgConnectOptions;

use super::{env_or, env_parse};

/// Connection settings for the PostgreSQL store.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        DatabaseConfig {
            host: env_or("DB_HOST", "db"),
            port: env_parse("DB_PORT", 5432),
            user: env_or("DB_USER", "postgres"),
            // Set but empty is an empty password, not the default
            password: env::var("DB_PASS").unwrap_or_else(|_| "example".to_string()),
            name: env_or("DB_NAME", "mydb"),
            max_connections: env_parse("DB_MAX_CONNECTIONS", 10),
        }
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

// Keeps the password out of logs
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}
