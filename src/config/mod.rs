pub mod cors;
pub mod database;

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use tracing::warn;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;

/// Process-wide settings read from the environment (and `.env`, loaded by the
/// binaries through dotenvy before this is called).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = AppConfig {
            host: env_parse("HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: env_parse("PORT", 3000),
            database: DatabaseConfig::from_env(),
            cors: CorsConfig::from_env(),
        };

        tracing::info!(
            "Config loaded - Listen: {}, Database: {}@{}:{}/{}",
            config.bind_address(),
            config.database.user,
            config.database.host,
            config.database.port,
            config.database.name
        );

        config
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

pub(crate) fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Reads and parses `key`, falling back to `default` when it is unset or does
/// not parse.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.is_empty() => raw.parse().unwrap_or_else(|_| {
            warn!("{}={:?} is not valid; using {}", key, raw, default);
            default
        }),
        _ => default,
    }
}
