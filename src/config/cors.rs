use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use super::env_or;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: AllowedOrigins,
    pub max_age: Duration,
}

impl CorsConfig {
    /// `CORS_ORIGINS` is a comma separated list; unset, empty or `*` allows
    /// any origin.
    pub fn from_env() -> Self {
        let raw = env_or("CORS_ORIGINS", "*");
        let origins: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let allowed_origins = if origins.is_empty() || origins.iter().any(|o| o == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        };

        CorsConfig {
            allowed_origins,
            max_age: Duration::from_secs(3600),
        }
    }

    pub fn create_layer(&self) -> CorsLayer {
        let allow_origin = match &self.allowed_origins {
            AllowedOrigins::Any => AllowOrigin::from(Any),
            AllowedOrigins::List(origins) => {
                let values: Vec<HeaderValue> = origins
                    .iter()
                    .filter_map(|origin| match origin.parse() {
                        Ok(value) => Some(value),
                        Err(_) => {
                            warn!("Ignoring invalid CORS origin {:?}", origin);
                            None
                        }
                    })
                    .collect();
                AllowOrigin::list(values)
            }
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
            .max_age(self.max_age)
    }
}
