use crate::{db, AppState};
use axum::{extract::State, response::Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// "OK" or "ERROR"
    #[schema(example = "OK")]
    pub status: String,
    /// RFC 3339, UTC
    pub timestamp: String,
    /// "connected" or "disconnected"
    #[schema(example = "connected")]
    pub database: String,
}

/// GET /api/health - Liveness plus a database round trip
///
/// Always answers 200; a failing database shows up in the body.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Service status", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match db::ping(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            false
        }
    };

    Json(HealthResponse {
        status: if connected { "OK" } else { "ERROR" }.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    })
}
