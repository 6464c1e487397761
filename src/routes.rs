use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{docs, handlers, AppState};

/// Builds the full HTTP surface. CORS is layered on by the caller since it
/// depends on configuration.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/todo", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/todo/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        );

    Router::new()
        .nest("/api", api)
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
