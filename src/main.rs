use todo_api::{config::AppConfig, db, routes, AppState};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    // Database connection
    let pool = db::create_pool(&config.database).await?;

    // Ensure the enum type and tables exist
    db::bootstrap_schema(&pool).await?;

    let app_state = AppState::from_pool(pool);

    let app = routes::router(app_state).layer(config.cors.create_layer());

    let addr = config.bind_address();
    tracing::info!("Server running on http://{}", addr);
    tracing::info!("OpenAPI document at http://{}/api-docs/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
