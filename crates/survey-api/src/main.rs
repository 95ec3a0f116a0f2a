//! Scenario survey API server entry point.

use std::error::Error;
use std::sync::{Arc, Mutex};

use sqlx::postgres::PgPoolOptions;
use survey_api::config::AppConfig;
use survey_api::routes;
use survey_api::state::AppState;
use survey_api::telemetry;
use survey_core::clock::SystemClock;
use survey_core::rng::SystemRng;
use survey_store::pg_response_repository::PgResponseRepository;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Read configuration from environment.
    let config = AppConfig::from_env()?;

    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting scenario survey API server");

    // Load the catalog before touching the network.
    let catalog = config.load_catalog()?;

    // Create database connection pool and bring the schema up to date.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    // Build application state.
    let app_state = AppState::new(
        Arc::new(catalog),
        Arc::new(SystemClock),
        Arc::new(Mutex::new(SystemRng::from_os())),
        Arc::new(PgResponseRepository::new(pool)),
        config.admin_passphrase.as_str(),
    );

    // Build router.
    // TODO: Replace CorsLayer::permissive() with the survey front-end origin.
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    telemetry.shutdown();

    Ok(())
}
