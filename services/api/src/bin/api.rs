//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{InMemoryContributionAdapter, MockAnalysisAdapter, StaticCatalogAdapter},
    config::Config,
    error::ApiError,
    web::{router, rest::ApiDoc, state::AppState},
};
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::Router;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use virasat_core::ledger::PreservationLedger;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Ledger & Service Adapters ---
    // One ledger per process; everything in it is gone on restart, which is
    // the intended lifecycle for this demo.
    let ledger = Arc::new(Mutex::new(PreservationLedger::with_policy(
        config.mint_policy,
    )));
    let catalog = Arc::new(StaticCatalogAdapter::new());
    let analysis = Arc::new(MockAnalysisAdapter::new(config.analysis_delay));
    let contributions = Arc::new(InMemoryContributionAdapter::new());
    info!(policy = ?config.mint_policy, "Ledger initialized");

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        ledger,
        catalog,
        analysis,
        contributions,
        config: config.clone(),
    });

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .map_err(|e| ApiError::Internal(format!("Invalid CORS_ORIGIN: {}", e)))?,
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    let api_router = router(app_state).layer(cors);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
