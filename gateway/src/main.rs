use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use soil_survey::{SoilAnalyzer, SurveyConfig};

mod routes;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SoilAnalyzer>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "agro_gateway=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Survey source configuration (endpoint overridable for staging mirrors)
    let mut config = SurveyConfig::default();
    if let Ok(endpoint) = std::env::var("AGRO_SURVEY_ENDPOINT") {
        config.endpoint = endpoint;
    }
    tracing::info!("   Survey endpoint: {}", config.endpoint);
    tracing::info!("   Survey timeout: {}s", config.timeout_sec);

    let state = AppState {
        analyzer: Arc::new(SoilAnalyzer::new(config)),
    };

    // API routes for soil analysis
    let soil_routes = Router::new()
        .route("/soil/analyze", post(routes::analyze_soil))
        .with_state(state);

    let app = Router::new()
        .route("/health", get(routes::health))
        .nest("/api/v1", soil_routes)
        .layer(CorsLayer::permissive());

    let port = std::env::var("AGRO_GATEWAY_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "18701".to_string());
    let addr = format!("0.0.0.0:{}", port);

    tracing::info!("🌾 Agro Gateway starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
