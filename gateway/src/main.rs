use anyhow::{Context, Result};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geofence_risk::ZoneRegistry;

mod deviation_routes;
mod risk_routes;
mod validate;

#[derive(Clone)]
pub struct AppState {
    pub zones: Arc<ZoneRegistry>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "wayguard_gateway=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Zone configuration is loaded once; scoring never re-reads it
    let zones_path =
        std::env::var("WAYGUARD_ZONES_PATH").unwrap_or_else(|_| "data/zones.json".to_string());
    let registry = geofence_risk::load_zones(&zones_path)
        .with_context(|| format!("loading zone configuration from {}", zones_path))?;
    tracing::info!("   Loaded {} risk zones from {}", registry.len(), zones_path);

    let state = AppState {
        zones: Arc::new(registry),
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/check", post(deviation_routes::check_route))
        .route("/score", get(risk_routes::score))
        .route("/zones", get(risk_routes::list_zones))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let port = std::env::var("WAYGUARD_GATEWAY_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "8050".to_string());
    let addr = format!("0.0.0.0:{}", port);

    tracing::info!("🧭 Wayguard Gateway starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "wayguard-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "time": chrono::Utc::now().to_rfc3339(),
        "zones_loaded": state.zones.len(),
        "zones_loaded_at": state.zones.loaded_at().to_rfc3339()
    }))
}
