//! Binary crate for the weather panel HTTP API.
//!
//! Serves `GET /api/weather` (the aggregated forecast) and `GET /health`.

use anyhow::Result;
use tokio::net::TcpListener;
use weather_core::Config;

mod handlers;
mod router;
mod state;


/// Get bind address from environment or use default
fn bind_address() -> String {
    std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::load()?;
    if config.api_key.is_none() {
        // Not fatal: the route reports a configuration error per request.
        tracing::warn!("No OpenWeatherMap API key configured");
    }

    let app = router::create_router(state::AppState::new(config));

    let bind_address = bind_address();
    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("Weather panel API listening on {bind_address}");

    axum::serve(listener, app).await?;

    Ok(())
}
