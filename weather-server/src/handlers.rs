use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use tracing::instrument;
use weather_core::{
    ForecastProvider, ForecastResult, OpenWeatherProvider, WeatherError, provider_from_config,
};

use crate::state::AppState;

/// Single-field error body returned for every failure mode.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/weather` — run the full aggregation and return the normalized
/// forecast, or a 500 with `{ "error": ... }` on any failure (missing
/// credential included).
#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
) -> Result<Json<ForecastResult>, (StatusCode, Json<ErrorResponse>)> {
    match fetch_forecast(&state).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            tracing::error!(error = %err, "Weather aggregation failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            ))
        }
    }
}

async fn fetch_forecast(state: &AppState) -> Result<ForecastResult, WeatherError> {
    let provider: Box<dyn ForecastProvider> = match &state.base_urls {
        None => provider_from_config(&state.config)?,
        Some(base) => {
            let api_key = state.config.require_api_key()?;
            Box::new(OpenWeatherProvider::with_base_urls(
                api_key.to_owned(),
                base.api.clone(),
                base.geo.clone(),
            )?)
        }
    };

    provider.get_forecast(&state.config.place).await
}
