use crate::{Config, ForecastResult, error::WeatherError};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Seam between the HTTP surface and the upstream weather service.
///
/// One invocation resolves the place name, retrieves current conditions and
/// the multi-day forecast, and produces the normalized day sequence. Each
/// call is independent and stateless; a failed upstream call aborts the
/// whole operation.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn get_forecast(&self, place: &str) -> Result<ForecastResult, WeatherError>;
}

/// Construct the provider from config.
///
/// A missing API key surfaces here as a `Config` error, so the caller can
/// report it per request instead of failing at startup.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn ForecastProvider>, WeatherError> {
    let api_key = config.require_api_key()?;
    let provider = OpenWeatherProvider::new(api_key.to_owned())?;
    Ok(Box::new(provider))
}
