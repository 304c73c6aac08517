use thiserror::Error;

/// Failures surfaced by the forecast aggregation.
///
/// Everything that can go wrong maps onto one of two cases: either the
/// request cannot be attempted at all because no credential is configured,
/// or an upstream call failed (non-success status, empty geocoding match,
/// network error, unexpected payload shape).
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather API configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Upstream(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Upstream(format!("Network error: {err}"))
    }
}
