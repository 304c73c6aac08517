use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    error::WeatherError,
    model::{DailyWeather, ForecastResult, LocationInfo},
    provider::ForecastProvider,
};

const API_BASE: &str = "https://api.openweathermap.org/data/2.5";
const GEO_BASE: &str = "https://api.openweathermap.org/geo/1.0";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// The forecast endpoint returns fixed 3-hour steps, so every 8th point is
/// one sample per day at the same time-of-day as the list's first entry.
const FORECAST_STRIDE: usize = 8;
const MAX_FORECAST_DAYS: usize = 6;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
    api_base: String,
    geo_base: String,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self, WeatherError> {
        Self::with_base_urls(api_key, API_BASE.to_string(), GEO_BASE.to_string())
    }

    /// Like [`new`](Self::new), but against custom endpoints. Used by tests
    /// to point the provider at a mock server.
    pub fn with_base_urls(
        api_key: String,
        api_base: String,
        geo_base: String,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            api_key,
            http,
            api_base,
            geo_base,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        label: &str,
    ) -> Result<T, WeatherError> {
        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let mut msg = format!("{label} API error: {}", status.as_u16());
            let detail = truncate_body(&body);
            if !detail.is_empty() {
                msg.push_str(&format!(" ({detail})"));
            }
            return Err(WeatherError::Upstream(msg));
        }

        serde_json::from_str(&body).map_err(|e| {
            WeatherError::Upstream(format!("Failed to parse {label} response: {e}"))
        })
    }

    /// Resolve the place name to coordinates; the lookup is constrained to a
    /// single best match.
    async fn geocode(&self, place: &str) -> Result<GeoEntry, WeatherError> {
        let url = format!("{}/direct", self.geo_base);
        let matches: Vec<GeoEntry> = self
            .get_json(
                &url,
                &[("q", place), ("limit", "1"), ("appid", &self.api_key)],
                "Geocoding",
            )
            .await?;

        matches
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Upstream("Location not found".to_string()))
    }

    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<OwCurrentResponse, WeatherError> {
        let url = format!("{}/weather", self.api_base);
        let (lat, lon) = (lat.to_string(), lon.to_string());
        self.get_json(
            &url,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", "metric"),
                ("appid", &self.api_key),
                ("lang", "en"),
            ],
            "Weather",
        )
        .await
    }

    async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<OwForecastResponse, WeatherError> {
        let url = format!("{}/forecast", self.api_base);
        let (lat, lon) = (lat.to_string(), lon.to_string());
        self.get_json(
            &url,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", "metric"),
                ("appid", &self.api_key),
                ("lang", "en"),
            ],
            "Forecast",
        )
        .await
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn get_forecast(&self, place: &str) -> Result<ForecastResult, WeatherError> {
        let geo = self.geocode(place).await?;
        tracing::debug!(lat = geo.lat, lon = geo.lon, "Resolved location coordinates");

        // Sequential on purpose: the first failure aborts the whole
        // aggregation, and there are no retries.
        let current = self.fetch_current(geo.lat, geo.lon).await?;
        let forecast = self.fetch_forecast(geo.lat, geo.lon).await?;

        let mut days = Vec::with_capacity(1 + MAX_FORECAST_DAYS);
        days.push(current_day(&current, Utc::now())?);
        for entry in sample_daily(&forecast.list) {
            days.push(forecast_day(entry)?);
        }

        tracing::info!(
            location = %geo.name,
            days = days.len(),
            "Weather data fetched successfully"
        );

        Ok(ForecastResult {
            location: LocationInfo {
                name: geo.name,
                country: geo.country,
            },
            days,
        })
    }
}

/// Select one forecast point per day: every `FORECAST_STRIDE`th entry
/// starting at index 0, truncated to `MAX_FORECAST_DAYS`.
fn sample_daily(list: &[OwForecastEntry]) -> Vec<&OwForecastEntry> {
    list.iter()
        .step_by(FORECAST_STRIDE)
        .take(MAX_FORECAST_DAYS)
        .collect()
}

/// Current-conditions entry; `date` is the retrieval instant, not an
/// upstream timestamp.
fn current_day(
    payload: &OwCurrentResponse,
    retrieved_at: DateTime<Utc>,
) -> Result<DailyWeather, WeatherError> {
    let condition = first_condition(&payload.weather, "Weather")?;

    Ok(DailyWeather {
        date: retrieved_at.to_rfc3339(),
        temperature: payload.main.temp.round() as i32,
        condition: condition.main.clone(),
        description: condition.description.clone(),
        humidity: payload.main.humidity,
        wind_speed: payload.wind.as_ref().map_or(0.0, |w| w.speed),
        icon: condition.icon.clone(),
    })
}

fn forecast_day(entry: &OwForecastEntry) -> Result<DailyWeather, WeatherError> {
    let condition = first_condition(&entry.weather, "Forecast")?;

    Ok(DailyWeather {
        date: entry.dt_txt.clone(),
        temperature: entry.main.temp.round() as i32,
        condition: condition.main.clone(),
        description: condition.description.clone(),
        humidity: entry.main.humidity,
        wind_speed: entry.wind.as_ref().map_or(0.0, |w| w.speed),
        icon: condition.icon.clone(),
    })
}

fn first_condition<'a>(
    weather: &'a [OwWeather],
    label: &str,
) -> Result<&'a OwWeather, WeatherError> {
    weather.first().ok_or_else(|| {
        WeatherError::Upstream(format!("{label} API returned no condition data"))
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Cut on a char boundary; byte 200 may fall inside a multibyte char.
    let end = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
    format!("{}...", &body[..end])
}

#[derive(Debug, Deserialize)]
struct GeoEntry {
    lat: f64,
    lon: f64,
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}
