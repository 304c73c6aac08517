//! Core library for the weather panel.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The normalized forecast data model
//! - The OpenWeatherMap provider and the daily-sampling aggregation
//!
//! It is used by `weather-server` and `weather-viewer`, but can also be
//! reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::WeatherError;
pub use model::{DailyWeather, ForecastResult, LocationInfo};
pub use provider::{ForecastProvider, OpenWeatherProvider, provider_from_config};
