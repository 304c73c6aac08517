use serde::{Deserialize, Serialize};

/// One entry of the panel: either current conditions (index 0) or a sampled
/// future day. Immutable once produced by the aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWeather {
    /// RFC 3339 instant for the current entry, provider `dt_txt` for
    /// forecast entries.
    pub date: String,
    /// Degrees Celsius, rounded to the nearest integer.
    pub temperature: i32,
    /// Provider's primary category, e.g. "Clear" or "Rain".
    pub condition: String,
    /// Provider's free-text description.
    pub description: String,
    /// Percent, 0-100.
    pub humidity: u8,
    /// Meters per second; 0 when the provider omits wind data.
    pub wind_speed: f64,
    /// Provider icon code, e.g. "04d".
    pub icon: String,
}

/// Resolved place, as reported by the geocoding lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub country: String,
}

/// Full aggregation output: the resolved location plus an ordered sequence
/// of days. Index 0 is always current conditions; indices 1.. are future
/// days at daily spacing, oldest first (at most 1 + 6 entries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub location: LocationInfo,
    #[serde(rename = "weather")]
    pub days: Vec<DailyWeather>,
}
