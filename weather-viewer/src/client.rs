use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use weather_core::ForecastResult;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Viewer-side fetch failures. Never fatal: the run loop surfaces the
/// message as a banner and keeps the last good data on screen.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to reach weather API: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Api(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    /// Fetch the latest aggregated forecast from the server. Non-success
    /// responses carry a `{ "error": ... }` body whose message is surfaced
    /// verbatim.
    pub async fn fetch(&self) -> Result<ForecastResult, ClientError> {
        let url = format!("{}/api/weather", self.base_url);
        tracing::debug!(%url, "Fetching weather data");

        let res = self.http.get(&url).send().await?;
        let status = res.status();

        if !status.is_success() {
            let message = match res.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("Failed to fetch weather data (status {})", status.as_u16()),
            };
            return Err(ClientError::Api(message));
        }

        Ok(res.json::<ForecastResult>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_parses_forecast_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "location": { "name": "Jianye", "country": "CN" },
                "weather": [{
                    "date": "2025-06-01T12:00:00Z",
                    "temperature": 22,
                    "condition": "Clouds",
                    "description": "overcast clouds",
                    "humidity": 55,
                    "windSpeed": 3.1,
                    "icon": "04d"
                }]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = client.fetch().await.unwrap();

        assert_eq!(result.location.name, "Jianye");
        assert_eq!(result.days.len(), 1);
        assert_eq!(result.days[0].wind_speed, 3.1);
    }

    #[tokio::test]
    async fn fetch_surfaces_server_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "error": "Location not found" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.fetch().await.unwrap_err();

        assert_eq!(err.to_string(), "Location not found");
    }

    #[tokio::test]
    async fn fetch_falls_back_to_status_when_body_is_not_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.fetch().await.unwrap_err();

        assert!(err.to_string().contains("status 502"));
    }

    #[tokio::test]
    async fn trailing_slash_in_server_url_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "location": { "name": "Jianye", "country": "CN" },
                "weather": []
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(format!("{}/", server.uri())).unwrap();
        assert!(client.fetch().await.is_ok());
    }
}
