use weather_core::Config;

/// Upstream endpoint overrides, used by tests to point the provider at a
/// mock server. Production traffic uses the provider's built-in endpoints.
#[derive(Debug, Clone)]
pub struct BaseUrls {
    pub api: String,
    pub geo: String,
}

/// Shared application state.
///
/// The provider is constructed per request from `config`, so a missing API
/// key is a request-time error rather than a startup crash.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub base_urls: Option<BaseUrls>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            base_urls: None,
        }
    }

    pub fn with_base_urls(config: Config, api: String, geo: String) -> Self {
        Self {
            config,
            base_urls: Some(BaseUrls { api, geo }),
        }
    }
}
