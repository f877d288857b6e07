use std::time::Duration;

pub const API_URL_ENV: &str = "SCENARIO_API_URL";
pub const STATIC_URL_ENV: &str = "SCENARIO_STATIC_URL";
pub const TIMEOUT_ENV: &str = "SCENARIO_HTTP_TIMEOUT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the generation service and its static map resources live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    pub api_base_url: String,
    /// Base for `/maps/<name>.geojson` overlay resources.
    pub static_base_url: String,
    pub timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            static_base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GatewaySettings {
    /// Reads the settings from the environment, falling back to the defaults
    /// for anything unset. The static url follows the api url unless set.
    pub fn from_env() -> Self {
        let api_base_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let static_base_url = std::env::var(STATIC_URL_ENV).unwrap_or_else(|_| api_base_url.clone());

        let timeout_secs = match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!("Ignoring {}='{}': not a whole number of seconds. Using {}s.", TIMEOUT_ENV, raw, DEFAULT_TIMEOUT_SECS);
                DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self::default().with_api_base_url(api_base_url).with_static_base_url(static_base_url).with_timeout(Duration::from_secs(timeout_secs))
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_static_base_url(mut self, url: impl Into<String>) -> Self {
        self.static_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
