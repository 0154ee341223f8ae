use std::time::Duration;

use serde::Deserialize;

/// Generative endpoints routinely take tens of seconds
pub const RECOMMENDED_MIN_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Recommendation backend base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Ceiling for a single request, in seconds
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,

    /// Base URL for poster and backdrop images
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_timeout_secs() -> u64 {
    RECOMMENDED_MIN_TIMEOUT_SECS
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_timeout_secs: default_api_timeout_secs(),
            image_base_url: default_image_base_url(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.api_timeout_secs < RECOMMENDED_MIN_TIMEOUT_SECS {
            tracing::warn!(
                timeout_secs = config.api_timeout_secs,
                recommended = RECOMMENDED_MIN_TIMEOUT_SECS,
                "Request timeout is below the recommended floor for AI endpoints"
            );
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }
}
