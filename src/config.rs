use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.mackerelio.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: Url,
    pub timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("mackerel-api-key is required")]
    MissingApiKey,
    #[error("mackerel-api-base must be a valid http(s) URL")]
    InvalidApiBase,
    #[error("timeout-secs must be greater than zero")]
    InvalidTimeout,
}

impl Config {
    /// Builds the config from already collected flag/env values.
    pub fn resolve(
        api_key: Option<String>,
        api_base: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let api_base = api_base
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = Url::parse(&api_base).map_err(|_| ConfigError::InvalidApiBase)?;
        if !matches!(api_base.scheme(), "http" | "https") || api_base.cannot_be_a_base() {
            return Err(ConfigError::InvalidApiBase);
        }

        let timeout = match timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => return Err(ConfigError::InvalidTimeout),
            secs => Duration::from_secs(secs),
        };

        Ok(Self {
            api_key,
            api_base,
            timeout,
        })
    }
}
