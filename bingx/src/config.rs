use std::time::Duration;

use url::Url;

use crate::error::{BingxError, Result};

pub const DEFAULT_BASE_URL: &str = "https://open-api.bingx.com";

/// Configuration for the BingX client.
#[derive(Debug, Clone)]
pub struct BingxConfig {
    /// Base URL for the REST API (e.g. `https://open-api.bingx.com`).
    pub base_url: String,
    /// API key sent as `X-BX-APIKEY`. Empty means unauthenticated.
    pub api_key: String,
    /// Secret used to sign private requests.
    pub api_secret: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for BingxConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl BingxConfig {
    /// Build a config from `BINGX_API_KEY`, `BINGX_API_SECRET` and
    /// `BINGX_BASE_URL`. Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("BINGX_API_KEY") {
            config.api_key = key.trim().to_string();
        }
        if let Ok(secret) = std::env::var("BINGX_API_SECRET") {
            config.api_secret = secret.trim().to_string();
        }
        if let Ok(base) = std::env::var("BINGX_BASE_URL") {
            if !base.trim().is_empty() {
                config.base_url = base.trim().to_string();
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Both halves of the key pair are present.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| BingxError::Config(format!("invalid base url {:?}: {e}", self.base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(BingxError::Config(format!(
                "unsupported url scheme {other:?} in {}",
                self.base_url
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_credentials() {
        let config = BingxConfig::default();
        assert!(!config.has_credentials());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_key_without_secret_is_not_credentials() {
        let config = BingxConfig {
            api_key: "key".into(),
            ..Default::default()
        };
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let bad = BingxConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(BingxError::Config(_))));

        let ws = BingxConfig {
            base_url: "wss://open-api.bingx.com".into(),
            ..Default::default()
        };
        assert!(ws.validate().is_err());
    }
}
