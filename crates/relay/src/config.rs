//! Configuration types for the relay.

use crate::error::RelayResult;
use std::time::Duration;
use url::Url;

/// Lovense command endpoint
pub const DEFAULT_COMMAND_URL: &str = "https://api.lovense.com/api/lan/v2/command";

/// Lovense QR pairing endpoint
pub const DEFAULT_QR_URL: &str = "https://api.lovense.com/api/lan/getQrCode";

/// Where and how the relay sends requests.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Endpoint receiving command payloads.
    pub command_url: Url,
    /// Endpoint receiving QR pairing requests.
    pub qr_url: Url,
    /// Request timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
}

impl RelayConfig {
    /// Create a configuration with explicit endpoints and no timeout override.
    pub fn new(command_url: Url, qr_url: Url) -> Self {
        Self {
            command_url,
            qr_url,
            timeout: None,
        }
    }

    /// Parse both endpoints from strings.
    pub fn from_endpoints(command_url: &str, qr_url: &str) -> RelayResult<Self> {
        Ok(Self::new(Url::parse(command_url)?, Url::parse(qr_url)?))
    }

    /// The public Lovense cloud endpoints.
    pub fn lovense_cloud() -> RelayResult<Self> {
        Self::from_endpoints(DEFAULT_COMMAND_URL, DEFAULT_QR_URL)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lovense_cloud_endpoints() {
        let config = RelayConfig::lovense_cloud().unwrap();

        assert_eq!(config.command_url.as_str(), DEFAULT_COMMAND_URL);
        assert_eq!(config.qr_url.as_str(), DEFAULT_QR_URL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_with_timeout() {
        let config = RelayConfig::lovense_cloud()
            .unwrap()
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(RelayConfig::from_endpoints("not a url", DEFAULT_QR_URL).is_err());
    }
}
