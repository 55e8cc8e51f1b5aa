//! Configuration structures for Neutron clients.
//!
//! [`NeutronClientConfig`] is the serializable form of everything needed to
//! reach a Neutron endpoint, suitable for embedding in a caller's own config
//! file.

use crate::client::ClientConfig;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Configuration for a Neutron client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NeutronClientConfig {
    /// Neutron endpoint base URL, e.g. `http://192.168.56.101:9696`
    #[validate(url)]
    pub url: String,

    /// Keystone token sent as `X-Auth-Token`
    #[validate(length(min = 1))]
    #[serde(skip_serializing)]
    pub token: String,

    /// Request timeout in seconds; the transport default applies when unset
    #[validate(range(min = 1, max = 300))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Custom `User-Agent` header value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl NeutronClientConfig {
    /// Create a new client configuration with required parameters.
    ///
    /// # Arguments
    ///
    /// * `url` - The Neutron endpoint (e.g., "http://192.168.56.101:9696")
    /// * `token` - An already-issued auth token
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if either value is empty or the URL is invalid.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            url: url.into(),
            token: token.into(),
            request_timeout_secs: None,
            user_agent: None,
        };
        config.check()?;
        Ok(config)
    }

    /// Validate the configuration, reporting missing values first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first problem found.
    pub fn check(&self) -> Result<(), Error> {
        if self.url.is_empty() {
            return Err(Error::ConfigError("missing URL".to_string()));
        }
        if self.token.is_empty() {
            return Err(Error::ConfigError("missing token".to_string()));
        }
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = Some(seconds);
        self
    }

    /// Set the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Get the request timeout as a Duration, if set.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Parse the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_url(&self) -> Result<Url, Error> {
        Url::parse(&self.url).map_err(|e| Error::ConfigError(format!("Invalid Neutron URL: {e}")))
    }

    /// HTTP transport settings derived from this configuration.
    #[must_use]
    pub fn http_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        if let Some(timeout) = self.timeout() {
            config = config.with_timeout(timeout);
        }
        if let Some(agent) = &self.user_agent {
            config = config.with_user_agent(agent.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://192.168.56.101:9696";

    #[test]
    fn test_config_new() {
        let config = NeutronClientConfig::new(URL, "some-token").unwrap();
        assert_eq!(config.url, URL);
        assert_eq!(config.token, "some-token");
        assert!(config.request_timeout_secs.is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_config_missing_url() {
        for token in ["", "some-token"] {
            let err = NeutronClientConfig::new("", token).unwrap_err();
            assert_eq!(err, Error::ConfigError("missing URL".to_string()));
        }
    }

    #[test]
    fn test_config_missing_token() {
        let err = NeutronClientConfig::new(URL, "").unwrap_err();
        assert_eq!(err, Error::ConfigError("missing token".to_string()));
    }

    #[test]
    fn test_config_invalid_url() {
        let err = NeutronClientConfig::new("not-a-url", "some-token").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_config_timeout_range() {
        let mut config = NeutronClientConfig::new(URL, "t").unwrap().with_timeout(0);
        assert!(config.check().is_err());

        config.request_timeout_secs = Some(301);
        assert!(config.check().is_err());

        config.request_timeout_secs = Some(30);
        assert!(config.check().is_ok());
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_parse_url() {
        let config = NeutronClientConfig::new(URL, "t").unwrap();
        let url = config.parse_url().unwrap();
        assert_eq!(url.host_str(), Some("192.168.56.101"));
        assert_eq!(url.port(), Some(9696));
    }

    #[test]
    fn test_config_deserialize() {
        let config: NeutronClientConfig = serde_json::from_str(
            r#"{"url": "http://neutron:9696", "token": "abc", "request_timeout_secs": 15}"#,
        )
        .unwrap();
        assert!(config.check().is_ok());
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_config_serialize_omits_token() {
        let config = NeutronClientConfig::new(URL, "secret-token")
            .unwrap()
            .with_user_agent("orchestrator/1.0");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-token"));
        assert!(json.contains("orchestrator/1.0"));
    }

    #[test]
    fn test_http_config_from_config() {
        let config = NeutronClientConfig::new(URL, "t")
            .unwrap()
            .with_timeout(45)
            .with_user_agent("agent/2");
        let http = config.http_config();
        assert_eq!(http.timeout, Some(Duration::from_secs(45)));
        assert_eq!(http.user_agent.as_deref(), Some("agent/2"));
    }
}
