//! HTTP transport settings and the shared request executor.
//!
//! Every Neutron operation is one [`ApiRequest`] handed to a
//! [`RequestExecutor`]. The executor attaches the auth token, sends the
//! request, reads the whole body and compares the status against the single
//! status the operation expects. Decoding is left to the caller.

use crate::error::{Error, Result};
use crate::query::QueryParams;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Header carrying the Keystone token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Default `User-Agent` sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("neutron-core/", env!("CARGO_PKG_VERSION"));

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP client configuration.
///
/// Anything left unset falls back to the `reqwest` defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Whole-request timeout
    pub timeout: Option<Duration>,

    /// `User-Agent` header override
    pub user_agent: Option<String>,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: None,
            user_agent: None,
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Build a `reqwest::Client` from this config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be constructed.
    pub fn build_http_client(&self) -> Result<Client> {
        let mut builder = ClientBuilder::new()
            .user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT));

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if !self.enable_compression {
            builder = builder.no_gzip();
        }

        builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One HTTP round trip, described builder-style.
///
/// The expected status defaults to `200 OK`.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    url: Url,
    query: QueryParams,
    body: Option<Vec<u8>>,
    expected: StatusCode,
}

impl ApiRequest {
    /// Start a request with an arbitrary method.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            query: QueryParams::new(),
            body: None,
            expected: StatusCode::OK,
        }
    }

    /// Start a `GET` request.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Start a `POST` request.
    #[must_use]
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    /// Start a `DELETE` request.
    #[must_use]
    pub fn delete(url: Url) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Attach query parameters.
    #[must_use]
    pub fn query(mut self, params: QueryParams) -> Self {
        self.query = params;
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] if the payload cannot be serialized.
    pub fn json<B>(mut self, payload: &B) -> Result<Self>
    where
        B: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(payload)
            .map_err(|err| Error::ParseError(format!("invalid request body: {err}")))?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Set the single status code that counts as success.
    #[must_use]
    pub fn expect_status(mut self, status: StatusCode) -> Self {
        self.expected = status;
        self
    }
}

/// Executes [`ApiRequest`]s with a fixed auth token.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    http: Client,
    token: Arc<SecretString>,
}

impl RequestExecutor {
    /// Create an executor around an existing HTTP client.
    #[must_use]
    pub fn new(http: Client, token: impl Into<String>) -> Self {
        let token: String = token.into();
        Self {
            http,
            token: Arc::new(SecretString::from(token)),
        }
    }

    /// Create an executor, building the HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &ClientConfig, token: impl Into<String>) -> Result<Self> {
        Ok(Self::new(config.build_http_client()?, token))
    }

    /// Perform the round trip and return the raw response body.
    ///
    /// # Errors
    ///
    /// - [`Error::HttpError`] / [`Error::Timeout`] on transport failure
    /// - [`Error::ApiError`] when the status differs from the expected one
    pub async fn execute(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let ApiRequest {
            method,
            url,
            query,
            body,
            expected,
        } = request;
        let path = url.path().to_string();

        let mut builder = self
            .http
            .request(method.clone(), url)
            .header(AUTH_TOKEN_HEADER, self.token.expose_secret())
            .header(ACCEPT, JSON_CONTENT_TYPE);
        if !query.is_empty() {
            builder = builder.query(query.as_pairs());
        }
        if let Some(payload) = body {
            builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(payload);
        }

        info!(%method, path = %path, "Neutron request");

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(Error::from)?;

        debug!(%status, len = bytes.len(), "Neutron response");

        if status != expected {
            warn!(%status, %expected, path = %path, "unexpected Neutron response status");
            return Err(Error::ApiError {
                code: status.as_u16(),
                status: status.to_string(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }
}

/// Decode a response body, naming the request path on failure.
///
/// # Errors
///
/// Returns [`Error::ParseError`] if the body does not match `R`.
pub fn decode_body<R>(path: &str, bytes: &[u8]) -> Result<R>
where
    R: DeserializeOwned,
{
    serde_json::from_slice(bytes)
        .map_err(|err| Error::ParseError(format!("invalid response for `{path}`: {err}")))
}
