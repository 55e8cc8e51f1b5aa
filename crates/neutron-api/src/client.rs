//! Asynchronous Neutron client implementation.

use crate::envelope::{unwrap_many, unwrap_one, Wrapped};
use crate::models::{Network, Port, Resource, Subnet};
use crate::Result;
use neutron_core::client::{ApiRequest, ClientConfig, RequestExecutor};
use neutron_core::config::NeutronClientConfig;
use neutron_core::ids::{NetworkId, PortId};
use neutron_core::query::QueryParams;
use neutron_core::Error;
use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("neutron-api/", env!("CARGO_PKG_VERSION"));

/// Path segment of the networking API version every resource lives under.
pub const API_VERSION: &str = "v2.0";

/// Builder for [`NeutronClient`].
#[derive(Debug, Clone)]
pub struct NeutronClientBuilder {
    base_url: Url,
    token: String,
    http_config: ClientConfig,
}

impl NeutronClientBuilder {
    /// Create a new builder from the endpoint URL and an auth token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if either value is empty, if the token
    /// is not a valid header value, or if the URL does not parse or cannot
    /// carry a path.
    pub fn new(base_url: impl AsRef<str>, token: impl Into<String>) -> Result<Self> {
        let base_url = base_url.as_ref();
        let token = token.into();

        if base_url.is_empty() {
            return Err(Error::ConfigError("missing URL".to_string()));
        }
        if token.is_empty() {
            return Err(Error::ConfigError("missing token".to_string()));
        }
        HeaderValue::from_str(&token)
            .map_err(|err| Error::ConfigError(format!("invalid token: {err}")))?;

        let url = Url::parse(base_url).map_err(|err| {
            Error::ConfigError(format!("Invalid Neutron base URL `{base_url}`: {err}"))
        })?;
        if url.cannot_be_a_base() {
            return Err(Error::ConfigError(format!(
                "Neutron base URL `{base_url}` cannot carry a path"
            )));
        }

        Ok(Self {
            base_url: url,
            token,
            http_config: ClientConfig::new().with_user_agent(USER_AGENT),
        })
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Set a whole-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config = self.http_config.with_timeout(timeout);
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http_config = self.http_config.with_user_agent(user_agent);
        self
    }

    /// Build the client instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<NeutronClient> {
        let executor = RequestExecutor::from_config(&self.http_config, self.token)?;
        Ok(NeutronClient {
            executor,
            base_url: self.base_url,
        })
    }
}

/// Asynchronous client for the Neutron networks, subnets and ports API.
///
/// Holds only the immutable endpoint and token; clones share the underlying
/// connection handle.
#[derive(Debug, Clone)]
pub struct NeutronClient {
    executor: RequestExecutor,
    base_url: Url,
}

impl NeutronClient {
    /// Construct directly from an endpoint URL and auth token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if either value is empty or invalid.
    pub fn new(base_url: impl AsRef<str>, token: impl Into<String>) -> Result<Self> {
        NeutronClientBuilder::new(base_url, token)?.build()
    }

    /// Construct from a deserialized configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration does not validate.
    pub fn from_config(config: &NeutronClientConfig) -> Result<Self> {
        config.check()?;
        let mut http_config = config.http_config();
        if http_config.user_agent.is_none() {
            http_config = http_config.with_user_agent(USER_AGENT);
        }
        NeutronClientBuilder::new(&config.url, config.token.clone())?
            .with_http_config(http_config)
            .build()
    }

    /// Access the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// List all networks visible to the token.
    pub async fn list_networks(&self) -> Result<Vec<Network>> {
        self.list(QueryParams::new()).await
    }

    /// List networks whose name matches `name` exactly.
    ///
    /// An empty `name` is rejected without contacting the server.
    pub async fn list_networks_by_name(&self, name: &str) -> Result<Vec<Network>> {
        self.list(name_filter(name)?).await
    }

    /// Create a network and return it with its server-assigned id.
    pub async fn create_network(&self, network: &Network) -> Result<Network> {
        self.create(network).await
    }

    /// Delete a network.
    pub async fn delete_network(&self, id: &NetworkId) -> Result<()> {
        self.delete::<Network>(id.require()?).await
    }

    /// List all subnets visible to the token.
    pub async fn list_subnets(&self) -> Result<Vec<Subnet>> {
        self.list(QueryParams::new()).await
    }

    /// List subnets whose name matches `name` exactly.
    ///
    /// An empty `name` is rejected without contacting the server.
    pub async fn list_subnets_by_name(&self, name: &str) -> Result<Vec<Subnet>> {
        self.list(name_filter(name)?).await
    }

    /// Create a subnet and return it with its server-assigned id.
    pub async fn create_subnet(&self, subnet: &Subnet) -> Result<Subnet> {
        self.create(subnet).await
    }

    /// List all ports visible to the token.
    pub async fn list_ports(&self) -> Result<Vec<Port>> {
        self.list(QueryParams::new()).await
    }

    /// Create a port and return it with its server-assigned id.
    pub async fn create_port(&self, port: &Port) -> Result<Port> {
        self.create(port).await
    }

    /// Delete a port.
    pub async fn delete_port(&self, id: &PortId) -> Result<()> {
        self.delete::<Port>(id.require()?).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::ConfigError(format!("Neutron base URL `{}` cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .push(API_VERSION)
            .extend(segments);
        Ok(url)
    }

    async fn list<T: Resource>(&self, query: QueryParams) -> Result<Vec<T>> {
        let url = self.endpoint(&[T::COLLECTION])?;
        let path = url.path().to_string();
        let request = ApiRequest::get(url)
            .query(query)
            .expect_status(StatusCode::OK);

        let body = self.executor.execute(request).await?;
        let items: Vec<T> = unwrap_many(&path, &body)?;
        debug!(collection = T::COLLECTION, count = items.len(), "listed resources");
        Ok(items)
    }

    async fn create<T: Resource>(&self, resource: &T) -> Result<T> {
        let url = self.endpoint(&[T::COLLECTION])?;
        let path = url.path().to_string();
        let request = ApiRequest::post(url)
            .json(&Wrapped(resource))?
            .expect_status(StatusCode::CREATED);

        let body = self.executor.execute(request).await?;
        unwrap_one(&path, &body)
    }

    async fn delete<T: Resource>(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&[T::COLLECTION, id])?;
        let request = ApiRequest::delete(url).expect_status(StatusCode::NO_CONTENT);
        self.executor.execute(request).await.map(|_| ())
    }
}

fn name_filter(name: &str) -> Result<QueryParams> {
    let mut params = QueryParams::new();
    params.push_filter("name", name)?;
    Ok(params)
}
