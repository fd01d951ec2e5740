//! Fetcher configuration.

use std::time::Duration;

use url::Url;

use crate::Result;

/// Default endpoint serving the record.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/albums/1";

fn default_endpoint() -> Url {
    #[allow(clippy::expect_used)]
    Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
}

/// Configuration for the record fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Endpoint serving the record.
    pub endpoint: Url,
    /// Whole-request timeout. Expiry is reported as a network-class failure.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl FetcherConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> FetcherConfigBuilder {
        FetcherConfigBuilder::default()
    }
}

/// Builder for [`FetcherConfig`].
#[derive(Debug, Clone, Default)]
pub struct FetcherConfigBuilder {
    endpoint: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl FetcherConfigBuilder {
    /// Set the endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Set the endpoint from a string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FetchError::InvalidUrl`] if the string is not a valid
    /// absolute URL.
    pub fn endpoint_str(self, endpoint: impl AsRef<str>) -> Result<Self> {
        let endpoint = Url::parse(endpoint.as_ref())?;
        Ok(self.endpoint(endpoint))
    }

    /// Set the whole-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> FetcherConfig {
        let defaults = FetcherConfig::default();
        FetcherConfig {
            endpoint: self.endpoint.unwrap_or(defaults.endpoint),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}
