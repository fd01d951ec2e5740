//! Record fetching over a transport.

use std::future::Future;

use tracing::debug;
use url::Url;

use crate::client::{HyperTransport, Transport};
use crate::{FetchError, FetcherConfig, Record, Result};

/// Capability to fetch the record.
///
/// One outbound request per call, no internal retries; retrying is always the
/// caller's responsibility. The operation is a pure read and safe to call
/// repeatedly.
pub trait RecordFetcher: Send + Sync {
    /// Fetch and decode the record.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] or [`FetchError::Timeout`] when no
    /// response is obtained, [`FetchError::Status`] for a non-2xx response,
    /// and [`FetchError::Decode`] when the body is not a well-formed record.
    fn fetch(&self) -> impl Future<Output = Result<Record>> + Send;
}

/// [`RecordFetcher`] backed by an HTTP [`Transport`].
///
/// A non-2xx response fails without the body being parsed; a decode failure
/// discards the entire response. No partial records are ever exposed.
#[derive(Debug, Clone)]
pub struct HttpFetcher<T = HyperTransport> {
    transport: T,
    endpoint: Url,
}

impl HttpFetcher<HyperTransport> {
    /// Create a fetcher with the given configuration.
    #[must_use]
    pub fn new(config: FetcherConfig) -> Self {
        let endpoint = config.endpoint.clone();
        Self {
            transport: HyperTransport::with_config(config),
            endpoint,
        }
    }
}

impl<T: Transport> HttpFetcher<T> {
    /// Create a fetcher over a custom transport.
    #[must_use]
    pub const fn with_transport(transport: T, endpoint: Url) -> Self {
        Self {
            transport,
            endpoint,
        }
    }

    /// The endpoint this fetcher targets.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl<T: Transport> RecordFetcher for HttpFetcher<T> {
    async fn fetch(&self) -> Result<Record> {
        let response = self.transport.get(&self.endpoint).await?;

        if !response.is_success() {
            return Err(FetchError::status(response.status()));
        }

        let record: Record = response.json()?;
        debug!(id = record.id, user_id = record.user_id, "record decoded");
        Ok(record)
    }
}
