//! Fetch-and-render state kernel.
//!
//! Fetch one JSON record over HTTP and drive the render lifecycle around it:
//! - [`HttpFetcher`] issues a single GET, validates the status code, and
//!   decodes the body into a typed [`Record`], mapping every failure to a
//!   classified [`FetchError`].
//! - [`FetchController`] owns the `Idle → Pending → Success | Failure`
//!   lifecycle, suppresses duplicate in-flight requests, exposes a retry
//!   affordance, and notifies subscribed observers on every transition.
//!
//! A renderer subscribes once and redraws on each notified state; it never
//! polls. See `demos/album-view` for a terminal renderer.
//!
//! # Example
//!
//! ```ignore
//! use placard::prelude::*;
//!
//! let fetcher = HttpFetcher::new(FetcherConfig::default());
//! let controller = FetchController::new(fetcher);
//!
//! controller.subscribe(|state| match state {
//!     FetchState::Pending => println!("loading..."),
//!     FetchState::Success(record) => println!("{}", record.title),
//!     FetchState::Failure(error) => println!("error: {error}"),
//!     FetchState::Idle => {}
//! });
//!
//! controller.start().await;
//! ```

mod client;
mod config;
mod controller;
mod error;
mod fetcher;
pub mod prelude;
mod record;
mod response;

pub use client::{HyperTransport, Transport};
pub use config::{DEFAULT_ENDPOINT, FetcherConfig, FetcherConfigBuilder};
pub use controller::{FetchController, FetchState, SubscriptionId};
pub use error::{ErrorKind, FetchError, Result};
pub use fetcher::{HttpFetcher, RecordFetcher};
pub use record::Record;
pub use response::Response;
