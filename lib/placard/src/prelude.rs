//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy glob
//! importing:
//!
//! ```ignore
//! use placard::prelude::*;
//! ```

pub use crate::{
    ErrorKind, FetchController, FetchError, FetchState, FetcherConfig, HttpFetcher,
    HyperTransport, Record, RecordFetcher, Result, Transport,
};
