//! Document fetching abstraction
//!
//! The pipeline only depends on the [`Fetcher`] trait. [`HttpFetcher`] is the
//! network implementation; tests use [`crate::testing::MockFetcher`].

use async_trait::async_trait;
use thiserror::Error;

pub mod http;

pub use http::HttpFetcher;

use crate::source::WorkItem;

/// Why a document could not be fetched.
///
/// Every variant is recoverable: the worker logs it and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("no document at {url}")]
    Missing { url: String },
}

/// Retrieves the raw text of one document.
///
/// Implementations must bound their own latency and must not retry.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, item: &WorkItem) -> Result<String, FetchError>;
}
