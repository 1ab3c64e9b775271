use super::{FetchError, Fetcher};
use crate::error::{Error, Result};
use crate::source::WorkItem;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Plain HTTP GET with a per-request timeout and no retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(url: &str, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[tracing::instrument(name = "fetch", skip_all, fields(url = %item.url))]
    async fn fetch(&self, item: &WorkItem) -> std::result::Result<String, FetchError> {
        let url = item.url.as_str();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        // The body read is covered by the same client timeout.
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        tracing::debug!(bytes = body.len(), "Fetched document");
        Ok(body)
    }
}
