//! Testing utilities
//!
//! An in-memory [`Fetcher`] so the pipeline can be exercised without a
//! network.

use crate::fetch::{FetchError, Fetcher};
use crate::source::WorkItem;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Serves documents from a map keyed by URL.
///
/// URLs with no registered document, or registered as failing, return
/// [`FetchError::Missing`].
#[derive(Clone, Default)]
pub struct MockFetcher {
    documents: HashMap<String, String>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    /// URLs in the order fetch was called
    pub fetched: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_document(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(url.into(), text.into());
        self
    }

    #[must_use]
    pub fn with_failure(mut self, url: impl Into<String>) -> Self {
        self.failing.insert(url.into());
        self
    }

    /// Hold the response for `url` back by `delay`.
    #[must_use]
    pub fn with_delay(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(url.into(), delay);
        self
    }

    pub async fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().await.clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, item: &WorkItem) -> Result<String, FetchError> {
        self.fetched.lock().await.push(item.url.clone());

        if let Some(delay) = self.delays.get(&item.url) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing.contains(&item.url) {
            return Err(FetchError::Missing {
                url: item.url.clone(),
            });
        }

        self.documents
            .get(&item.url)
            .cloned()
            .ok_or_else(|| FetchError::Missing {
                url: item.url.clone(),
            })
    }
}

/// Work items for `urls`, indexed in order.
pub fn work_items<I, S>(urls: I) -> Vec<WorkItem>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    urls.into_iter()
        .enumerate()
        .map(|(index, url)| WorkItem::new(index, url))
        .collect()
}

/// A word of exactly `len` repetitions of `letter`.
pub fn long_word(letter: char, len: usize) -> String {
    letter.to_string().repeat(len)
}
