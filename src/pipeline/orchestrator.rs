//! Wires generator, worker pool and aggregator into one run

use super::aggregator::Aggregator;
use super::extract::DEFAULT_MIN_WORD_LEN;
use super::report::{ReportSink, RunSummary};
use super::worker::WorkerPool;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::source::WorkItem;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub const DEFAULT_WORKERS: usize = 10;

pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    workers: usize,
    min_word_len: usize,
    channel_capacity: Option<usize>,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            workers: DEFAULT_WORKERS,
            min_word_len: DEFAULT_MIN_WORD_LEN,
            channel_capacity: None,
        }
    }

    pub fn from_config(config: &Config, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            workers: config.workers,
            min_word_len: config.min_word_len,
            channel_capacity: config.channel_capacity,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_min_word_len(mut self, min_word_len: usize) -> Self {
        self.min_word_len = min_word_len;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = Some(capacity);
        self
    }

    /// Fetch and count every item, returning once all results are merged.
    ///
    /// Shutdown order: the pool finishes, then the results channel closes,
    /// then the aggregator drains it. Reports reach `sink` as they arrive.
    pub async fn run(&self, items: Vec<WorkItem>, sink: Box<dyn ReportSink>) -> Result<RunSummary> {
        if self.workers == 0 {
            return Err(Error::Config("workers must be at least 1".to_string()));
        }

        let started = Instant::now();
        let documents = items.len();
        let capacity = self.channel_capacity.unwrap_or(documents).max(1);

        let (jobs_tx, jobs_rx) = mpsc::channel::<WorkItem>(capacity);
        let (results_tx, results_rx) = mpsc::channel(capacity);

        // Aggregator first so it is receiving before any worker produces.
        let aggregator = Aggregator::spawn(results_rx, sink);

        info!(
            "Processing {} documents with {} workers",
            documents, self.workers
        );
        let pool = WorkerPool::spawn(
            self.workers,
            self.min_word_len,
            self.fetcher.clone(),
            jobs_rx,
            results_tx.clone(),
        );

        let generator = tokio::spawn(async move {
            for item in items {
                jobs_tx
                    .send(item)
                    .await
                    .map_err(|_| Error::ChannelClosed("jobs"))?;
            }
            // Dropping the sender closes the job queue.
            Ok::<_, Error>(())
        });

        let processed = pool.wait().await?;
        debug!("All workers exited, per-worker counts: {:?}", processed);

        drop(results_tx);
        let aggregate = aggregator.wait().await?;

        generator
            .await
            .map_err(|e| Error::WorkerPanicked(format!("generator: {e}")))??;

        let summary = RunSummary {
            documents,
            totals: aggregate.totals,
            reports: aggregate.reports,
            failures: aggregate.failures,
            elapsed: started.elapsed(),
        };

        info!(
            succeeded = summary.succeeded(),
            failed = summary.failures.len(),
            distinct_words = summary.totals.counts().len(),
            "Run complete in {:.2}s",
            summary.elapsed.as_secs_f64()
        );

        Ok(summary)
    }
}
