//! Fixed-size pool of fetch-and-count workers

use super::extract::extract_words;
use super::frequency::FrequencyMap;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::source::WorkItem;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// What a worker learned about one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Counted(FrequencyMap),
    /// The fetch failed; the document contributes nothing.
    Failed { reason: String },
}

/// Sent from a worker to the aggregator, one per work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResult {
    pub item: WorkItem,
    pub outcome: Outcome,
}

/// Handle to a running set of workers.
pub struct WorkerPool {
    handles: Vec<JoinHandle<Result<usize>>>,
}

impl WorkerPool {
    /// Start `workers` tasks that drain `jobs` into `results`.
    ///
    /// Each worker owns a clone of `results`; the channel stays open until
    /// every worker has exited and the caller has dropped its own sender.
    pub fn spawn(
        workers: usize,
        min_word_len: usize,
        fetcher: Arc<dyn Fetcher>,
        jobs: mpsc::Receiver<WorkItem>,
        results: mpsc::Sender<DocumentResult>,
    ) -> Self {
        let jobs = Arc::new(Mutex::new(jobs));

        let handles = (0..workers)
            .map(|worker_id| {
                let jobs = jobs.clone();
                let results = results.clone();
                let fetcher = fetcher.clone();
                tokio::spawn(async move {
                    run_worker(worker_id, jobs, results, fetcher, min_word_len).await
                })
            })
            .collect();

        Self { handles }
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Wait until every worker has exited.
    ///
    /// Returns the number of items each worker handled, indexed by worker id.
    pub async fn wait(self) -> Result<Vec<usize>> {
        let mut processed = Vec::with_capacity(self.handles.len());
        let mut first_error = None;

        for (worker_id, handle) in self.handles.into_iter().enumerate() {
            match handle.await {
                Ok(Ok(count)) => processed.push(count),
                Ok(Err(e)) => {
                    warn!("Worker {} stopped early: {}", worker_id, e);
                    processed.push(0);
                    first_error.get_or_insert(e);
                }
                Err(join_err) => {
                    processed.push(0);
                    first_error.get_or_insert(Error::WorkerPanicked(format!(
                        "worker {worker_id}: {join_err}"
                    )));
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(processed),
        }
    }
}

async fn run_worker(
    worker_id: usize,
    jobs: Arc<Mutex<mpsc::Receiver<WorkItem>>>,
    results: mpsc::Sender<DocumentResult>,
    fetcher: Arc<dyn Fetcher>,
    min_word_len: usize,
) -> Result<usize> {
    let mut processed = 0;

    loop {
        // Only one idle worker waits on the queue at a time; the lock is
        // released before the fetch starts.
        let next = jobs.lock().await.recv().await;
        let Some(item) = next else {
            break;
        };

        let outcome = match fetcher.fetch(&item).await {
            Ok(text) => {
                let words = extract_words(&text, min_word_len);
                debug!(
                    worker = worker_id,
                    url = %item.url,
                    distinct = words.len(),
                    "Counted document"
                );
                Outcome::Counted(words)
            }
            Err(e) => {
                warn!(worker = worker_id, url = %item.url, "Fetch failed: {}", e);
                Outcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        results
            .send(DocumentResult { item, outcome })
            .await
            .map_err(|_| Error::ChannelClosed("results"))?;
        processed += 1;
    }

    debug!(worker = worker_id, processed, "Worker exiting");
    Ok(processed)
}
