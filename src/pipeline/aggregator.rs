//! Single-task consumer of worker results
//!
//! The aggregator is the only owner of the running [`WordTotals`]. Workers
//! reach it exclusively through the results channel, so the totals need no
//! lock.

use super::frequency::WordTotals;
use super::report::{DocumentReport, FailedDocument, ReportSink};
use super::topk::most_frequent;
use super::worker::{DocumentResult, Outcome};
use crate::error::{Error, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Final state handed back once the results channel is drained.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    pub totals: WordTotals,
    pub reports: Vec<DocumentReport>,
    pub failures: Vec<FailedDocument>,
}

#[derive(Debug, Default)]
pub struct Aggregator {
    state: Aggregate,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one worker result into the totals.
    ///
    /// Returns the document's top-1 report, or `None` for a failed fetch.
    pub fn absorb(&mut self, result: DocumentResult) -> Option<&DocumentReport> {
        match result.outcome {
            Outcome::Counted(words) => {
                let top = most_frequent(&words);
                self.state.totals.merge(words);
                self.state.reports.push(DocumentReport {
                    item: result.item,
                    top,
                });
                self.state.reports.last()
            }
            Outcome::Failed { reason } => {
                debug!("No data for {}: {}", result.item, reason);
                self.state.failures.push(FailedDocument {
                    item: result.item,
                    reason,
                });
                None
            }
        }
    }

    pub fn totals(&self) -> &WordTotals {
        &self.state.totals
    }

    pub fn finish(self) -> Aggregate {
        self.state
    }

    /// Consume `results` on a dedicated task until the channel is closed and empty.
    pub fn spawn(
        mut results: mpsc::Receiver<DocumentResult>,
        mut sink: Box<dyn ReportSink>,
    ) -> AggregatorHandle {
        let handle = tokio::spawn(async move {
            let mut aggregator = Aggregator::new();

            while let Some(result) = results.recv().await {
                if let Some(report) = aggregator.absorb(result) {
                    match &report.top {
                        Some(entry) => info!(
                            url = %report.item.url,
                            word = %entry.word,
                            count = entry.count,
                            "Most frequent word"
                        ),
                        None => info!(url = %report.item.url, "No qualifying words"),
                    }
                    sink.report(report);
                }
            }

            debug!(
                documents = aggregator.totals().documents(),
                distinct = aggregator.totals().counts().len(),
                "Results drained"
            );
            aggregator.finish()
        });

        AggregatorHandle { handle }
    }
}

pub struct AggregatorHandle {
    handle: JoinHandle<Aggregate>,
}

impl AggregatorHandle {
    /// Resolves once the results channel has been closed and fully drained.
    pub async fn wait(self) -> Result<Aggregate> {
        self.handle
            .await
            .map_err(|e| Error::WorkerPanicked(format!("aggregator: {e}")))
    }
}
