//! Per-document reports and the run summary

use super::frequency::{Entry, WordTotals};
use super::topk::top_k;
use crate::source::WorkItem;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;
use tracing::debug;

/// Most frequent qualifying word of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub item: WorkItem,
    /// `None` when the document had no qualifying words
    pub top: Option<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDocument {
    pub item: WorkItem,
    pub reason: String,
}

/// Receives each document report as soon as the aggregator produces it.
pub trait ReportSink: Send {
    fn report(&mut self, report: &DocumentReport);
}

/// Writes one tab-separated line per document.
///
/// After the first write error (e.g. a closed pipe) the sink goes quiet; the
/// run itself carries on and the summary still holds every report.
#[derive(Debug)]
pub struct LineSink<W> {
    out: W,
    failed: bool,
}

/// Line sink on the process's stdout.
pub type StdoutSink = LineSink<std::io::Stdout>;

impl StdoutSink {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> LineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    /// Whether a write has failed and output has stopped.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ReportSink for LineSink<W> {
    fn report(&mut self, report: &DocumentReport) {
        if self.failed {
            return;
        }
        let written = match &report.top {
            Some(entry) => writeln!(self.out, "{}\t{}\t{}", report.item, entry.word, entry.count),
            None => writeln!(self.out, "{}\t-\t0", report.item),
        }
        .and_then(|()| self.out.flush());

        if let Err(e) = written {
            debug!("Report output closed, suppressing further lines: {}", e);
            self.failed = true;
        }
    }
}

/// Discards reports; the summary still carries them.
#[derive(Debug, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn report(&mut self, _report: &DocumentReport) {}
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Documents handed to the pipeline
    pub documents: usize,
    pub totals: WordTotals,
    /// Reports in the order the aggregator received them
    pub reports: Vec<DocumentReport>,
    pub failures: Vec<FailedDocument>,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.reports.len()
    }

    /// The `n` most frequent words across all documents.
    pub fn top_words(&self, n: usize) -> Vec<Entry> {
        top_k(self.totals.counts(), n)
    }

    pub fn report_for(&self, url: &str) -> Option<&DocumentReport> {
        self.reports.iter().find(|r| r.item.url == url)
    }

    /// Compact JSON view: counts, failures and the global top `n`.
    pub fn to_json(&self, top_n: usize) -> serde_json::Value {
        serde_json::json!({
            "documents": self.documents,
            "succeeded": self.succeeded(),
            "failed": self.failures,
            "distinct_words": self.totals.counts().len(),
            "total_occurrences": self.totals.counts().total(),
            "reports": self.reports,
            "top_words": self.top_words(top_n),
            "elapsed_ms": u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX),
        })
    }
}
