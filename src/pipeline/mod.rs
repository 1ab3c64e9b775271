//! Concurrent fetch-count-aggregate pipeline
//!
//! ```text
//! generator ──jobs──▶ WorkerPool (N tasks) ──results──▶ Aggregator
//!                       fetch + extract                 WordTotals, top-1 reports
//! ```
//!
//! Both channels are bounded `tokio::sync::mpsc` queues, so a slow aggregator
//! applies backpressure to the workers and a slow pool to the generator.

pub mod aggregator;
pub mod extract;
pub mod frequency;
pub mod orchestrator;
pub mod report;
pub mod topk;
pub mod worker;

pub use aggregator::{Aggregate, Aggregator, AggregatorHandle};
pub use extract::{extract, extract_words, DEFAULT_MIN_WORD_LEN};
pub use frequency::{Entry, FrequencyMap, WordTotals};
pub use orchestrator::Pipeline;
pub use report::{
    DocumentReport, FailedDocument, LineSink, NullSink, ReportSink, RunSummary, StdoutSink,
};
pub use topk::{most_frequent, top_k};
pub use worker::{DocumentResult, Outcome, WorkerPool};
