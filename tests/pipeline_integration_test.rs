//! End-to-end pipeline tests
//!
//! Drive the full generator → workers → aggregator run, both with the
//! in-memory fetcher and over HTTP against a local server.

mod common;

use common::DocumentServer;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wordtally::config::Config;
use wordtally::fetch::HttpFetcher;
use wordtally::pipeline::{
    extract, DocumentReport, Entry, FrequencyMap, NullSink, Pipeline, ReportSink,
};
use wordtally::source::DocumentRange;
use wordtally::testing::{work_items, MockFetcher};

const CORPUS: [&str; 4] = [
    "The interoperability requirements for implementations are described in this specification. \
     Implementations MUST follow the specification.",
    "Acknowledgements: the authors thank the contributors. Interoperability testing found \
     interoperability issues in several implementations.",
    "Nothing long here at all.",
    "Internationalization and internationalization-related considerations; \
     Considerations: Interoperability of internationalization.",
];

fn urls(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("mem://doc/{i}")).collect()
}

fn corpus_fetcher() -> MockFetcher {
    urls(CORPUS.len())
        .into_iter()
        .zip(CORPUS)
        .fold(MockFetcher::new(), |fetcher, (url, text)| {
            fetcher.with_document(url, text)
        })
}

#[derive(Clone, Default)]
struct CollectingSink(Arc<Mutex<Vec<DocumentReport>>>);

impl ReportSink for CollectingSink {
    fn report(&mut self, report: &DocumentReport) {
        self.0.lock().unwrap().push(report.clone());
    }
}

#[tokio::test]
async fn test_totals_equal_sum_of_document_counts() {
    let summary = Pipeline::new(Arc::new(corpus_fetcher()))
        .with_workers(3)
        .run(work_items(urls(CORPUS.len())), Box::new(NullSink))
        .await
        .unwrap();

    let mut expected = FrequencyMap::new();
    for text in CORPUS {
        expected.merge(extract(text));
    }

    assert_eq!(summary.succeeded(), CORPUS.len());
    assert_eq!(summary.totals.counts(), &expected);
    assert_eq!(summary.totals.get("specification"), Some(2));
    assert_eq!(summary.totals.get("interoperability"), Some(2));
    assert_eq!(summary.totals.get("Interoperability"), Some(2));
    assert_eq!(summary.totals.get("internationalization"), Some(2));
    assert_eq!(summary.totals.get("Internationalization"), Some(1));
}

#[tokio::test]
async fn test_each_document_reports_its_own_top_word() {
    let sink = CollectingSink::default();
    let summary = Pipeline::new(Arc::new(corpus_fetcher()))
        .with_workers(4)
        .run(work_items(urls(CORPUS.len())), Box::new(sink.clone()))
        .await
        .unwrap();

    let reports = sink.0.lock().unwrap().clone();
    assert_eq!(reports.len(), CORPUS.len());
    assert_eq!(reports, summary.reports);

    let by_url: HashMap<_, _> = reports
        .iter()
        .map(|r| (r.item.url.as_str(), r.top.clone()))
        .collect();
    assert_eq!(by_url["mem://doc/0"], Some(Entry::new("specification", 2)));
    // Every qualifying word in doc 1 appears once; any of them may win.
    assert_eq!(by_url["mem://doc/1"].as_ref().map(|e| e.count), Some(1));
    assert_eq!(by_url["mem://doc/2"], None);
    assert_eq!(
        by_url["mem://doc/3"],
        Some(Entry::new("internationalization", 2))
    );
}

#[tokio::test]
async fn test_one_failed_fetch_is_isolated() {
    let item_urls = urls(CORPUS.len());
    let fetcher = corpus_fetcher().with_failure(item_urls[0].clone());

    let summary = tokio::time::timeout(
        Duration::from_secs(10),
        Pipeline::new(Arc::new(fetcher))
            .with_workers(2)
            .run(work_items(item_urls.clone()), Box::new(NullSink)),
    )
    .await
    .expect("run must not hang")
    .unwrap();

    assert_eq!(summary.documents, CORPUS.len());
    assert_eq!(summary.succeeded(), CORPUS.len() - 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].item.url, item_urls[0]);

    let mut expected = FrequencyMap::new();
    for text in &CORPUS[1..] {
        expected.merge(extract(text));
    }
    assert_eq!(summary.totals.counts(), &expected);
    assert_eq!(summary.totals.get("specification"), None);
}

#[tokio::test]
async fn test_all_fetches_failing_still_completes() {
    let summary = Pipeline::new(Arc::new(MockFetcher::new()))
        .with_workers(3)
        .run(work_items(urls(7)), Box::new(NullSink))
        .await
        .unwrap();

    assert_eq!(summary.failures.len(), 7);
    assert!(summary.reports.is_empty());
    assert!(summary.totals.counts().is_empty());
}

#[tokio::test]
async fn test_http_run_over_document_range() {
    let mut documents = HashMap::new();
    documents.insert("/doc1.txt".to_string(), CORPUS[0].to_string());
    documents.insert("/doc2.txt".to_string(), CORPUS[1].to_string());
    // /doc3.txt is absent and answers 404
    documents.insert("/doc4.txt".to_string(), CORPUS[3].to_string());
    let server = DocumentServer::start(documents).await;

    let config = Config {
        workers: 2,
        first: 1,
        last: 4,
        url_prefix: server.url_prefix(),
        timeout: Duration::from_secs(5),
        ..Config::default()
    };
    config.validate().unwrap();

    let items = DocumentRange::from_config(&config).work_items().unwrap();
    let fetcher = HttpFetcher::new(config.timeout).unwrap();
    let summary = Pipeline::from_config(&config, Arc::new(fetcher))
        .run(items, Box::new(NullSink))
        .await
        .unwrap();

    assert_eq!(summary.documents, 4);
    assert_eq!(summary.succeeded(), 3);
    assert_eq!(summary.failures.len(), 1);
    assert!(summary.failures[0].item.url.ends_with("/doc3.txt"));
    assert!(summary.failures[0].reason.contains("404"));
    assert_eq!(summary.totals.get("internationalization"), Some(2));
    assert_eq!(summary.totals.get("specification"), Some(2));
    assert_eq!(summary.top_words(1)[0].count, 2);
}
