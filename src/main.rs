use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, trace};
use wordtally::config::{parse_duration, Config, ConfigLoader};
use wordtally::fetch::HttpFetcher;
use wordtally::pipeline::{NullSink, Pipeline, ReportSink, RunSummary, StdoutSink};
use wordtally::source::DocumentRange;

/// Count long words across a range of documents fetched concurrently
#[derive(Parser, Debug)]
#[command(name = "wordtally", version)]
#[command(about = "Report the most frequent long words in a range of documents", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// First document number (inclusive)
    #[arg(long)]
    first: Option<u32>,

    /// Last document number (inclusive)
    #[arg(long)]
    last: Option<u32>,

    /// Per-request timeout, e.g. "5s" or "800ms"
    #[arg(long, value_parser = parse_duration)]
    timeout: Option<Duration>,

    /// Only count words longer than this many characters
    #[arg(long)]
    min_len: Option<usize>,

    /// Also print the N most frequent words across all documents
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Print a JSON summary instead of per-document lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(first) = self.first {
            config.first = first;
        }
        if let Some(last) = self.last {
            config.last = last;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(min_len) = self.min_len {
            config.min_word_len = min_len;
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace,hyper=debug,reqwest=debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .with_thread_ids(cli.verbose >= 3)
        .with_line_number(cli.verbose >= 3)
        .init();

    debug!("wordtally started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli).await {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader
            .load_file(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?;
    }
    loader.load_env().context("Invalid environment override")?;

    let mut config = loader.into_config();
    cli.apply(&mut config);
    config.validate()?;
    debug!("Effective configuration: {:?}", config);

    let items = DocumentRange::from_config(&config).work_items()?;
    let fetcher = HttpFetcher::new(config.timeout)?;

    let sink: Box<dyn ReportSink> = if cli.json {
        Box::new(NullSink)
    } else {
        Box::new(StdoutSink::stdout())
    };

    let summary = Pipeline::from_config(&config, Arc::new(fetcher))
        .run(items, sink)
        .await
        .context("Pipeline run failed")?;

    if cli.json {
        let json = summary.to_json(cli.top.unwrap_or(0));
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print_summary(&summary, cli.top);
    }

    Ok(())
}

fn print_summary(summary: &RunSummary, top: Option<usize>) {
    if let Some(n) = top {
        println!("\nTop {} words across {} documents:", n, summary.succeeded());
        for entry in summary.top_words(n) {
            println!("  {:>6}  {}", entry.count, entry.word);
        }
    }

    for failure in &summary.failures {
        eprintln!("⚠️  {}: {}", failure.item, failure.reason);
    }

    println!(
        "\n{} of {} documents counted, {} distinct words in {:.2}s",
        summary.succeeded(),
        summary.documents,
        summary.totals.counts().len(),
        summary.elapsed.as_secs_f64()
    );
}
