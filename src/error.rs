use thiserror::Error;

/// Errors that abort a run.
///
/// Fetch failures are deliberately absent: they are recovered inside the
/// worker pool and only show up as failed documents in the run summary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid document URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Worker task panicked: {0}")]
    WorkerPanicked(String),

    #[error("Channel closed unexpectedly: {0}")]
    ChannelClosed(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
