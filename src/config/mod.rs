//! Run configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `WORDTALLY_*` environment variables. The binary applies CLI flags last.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod loader;

pub use loader::ConfigLoader;

/// Prefix of every environment variable that overrides a config value.
pub const ENV_PREFIX: &str = "WORDTALLY_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Number of concurrent fetch-and-count workers
    pub workers: usize,
    /// First document number in the range (inclusive)
    pub first: u32,
    /// Last document number in the range (inclusive)
    pub last: u32,
    pub url_prefix: String,
    pub url_suffix: String,
    /// Per-request fetch timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Words must be strictly longer than this many characters to be counted
    pub min_word_len: usize,
    /// Capacity of the jobs and results channels. Defaults to the number of documents.
    pub channel_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: 10,
            first: 1,
            last: 10,
            url_prefix: "https://tools.ietf.org/rfc/rfc".to_string(),
            url_suffix: ".txt".to_string(),
            timeout: Duration::from_secs(5),
            min_word_len: 12,
            channel_capacity: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn merge_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(workers) = var("WORKERS") {
            self.workers = parse_env("WORKERS", &workers)?;
        }
        if let Some(first) = var("FIRST") {
            self.first = parse_env("FIRST", &first)?;
        }
        if let Some(last) = var("LAST") {
            self.last = parse_env("LAST", &last)?;
        }
        if let Some(prefix) = var("URL_PREFIX") {
            self.url_prefix = prefix;
        }
        if let Some(suffix) = var("URL_SUFFIX") {
            self.url_suffix = suffix;
        }
        if let Some(timeout) = var("TIMEOUT") {
            self.timeout = parse_duration(&timeout)
                .map_err(|e| Error::Config(format!("{ENV_PREFIX}TIMEOUT: {e}")))?;
        }
        if let Some(min_len) = var("MIN_WORD_LEN") {
            self.min_word_len = parse_env("MIN_WORD_LEN", &min_len)?;
        }
        if let Some(capacity) = var("CHANNEL_CAPACITY") {
            self.channel_capacity = Some(parse_env("CHANNEL_CAPACITY", &capacity)?);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::Config("workers must be at least 1".to_string()));
        }
        if self.first > self.last {
            return Err(Error::Config(format!(
                "document range is empty: first ({}) > last ({})",
                self.first, self.last
            )));
        }
        if self.channel_capacity == Some(0) {
            return Err(Error::Config(
                "channel_capacity must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Parse a human-readable duration such as `5s` or `1500ms`.
pub fn parse_duration(value: &str) -> std::result::Result<Duration, String> {
    humantime_serde::re::humantime::parse_duration(value).map_err(|e| e.to_string())
}

fn parse_env<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{ENV_PREFIX}{name}={value}: {e}")))
}
