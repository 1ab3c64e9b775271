//! # wordtally
//!
//! Fetches a numbered range of documents concurrently, counts the long words
//! in each, and reports per-document and overall word frequencies.
//!
//! ## Modules
//!
//! - `config` - Layered run configuration (defaults, TOML file, environment)
//! - `error` - Crate error type
//! - `fetch` - Fetcher abstraction and the HTTP implementation
//! - `pipeline` - Worker pool, aggregator, word extraction and top-K selection
//! - `source` - Document identifier generation from a URL template
//! - `testing` - In-memory fetcher and helpers for tests
pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod source;

pub mod testing;

pub use error::{Error, Result};
