//! Document identifier generation
//!
//! Maps a numeric range onto a URL template, e.g. `rfc{n}.txt`.

use crate::config::Config;
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use url::Url;

/// One unit of fetch-and-count work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WorkItem {
    /// Position in the generated sequence
    pub index: usize,
    pub url: String,
}

impl WorkItem {
    pub fn new(index: usize, url: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
        }
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRange {
    pub url_prefix: String,
    pub url_suffix: String,
    pub first: u32,
    pub last: u32,
}

impl DocumentRange {
    pub fn from_config(config: &Config) -> Self {
        Self {
            url_prefix: config.url_prefix.clone(),
            url_suffix: config.url_suffix.clone(),
            first: config.first,
            last: config.last,
        }
    }

    pub fn len(&self) -> usize {
        if self.first > self.last {
            0
        } else {
            (self.last - self.first) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn url_for(&self, number: u32) -> String {
        let digits = number.to_string();
        let mut url =
            String::with_capacity(self.url_prefix.len() + digits.len() + self.url_suffix.len());
        url.push_str(&self.url_prefix);
        url.push_str(&digits);
        url.push_str(&self.url_suffix);
        url
    }

    /// Expand the range into work items, in ascending order.
    ///
    /// Every URL is checked up front so a bad template fails the run before
    /// any worker starts.
    pub fn work_items(&self) -> Result<Vec<WorkItem>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        (self.first..=self.last)
            .enumerate()
            .map(|(index, number)| {
                let url = self.url_for(number);
                Url::parse(&url).map_err(|source| Error::InvalidUrl {
                    url: url.clone(),
                    source,
                })?;
                Ok(WorkItem::new(index, url))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rfc_range(first: u32, last: u32) -> DocumentRange {
        DocumentRange {
            url_prefix: "https://tools.ietf.org/rfc/rfc".to_string(),
            url_suffix: ".txt".to_string(),
            first,
            last,
        }
    }

    #[test]
    fn test_reference_range() {
        let items = DocumentRange::from_config(&Config::default())
            .work_items()
            .unwrap();

        assert_eq!(items.len(), 10);
        assert_eq!(items[0].url, "https://tools.ietf.org/rfc/rfc1.txt");
        assert_eq!(items[9].url, "https://tools.ietf.org/rfc/rfc10.txt");
        assert!(items.iter().enumerate().all(|(i, item)| item.index == i));
    }

    #[test]
    fn test_single_document_range() {
        let items = rfc_range(2616, 2616).work_items().unwrap();
        assert_eq!(items, vec![WorkItem::new(0, "https://tools.ietf.org/rfc/rfc2616.txt")]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = rfc_range(5, 1);
        assert!(range.is_empty());
        assert!(range.work_items().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_template() {
        let range = DocumentRange {
            url_prefix: "no scheme/".to_string(),
            url_suffix: String::new(),
            first: 1,
            last: 1,
        };

        let err = range.work_items().unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { ref url, .. } if url == "no scheme/1"));
    }
}
