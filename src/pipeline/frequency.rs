//! Word frequency containers

use serde::Serialize;
use std::collections::hash_map::{self, HashMap};

/// Word to occurrence count for a single document.
///
/// Keys are case-sensitive. Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyMap(HashMap<String, u64>);

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, word: &str) {
        self.add(word, 1);
    }

    pub fn add(&mut self, word: &str, count: u64) {
        match self.0.get_mut(word) {
            Some(existing) => *existing += count,
            None => {
                self.0.insert(word.to_string(), count);
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.0.get(word).copied()
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, u64> {
        self.0.iter()
    }

    /// Add every count from `other` into `self`, consuming it.
    pub fn merge(&mut self, other: FrequencyMap) {
        for (word, count) in other.0 {
            *self.0.entry(word).or_insert(0) += count;
        }
    }
}

impl<'a> IntoIterator for &'a FrequencyMap {
    type Item = (&'a String, &'a u64);
    type IntoIter = hash_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for FrequencyMap {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut map = FrequencyMap::new();
        for (word, count) in iter {
            *map.0.entry(word.into()).or_insert(0) += count;
        }
        map
    }
}

/// A `(word, count)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    pub word: String,
    pub count: u64,
}

impl Entry {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Cumulative counts across every document merged so far.
///
/// Owned by the aggregator task for the whole run; nothing else writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordTotals {
    counts: FrequencyMap,
    documents: usize,
}

impl WordTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, map: FrequencyMap) {
        self.counts.merge(map);
        self.documents += 1;
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word)
    }

    pub fn counts(&self) -> &FrequencyMap {
        &self.counts
    }

    /// Number of frequency maps merged
    pub fn documents(&self) -> usize {
        self.documents
    }
}
