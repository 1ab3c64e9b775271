//! Top-K selection over frequency counts

use super::frequency::{Entry, FrequencyMap};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// The `k` highest-count entries of `map`, in descending count order.
///
/// Returns `min(k, map.len())` entries. A min-heap of at most `k` entries is
/// kept while scanning, so this runs in O(n log k). Order among equal counts
/// is not part of the contract.
pub fn top_k(map: &FrequencyMap, k: usize) -> Vec<Entry> {
    if k == 0 || map.is_empty() {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<(u64, &str)>> = BinaryHeap::with_capacity(k.min(map.len()));

    for (word, &count) in map {
        if heap.len() < k {
            heap.push(Reverse((count, word.as_str())));
        } else if heap
            .peek()
            .is_some_and(|Reverse((smallest, _))| count > *smallest)
        {
            heap.pop();
            heap.push(Reverse((count, word.as_str())));
        }
    }

    // Ascending in `Reverse` is descending by count.
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse((count, word))| Entry::new(word, count))
        .collect()
}

/// The single most frequent entry, if any.
pub fn most_frequent(map: &FrequencyMap) -> Option<Entry> {
    top_k(map, 1).into_iter().next()
}
