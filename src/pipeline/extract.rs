//! Long-word extraction

use super::frequency::FrequencyMap;

/// Words must be strictly longer than this to be counted.
pub const DEFAULT_MIN_WORD_LEN: usize = 12;

/// True for characters that end a word.
///
/// Anything that is not a letter separates words, and so does a numeric
/// character that Unicode also classifies as alphabetic (e.g. `Ⅻ`).
pub fn is_separator(c: char) -> bool {
    !c.is_alphabetic() || c.is_numeric()
}

/// Count the words in `text` longer than [`DEFAULT_MIN_WORD_LEN`] characters.
pub fn extract(text: &str) -> FrequencyMap {
    extract_words(text, DEFAULT_MIN_WORD_LEN)
}

/// Count the words in `text` with more than `min_len` characters.
///
/// Case is preserved; shorter words do not contribute to any count.
pub fn extract_words(text: &str, min_len: usize) -> FrequencyMap {
    let mut counts = FrequencyMap::new();

    // A word's byte length is never below its char count, so the cheap
    // check rejects most short words before counting chars.
    for word in text
        .split(is_separator)
        .filter(|word| word.len() > min_len && word.chars().count() > min_len)
    {
        counts.increment(word);
    }

    counts
}
