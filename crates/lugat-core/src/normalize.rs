use unicode_normalization::UnicodeNormalization;

/// Deduplication identity of a word: NFKC-normalized, trimmed, lowercased.
/// Two entries with the same key in the same (language, batch) are one card.
pub fn dedup_key(word: &str) -> String {
    word.trim().nfkc().collect::<String>().to_lowercase()
}
