// Tokenization for the TF-IDF vectorizer.
//
// Lowercase, split on non-alphanumeric runs, drop single characters and
// English stop words, then emit unigrams plus adjacent-pair bigrams over
// the surviving tokens. Two-character tokens stay in: feed text leans on
// terms like "ai" and "vr" that a longer minimum would throw away.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// Minimum token length. Anything shorter is punctuation debris.
const MIN_TOKEN_LEN: usize = 2;

/// The English stop-word set used by every vectorizer instance.
pub fn english_stop_words() -> HashSet<String> {
    get(LANGUAGE::English).into_iter().collect()
}

/// Split text into lowercase content tokens, stop words removed.
pub fn tokens(text: &str, stop: &HashSet<String>) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(|t| t.to_lowercase())
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !stop.contains(t))
        .collect()
}

/// Vectorizer terms: unigrams plus adjacent-pair bigrams ("term term").
pub fn terms(text: &str, stop: &HashSet<String>) -> Vec<String> {
    let tokens = tokens(text, stop);
    let mut terms = Vec::with_capacity(tokens.len() * 2);
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms.extend(tokens);
    terms
}
