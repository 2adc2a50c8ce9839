// TF-IDF vector space construction.
//
// Each item is one document. Terms that appear in every document get
// downweighted by IDF while terms distinctive to a few items get boosted,
// which is what makes cosine similarity between items meaningful. The
// space is rebuilt wholesale per corpus refresh; item-id to row
// correspondence is fixed for the life of the snapshot.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::info;

use super::tokenize;
use super::vector::SparseVector;
use crate::error::RecommendError;

/// Builds a [`VectorSpace`] from a corpus of item texts.
///
/// Deterministic given identical corpus input: documents are processed in
/// item-id order, vocabulary ties break lexically, and column indices are
/// assigned in lexical term order.
pub struct Vectorizer {
    /// Keep at most this many terms, by descending corpus frequency.
    pub vocab_size: usize,
}

impl Default for Vectorizer {
    fn default() -> Self {
        Self { vocab_size: 5000 }
    }
}

impl Vectorizer {
    pub fn new(vocab_size: usize) -> Self {
        Self { vocab_size }
    }

    /// Build the vector space for a corpus snapshot.
    ///
    /// Pure: returns a new space, mutates nothing. Fails only when the
    /// corpus has no documents at all.
    pub fn fit(&self, corpus: &BTreeMap<String, String>) -> Result<VectorSpace, RecommendError> {
        if corpus.is_empty() {
            return Err(RecommendError::EmptyCorpus);
        }

        let stop = tokenize::english_stop_words();

        // Per-document term counts, in item-id order (BTreeMap iteration).
        let ids: Vec<String> = corpus.keys().cloned().collect();
        let doc_counts: Vec<HashMap<String, usize>> = corpus
            .values()
            .map(|text| {
                let mut counts = HashMap::new();
                for term in tokenize::terms(text, &stop) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        // Corpus-wide frequency and document frequency per term.
        let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for counts in &doc_counts {
            for (term, count) in counts {
                *corpus_freq.entry(term).or_insert(0) += count;
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Cap the vocabulary by descending corpus frequency, ties broken by
        // lexical order, then assign columns in lexical order.
        let mut ranked: Vec<(&str, usize)> = corpus_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.vocab_size);
        let mut selected: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        selected.sort_unstable();

        let vocab: HashMap<String, usize> = selected
            .iter()
            .enumerate()
            .map(|(col, term)| (term.to_string(), col))
            .collect();

        // Smooth IDF: ln((1 + n) / (1 + df)) + 1. Never zero, so a term
        // present in every document still contributes a little.
        let n_docs = ids.len() as f64;
        let idf: Vec<f64> = selected
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        // L2-normalized TF-IDF rows.
        let rows: Vec<SparseVector> = doc_counts
            .iter()
            .map(|counts| {
                let entries: Vec<(usize, f64)> = counts
                    .iter()
                    .filter_map(|(term, &count)| {
                        vocab
                            .get(term.as_str())
                            .map(|&col| (col, count as f64 * idf[col]))
                    })
                    .collect();
                SparseVector::from_entries(entries).normalized()
            })
            .collect();

        // Pairwise cosine. Rows are unit length, so dot products suffice.
        // O(n²), acceptable: a fetch cycle yields bounded corpora.
        let sim: Vec<Vec<f64>> = rows
            .iter()
            .map(|a| rows.iter().map(|b| a.dot(b)).collect())
            .collect();

        let index: HashMap<String, usize> = ids
            .iter()
            .enumerate()
            .map(|(row, id)| (id.clone(), row))
            .collect();

        info!(
            documents = ids.len(),
            vocabulary = vocab.len(),
            "Built vector space"
        );

        Ok(VectorSpace {
            ids,
            index,
            vocab,
            idf,
            rows,
            sim,
            stop,
        })
    }
}

/// A corpus snapshot's vector model: vocabulary, TF-IDF rows, and the
/// precomputed pairwise cosine matrix.
///
/// Valid only for the corpus it was built from. Profile weights keyed by
/// item ids from an older snapshot score 0 against this one rather than
/// erroring — see [`VectorSpace::similarity`].
pub struct VectorSpace {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    vocab: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
    sim: Vec<Vec<f64>>,
    stop: HashSet<String>,
}

impl VectorSpace {
    /// Item ids in row order (ascending, stable for the snapshot's life).
    pub fn item_ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.index.contains_key(item_id)
    }

    pub(crate) fn row_of(&self, item_id: &str) -> Option<usize> {
        self.index.get(item_id).copied()
    }

    pub(crate) fn row_vector(&self, row: usize) -> &SparseVector {
        &self.rows[row]
    }

    pub(crate) fn sim_row(&self, row: usize) -> &[f64] {
        &self.sim[row]
    }

    /// The TF-IDF vector of an in-corpus item.
    pub fn vector(&self, item_id: &str) -> Option<&SparseVector> {
        self.row_of(item_id).map(|row| &self.rows[row])
    }

    /// Project arbitrary text into this space's vocabulary.
    ///
    /// Terms outside the learned vocabulary are dropped; text with no known
    /// terms embeds as the zero vector, which scores 0 against everything.
    pub fn embed(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in tokenize::terms(text, &self.stop) {
            if let Some(&col) = self.vocab.get(&term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }
        let entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, count)| (col, count * self.idf[col]))
            .collect();
        SparseVector::from_entries(entries).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(id, text)| (id.to_string(), text.to_string()))
            .collect()
    }

    #[test]
    fn fit_empty_corpus_errors() {
        let result = Vectorizer::default().fit(&BTreeMap::new());
        assert!(matches!(result, Err(RecommendError::EmptyCorpus)));
    }

    #[test]
    fn rows_are_unit_length() {
        let space = Vectorizer::default()
            .fit(&corpus(&[
                ("a", "ai software startup"),
                ("b", "football championship game"),
            ]))
            .unwrap();
        for id in space.item_ids() {
            let norm = space.vector(id).unwrap().norm();
            assert!((norm - 1.0).abs() < 1e-9, "row {id} has norm {norm}");
        }
    }

    #[test]
    fn vocab_cap_keeps_most_frequent_terms() {
        let space = Vectorizer::new(2)
            .fit(&corpus(&[
                ("a", "rust rust rust compiler"),
                ("b", "rust compiler compiler"),
                ("c", "gardening"),
            ]))
            .unwrap();
        assert!(space.vocab.contains_key("rust"));
        assert!(space.vocab.contains_key("compiler"));
        assert!(!space.vocab.contains_key("gardening"));
    }

    #[test]
    fn embed_unknown_terms_is_zero() {
        let space = Vectorizer::default()
            .fit(&corpus(&[("a", "ai software startup")]))
            .unwrap();
        assert!(space.embed("quantum gardening").is_zero());
    }

    #[test]
    fn embed_of_corpus_text_matches_its_row() {
        let docs = corpus(&[
            ("a", "ai software startup"),
            ("b", "football championship game"),
        ]);
        let space = Vectorizer::default().fit(&docs).unwrap();
        let embedded = space.embed("ai software startup");
        let row = space.vector("a").unwrap();
        assert!((embedded.dot(row) - 1.0).abs() < 1e-9);
    }
}
