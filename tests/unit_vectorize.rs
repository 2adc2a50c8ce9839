// Unit tests for vector space construction and similarity queries.
//
// Covers the determinism contract (identical corpus in, identical
// similarity matrix out), self-similarity, stale-id behavior, and
// neighbor ordering.

use std::collections::BTreeMap;

use hearth::vectorize::{VectorSpace, Vectorizer};

fn corpus(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(id, text)| (id.to_string(), text.to_string()))
        .collect()
}

fn news_corpus() -> BTreeMap<String, String> {
    corpus(&[
        ("https://a.example/ai", "ai software startup raises funding"),
        ("https://b.example/sport", "football championship game ends in upset"),
        ("https://c.example/lab", "ai research lab publishes new results"),
        ("https://d.example/cook", "sourdough baking techniques for beginners"),
    ])
}

fn fit(corpus: &BTreeMap<String, String>) -> VectorSpace {
    Vectorizer::default().fit(corpus).unwrap()
}

// ============================================================
// Determinism — rebuilds of the same corpus agree exactly
// ============================================================

#[test]
fn identical_corpus_yields_identical_similarity_matrix() {
    let docs = news_corpus();
    let first = fit(&docs);
    let second = fit(&docs);

    let ids: Vec<&String> = docs.keys().collect();
    for a in &ids {
        for b in &ids {
            assert_eq!(
                first.similarity(a, b),
                second.similarity(a, b),
                "similarity({a}, {b}) differs between identical builds"
            );
        }
    }
}

#[test]
fn item_ids_are_in_stable_ascending_order() {
    let space = fit(&news_corpus());
    let ids = space.item_ids();
    for window in ids.windows(2) {
        assert!(window[0] < window[1]);
    }
}

// ============================================================
// Self-similarity and symmetry
// ============================================================

#[test]
fn every_item_is_fully_similar_to_itself() {
    let space = fit(&news_corpus());
    for id in space.item_ids() {
        let s = space.similarity(id, id);
        assert!((s - 1.0).abs() < 1e-9, "similarity({id}, {id}) = {s}");
    }
}

#[test]
fn similarity_is_symmetric_across_all_pairs() {
    let space = fit(&news_corpus());
    for a in space.item_ids() {
        for b in space.item_ids() {
            let forward = space.similarity(a, b);
            let backward = space.similarity(b, a);
            assert!((forward - backward).abs() < 1e-12);
        }
    }
}

#[test]
fn similarity_stays_within_bounds() {
    let space = fit(&news_corpus());
    for a in space.item_ids() {
        for b in space.item_ids() {
            let s = space.similarity(a, b);
            assert!((-1.0..=1.0 + 1e-9).contains(&s), "similarity({a},{b}) = {s}");
        }
    }
}

// ============================================================
// Stale references
// ============================================================

#[test]
fn absent_ids_score_zero_not_error() {
    let space = fit(&news_corpus());
    assert_eq!(space.similarity("https://gone.example/old", "https://a.example/ai"), 0.0);
    assert_eq!(space.similarity("nope", "also-nope"), 0.0);
}

// ============================================================
// Neighbors and similar_items ordering
// ============================================================

#[test]
fn neighbors_are_descending_with_id_tiebreak() {
    let space = fit(&news_corpus());
    let query = space.embed("ai software research");
    let neighbors = space.neighbors(&query, 10);
    for window in neighbors.windows(2) {
        assert!(
            window[0].1 > window[1].1
                || ((window[0].1 - window[1].1).abs() < 1e-12 && window[0].0 < window[1].0)
        );
    }
}

#[test]
fn similar_items_finds_shared_vocabulary() {
    let space = fit(&news_corpus());
    let similar = space.similar_items("https://a.example/ai", 1);
    assert_eq!(similar[0].0, "https://c.example/lab");
    assert!(similar[0].1 > 0.0);
}

#[test]
fn single_document_corpus_is_valid() {
    let space = fit(&corpus(&[("only", "a single lonely document")]));
    assert_eq!(space.len(), 1);
    assert!((space.similarity("only", "only") - 1.0).abs() < 1e-9);
    assert!(space.similar_items("only", 5).is_empty());
}

#[test]
fn embed_is_normalized_or_zero() {
    let space = fit(&news_corpus());
    let known = space.embed("ai software");
    assert!((known.norm() - 1.0).abs() < 1e-9);
    let unknown = space.embed("zzz qqq");
    assert!(unknown.is_zero());
}
