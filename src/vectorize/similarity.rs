// Similarity queries over a built vector space.
//
// The pairwise matrix is computed once at fit time, so lookups are O(1)
// and neighbor scans are a single pass over the rows. Item ids absent
// from the space answer 0 instead of erroring: profiles routinely carry
// references to items from an earlier corpus snapshot, and a stale entry
// must not abort a scoring pass.

use std::cmp::Ordering;

use super::tfidf::VectorSpace;
use super::vector::SparseVector;

impl VectorSpace {
    /// Cosine similarity of two in-corpus items, in [-1, 1].
    ///
    /// Returns 0.0 when either id is absent from this snapshot.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        match (self.row_of(a), self.row_of(b)) {
            (Some(i), Some(j)) => self.sim_row(i)[j],
            _ => 0.0,
        }
    }

    /// The `k` items most similar to an arbitrary vector, descending by
    /// score, ties broken by ascending item-id.
    pub fn neighbors(&self, vector: &SparseVector, k: usize) -> Vec<(String, f64)> {
        let mut scored: Vec<(String, f64)> = self
            .item_ids()
            .iter()
            .enumerate()
            .map(|(row, id)| (id.clone(), self.row_vector(row).dot(vector)))
            .collect();
        sort_scored(&mut scored);
        scored.truncate(k);
        scored
    }

    /// The `k` items most similar to an in-corpus item, excluding itself.
    ///
    /// Empty for an unknown id.
    pub fn similar_items(&self, item_id: &str, k: usize) -> Vec<(String, f64)> {
        let Some(row) = self.row_of(item_id) else {
            return Vec::new();
        };
        let mut scored: Vec<(String, f64)> = self
            .item_ids()
            .iter()
            .zip(self.sim_row(row))
            .filter(|(id, _)| id.as_str() != item_id)
            .map(|(id, &score)| (id.clone(), score))
            .collect();
        sort_scored(&mut scored);
        scored.truncate(k);
        scored
    }
}

/// Descending score, ascending item-id on ties.
pub(crate) fn sort_scored(scored: &mut [(String, f64)]) {
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
}
