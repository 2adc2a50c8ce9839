// Diversity-constrained top-k selection.
//
// Candidates arrive grouped by source (feed host). The source order is
// shuffled once, then sources take turns: each turn a source contributes
// its single best remaining candidate by cosine against the user vector,
// and rejoins the back of the rotation only if it has candidates left.
// No source contributes a second item until every other non-exhausted
// source has contributed one.

use std::collections::{HashMap, VecDeque};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::model::Item;
use crate::vectorize::{SparseVector, VectorSpace};

/// Round-robin selector over source groups.
///
/// A fixed seed makes the source rotation reproducible; unseeded runs
/// draw from OS entropy. Selection within a source is deterministic
/// either way.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiverseSelector {
    pub seed: Option<u64>,
}

impl DiverseSelector {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Pick up to `n` items, round-robin across sources, best-first
    /// within each source's turn.
    pub fn select(
        &self,
        space: &VectorSpace,
        source_groups: HashMap<String, Vec<Item>>,
        user_vector: &SparseVector,
        n: usize,
    ) -> Vec<Item> {
        // Embed and score each candidate once; the user vector is fixed
        // for the whole pass.
        let mut remaining: HashMap<String, Vec<(Item, f64)>> = source_groups
            .into_iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(source, items)| {
                let scored = items
                    .into_iter()
                    .map(|item| {
                        let score = space.embed(&item.text()).dot(user_vector);
                        (item, score)
                    })
                    .collect();
                (source, scored)
            })
            .collect();

        // One-time shuffle over a sorted base order, so equal seeds give
        // equal rotations regardless of map iteration order.
        let mut sources: Vec<String> = remaining.keys().cloned().collect();
        sources.sort_unstable();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        sources.shuffle(&mut rng);

        let mut rotation: VecDeque<String> = sources.into();
        let mut picked = Vec::new();

        while picked.len() < n {
            let Some(source) = rotation.pop_front() else {
                break;
            };
            let candidates = remaining.get_mut(&source).expect("source tracked");

            // Best remaining candidate from this source; ties break by
            // ascending item id for determinism.
            let best = candidates
                .iter()
                .enumerate()
                .max_by(|(_, (a_item, a_score)), (_, (b_item, b_score))| {
                    a_score
                        .partial_cmp(b_score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| b_item.id.cmp(&a_item.id))
                })
                .map(|(idx, _)| idx);

            if let Some(idx) = best {
                let (item, score) = candidates.swap_remove(idx);
                debug!(source = source.as_str(), item = item.id.as_str(), score, "Selected");
                picked.push(item);
            }

            if remaining.get(&source).is_some_and(|c| !c.is_empty()) {
                rotation.push_back(source);
            } else {
                remaining.remove(&source);
            }
        }

        picked
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::vectorize::Vectorizer;

    fn item(id: &str, text: &str) -> Item {
        Item {
            id: id.to_string(),
            title: text.to_string(),
            description: String::new(),
            link: format!("https://{}/story", id.split('/').next().unwrap_or(id)),
            published: None,
            thumbnail: None,
            source: None,
            tags: vec![],
        }
    }

    fn space() -> VectorSpace {
        let corpus: BTreeMap<String, String> = [
            ("a", "ai software startup"),
            ("b", "ai research lab"),
            ("c", "football championship game"),
        ]
        .into_iter()
        .map(|(id, text)| (id.to_string(), text.to_string()))
        .collect();
        Vectorizer::default().fit(&corpus).unwrap()
    }

    #[test]
    fn sources_alternate_before_repeating() {
        let space = space();
        let groups: HashMap<String, Vec<Item>> = [
            (
                "s1".to_string(),
                vec![item("a1", "ai software"), item("a2", "ai startup")],
            ),
            ("s2".to_string(), vec![item("b1", "ai research")]),
        ]
        .into();
        let user = space.embed("ai software startup");

        let picked = DiverseSelector::seeded(7).select(&space, groups, &user, 3);
        assert_eq!(picked.len(), 3);
        // s2's only item must land before s1's second: never [s1, s1, s2].
        let order: Vec<char> = picked
            .iter()
            .map(|i| i.id.chars().next().unwrap())
            .collect();
        assert_ne!(order, vec!['a', 'a', 'b'], "selection repeated a source back-to-back");
        assert_eq!(order.iter().filter(|&&c| c == 'b').count(), 1);
    }

    #[test]
    fn picks_best_candidate_within_source() {
        let space = space();
        let groups: HashMap<String, Vec<Item>> = [(
            "s1".to_string(),
            vec![
                item("x-football", "football championship game"),
                item("x-ai", "ai software startup"),
            ],
        )]
        .into();
        let user = space.embed("ai software startup");

        let picked = DiverseSelector::seeded(1).select(&space, groups, &user, 1);
        assert_eq!(picked[0].id, "x-ai");
    }

    #[test]
    fn exhausted_sources_drop_out() {
        let space = space();
        let groups: HashMap<String, Vec<Item>> = [
            ("s1".to_string(), vec![item("a1", "ai software")]),
            ("s2".to_string(), vec![item("b1", "ai research")]),
        ]
        .into();
        let user = space.embed("ai");

        // Asking for more than exists returns everything, once each.
        let picked = DiverseSelector::seeded(3).select(&space, groups, &user, 10);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn empty_groups_yield_empty_result() {
        let space = space();
        let user = space.embed("ai");
        let picked = DiverseSelector::seeded(3).select(&space, HashMap::new(), &user, 5);
        assert!(picked.is_empty());
    }

    #[test]
    fn same_seed_same_order() {
        let space = space();
        let groups = || -> HashMap<String, Vec<Item>> {
            [
                ("s1".to_string(), vec![item("a1", "ai software")]),
                ("s2".to_string(), vec![item("b1", "ai research")]),
                ("s3".to_string(), vec![item("c1", "football game")]),
            ]
            .into()
        };
        let user = space.embed("ai");
        let first = DiverseSelector::seeded(42).select(&space, groups(), &user, 3);
        let second = DiverseSelector::seeded(42).select(&space, groups(), &user, 3);
        let ids = |items: &[Item]| items.iter().map(|i| i.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }
}
