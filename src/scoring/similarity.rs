// Profile-driven similarity scoring.
//
// Every candidate accrues influence from every profile-weighted item in
// proportion to their cosine similarity, plus a fixed-weight contribution
// from each group profile. Items the user already interacted with are
// excluded outright — nobody gets re-recommended what they have read.

use std::collections::HashMap;

use crate::model::{GroupProfile, Item, ScoredItem};
use crate::scoring::{sort_ranking, Scorer, ScoringContext};
use crate::vectorize::VectorSpace;

/// The similarity-based ranking strategy.
pub struct SimilarityScorer {
    /// Contribution factor of each group profile entry.
    pub group_weight: f64,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self { group_weight: 0.3 }
    }
}

impl SimilarityScorer {
    /// Rank the whole corpus snapshot for one profile.
    ///
    /// Stale profile entries (item ids from an earlier snapshot) simply
    /// contribute similarity 0. Only strictly positive scores survive.
    pub fn score_space(
        &self,
        space: &VectorSpace,
        profile: &HashMap<String, f64>,
        groups: &[GroupProfile],
    ) -> Vec<ScoredItem> {
        self.score_ids(space, profile, groups, space.item_ids().iter().map(String::as_str))
    }

    fn score_ids<'a>(
        &self,
        space: &VectorSpace,
        profile: &HashMap<String, f64>,
        groups: &[GroupProfile],
        candidates: impl Iterator<Item = &'a str>,
    ) -> Vec<ScoredItem> {
        let mut ranking: Vec<ScoredItem> = candidates
            .filter(|id| !profile.contains_key(*id))
            .map(|id| {
                let content: f64 = profile
                    .iter()
                    .map(|(seen, weight)| weight * space.similarity(seen, id))
                    .sum();
                let group: f64 = groups
                    .iter()
                    .map(|g| self.group_weight * g.weights.get(id).copied().unwrap_or(0.0))
                    .sum();
                ScoredItem {
                    item_id: id.to_string(),
                    score: content + group,
                }
            })
            .filter(|scored| scored.score > 0.0)
            .collect();
        sort_ranking(&mut ranking);
        ranking
    }
}

impl Scorer for SimilarityScorer {
    fn score(&self, ctx: &ScoringContext<'_>, candidates: &[Item]) -> Vec<ScoredItem> {
        let Some(space) = ctx.space else {
            return Vec::new();
        };
        self.score_ids(
            space,
            ctx.profile,
            ctx.groups,
            candidates.iter().map(|item| item.id.as_str()),
        )
    }
}
