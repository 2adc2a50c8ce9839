// Scoring strategies — rank candidate items for a user.
//
// Two interchangeable strategies answer the same question from different
// signals: SimilarityScorer works off the TF-IDF vector space and the
// user's interaction profile, TopicScorer works off declared interest
// categories and publish freshness. The caller picks one by configuration;
// swapping strategies never touches the rest of the pipeline.

pub mod similarity;
pub mod topic;

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::model::{GroupProfile, Item, ScoredItem};
use crate::vectorize::VectorSpace;

pub use similarity::SimilarityScorer;
pub use topic::TopicScorer;

/// Everything a scoring pass may read. Each strategy uses the slice of
/// this it cares about and ignores the rest.
pub struct ScoringContext<'a> {
    /// Current corpus snapshot; absent when no space has been built yet.
    pub space: Option<&'a VectorSpace>,
    /// The user's item-id → weight profile.
    pub profile: &'a HashMap<String, f64>,
    /// Profiles of the groups the user belongs to.
    pub groups: &'a [GroupProfile],
    /// The user's declared interest categories.
    pub interests: &'a [String],
    /// Evaluation instant for decay/freshness.
    pub now: DateTime<Utc>,
}

/// Strategy for ranking candidates. Returns the full ranking, descending
/// by score with ties broken by ascending item-id; callers truncate.
pub trait Scorer {
    fn score(&self, ctx: &ScoringContext<'_>, candidates: &[Item]) -> Vec<ScoredItem>;
}

/// Descending score, ascending item-id on ties.
pub(crate) fn sort_ranking(ranking: &mut [ScoredItem]) {
    ranking.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
}
