// Engine facade — the surface the service layer calls.
//
// Owns the current vector-space snapshot, the profile store, and group
// membership. A corpus refresh builds a whole new space and swaps the
// shared Arc; ranking passes clone the Arc up front, so an in-flight pass
// keeps scoring against the snapshot it started with while the swap lands
// for the next one.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::RecommendError;
use crate::feed::validity::is_eligible;
use crate::model::{GroupProfile, Interaction, Item, ScoredItem};
use crate::profile::{aggregate, ProfileStore, UpdateOutcome};
use crate::scoring::{Scorer, ScoringContext, SimilarityScorer, TopicScorer};
use crate::select::DiverseSelector;
use crate::vectorize::{SparseVector, VectorSpace, Vectorizer};

/// Engine tuning knobs, typically sourced from [`crate::config::Config`].
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    /// Per-day exponential decay rate for interaction age.
    pub decay_rate: f64,
    /// Influence of each group profile on similarity scores.
    pub group_weight: f64,
    /// Vocabulary cap for the vectorizer.
    pub vocab_size: usize,
    /// Selector shuffle seed; `None` draws OS entropy.
    pub selector_seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            decay_rate: 0.1,
            group_weight: 0.3,
            vocab_size: 5000,
            selector_seed: None,
        }
    }
}

pub struct RecommendationEngine {
    settings: EngineSettings,
    space: RwLock<Option<Arc<VectorSpace>>>,
    profiles: ProfileStore,
    /// Group id → member user ids, as last registered by the identity
    /// layer. Profiles are re-aggregated from this on every scoring call.
    groups: RwLock<HashMap<String, Vec<String>>>,
}

impl RecommendationEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            space: RwLock::new(None),
            profiles: ProfileStore::new(),
            groups: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineSettings::default())
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    /// Build a vector space from a corpus snapshot and swap it in.
    ///
    /// The returned Arc is the same one installed; callers that want a
    /// stable view across several queries hold onto it.
    pub fn build_vector_space(
        &self,
        corpus: &BTreeMap<String, String>,
    ) -> Result<Arc<VectorSpace>, RecommendError> {
        let space = Arc::new(Vectorizer::new(self.settings.vocab_size).fit(corpus)?);
        *self.space.write().expect("space lock poisoned") = Some(Arc::clone(&space));
        info!(items = space.len(), "Vector space swapped in");
        Ok(space)
    }

    /// The current snapshot, if one has been built.
    pub fn snapshot(&self) -> Option<Arc<VectorSpace>> {
        self.space.read().expect("space lock poisoned").clone()
    }

    /// Fold interactions into a user's profile (decay rate from settings).
    pub fn update_profile(
        &self,
        user_id: &str,
        interactions: &[Interaction],
        now: DateTime<Utc>,
    ) -> UpdateOutcome {
        self.profiles
            .update(user_id, interactions, self.settings.decay_rate, now)
    }

    /// Register a group's membership and return its aggregated profile.
    pub fn aggregate_group(&self, group_id: &str, member_ids: &[String]) -> GroupProfile {
        self.groups
            .write()
            .expect("group lock poisoned")
            .insert(group_id.to_string(), member_ids.to_vec());
        aggregate(&self.profiles, group_id, member_ids)
    }

    /// Rank the current corpus for a user via the similarity strategy.
    ///
    /// Empty when no space has been built or nothing scores positive —
    /// both are valid outcomes, not errors.
    pub fn recommend_by_similarity(
        &self,
        user_id: &str,
        group_ids: &[String],
        n: usize,
    ) -> Vec<ScoredItem> {
        let Some(space) = self.snapshot() else {
            return Vec::new();
        };
        let profile = self.profiles.get(user_id);
        let group_profiles = self.group_profiles(group_ids);

        let scorer = SimilarityScorer {
            group_weight: self.settings.group_weight,
        };
        let mut ranking = scorer.score_space(&space, &profile, &group_profiles);
        ranking.truncate(n);
        ranking
    }

    /// Rank candidate items via the topic strategy: validity filter,
    /// keyword + freshness score, truncate.
    pub fn recommend_by_topic(
        &self,
        candidates: &[Item],
        interests: &[String],
        n: usize,
        now: DateTime<Utc>,
    ) -> Vec<Item> {
        let eligible: Vec<Item> = candidates
            .iter()
            .filter(|item| is_eligible(item, now))
            .cloned()
            .collect();

        let profile = HashMap::new();
        let ctx = ScoringContext {
            space: None,
            profile: &profile,
            groups: &[],
            interests,
            now,
        };
        let ranking = TopicScorer.score(&ctx, &eligible);

        let by_id: HashMap<&str, &Item> =
            eligible.iter().map(|item| (item.id.as_str(), item)).collect();
        ranking
            .into_iter()
            .take(n)
            .filter_map(|scored| by_id.get(scored.item_id.as_str()).map(|&i| i.clone()))
            .collect()
    }

    /// Diversity-constrained selection across source groups.
    ///
    /// Empty when no vector space exists to embed candidates in.
    pub fn select_diverse(
        &self,
        source_groups: HashMap<String, Vec<Item>>,
        user_vector: &SparseVector,
        n: usize,
    ) -> Vec<Item> {
        let Some(space) = self.snapshot() else {
            return Vec::new();
        };
        let selector = DiverseSelector {
            seed: self.settings.selector_seed,
        };
        selector.select(&space, source_groups, user_vector, n)
    }

    /// The user's profile as a unit vector in the current space: the
    /// weight-scaled sum of the rows for items they interacted with.
    /// `None` without a space, a profile, or any in-corpus entries.
    pub fn profile_vector(&self, user_id: &str) -> Option<SparseVector> {
        let space = self.snapshot()?;
        let profile = self.profiles.get(user_id);
        if profile.is_empty() {
            return None;
        }
        let mut combined = SparseVector::zero();
        for (item_id, weight) in &profile {
            if let Some(vector) = space.vector(item_id) {
                combined.add_scaled(vector, *weight);
            }
        }
        if combined.is_zero() {
            None
        } else {
            Some(combined.normalized())
        }
    }

    /// Freshly aggregated profiles for a set of registered groups.
    /// Unregistered group ids aggregate over nobody (all-zero profile).
    fn group_profiles(&self, group_ids: &[String]) -> Vec<GroupProfile> {
        let memberships = self.groups.read().expect("group lock poisoned");
        group_ids
            .iter()
            .map(|group_id| {
                let members = memberships.get(group_id).cloned().unwrap_or_default();
                aggregate(&self.profiles, group_id, &members)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> BTreeMap<String, String> {
        [
            ("a", "ai software startup"),
            ("b", "football championship game"),
            ("c", "ai research lab"),
        ]
        .into_iter()
        .map(|(id, text)| (id.to_string(), text.to_string()))
        .collect()
    }

    fn view(user: &str, item: &str, now: DateTime<Utc>) -> Interaction {
        Interaction {
            user_id: user.to_string(),
            item_id: item.to_string(),
            kind: "view".to_string(),
            timestamp: now,
            duration_minutes: None,
        }
    }

    #[test]
    fn build_swaps_snapshot() {
        let engine = RecommendationEngine::with_defaults();
        assert!(engine.snapshot().is_none());
        engine.build_vector_space(&corpus()).unwrap();
        assert_eq!(engine.snapshot().unwrap().len(), 3);
    }

    #[test]
    fn old_snapshot_survives_rebuild() {
        let engine = RecommendationEngine::with_defaults();
        engine.build_vector_space(&corpus()).unwrap();
        let held = engine.snapshot().unwrap();

        let smaller: BTreeMap<String, String> =
            [("x", "solar wildlife")].into_iter()
                .map(|(id, text)| (id.to_string(), text.to_string()))
                .collect();
        engine.build_vector_space(&smaller).unwrap();

        // The held Arc still answers for the old corpus.
        assert!((held.similarity("a", "a") - 1.0).abs() < 1e-9);
        assert_eq!(engine.snapshot().unwrap().len(), 1);
    }

    #[test]
    fn recommend_without_space_is_empty() {
        let engine = RecommendationEngine::with_defaults();
        assert!(engine.recommend_by_similarity("u", &[], 5).is_empty());
    }

    #[test]
    fn recommend_excludes_interacted_items() {
        let engine = RecommendationEngine::with_defaults();
        engine.build_vector_space(&corpus()).unwrap();
        let now = Utc::now();
        engine.update_profile("u", &[view("u", "a", now)], now);

        let ranking = engine.recommend_by_similarity("u", &[], 10);
        assert!(ranking.iter().all(|s| s.item_id != "a"));
        assert_eq!(ranking[0].item_id, "c");
    }

    #[test]
    fn group_influence_reaches_similarity_ranking() {
        let engine = RecommendationEngine::with_defaults();
        engine.build_vector_space(&corpus()).unwrap();
        let now = Utc::now();
        engine.update_profile("member", &[view("member", "b", now)], now);
        engine.aggregate_group("g", &["member".to_string()]);

        // u has no profile of their own; the group profile alone lifts b.
        let ranking = engine.recommend_by_similarity("u", &["g".to_string()], 10);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].item_id, "b");
    }

    #[test]
    fn unregistered_group_is_harmless() {
        let engine = RecommendationEngine::with_defaults();
        engine.build_vector_space(&corpus()).unwrap();
        let ranking = engine.recommend_by_similarity("u", &["phantom".to_string()], 10);
        assert!(ranking.is_empty());
    }

    #[test]
    fn profile_vector_requires_in_corpus_weight() {
        let engine = RecommendationEngine::with_defaults();
        engine.build_vector_space(&corpus()).unwrap();
        assert!(engine.profile_vector("u").is_none());

        let now = Utc::now();
        engine.update_profile("u", &[view("u", "stale-id", now)], now);
        assert!(engine.profile_vector("u").is_none());

        engine.update_profile("u", &[view("u", "a", now)], now);
        let vector = engine.profile_vector("u").unwrap();
        assert!((vector.norm() - 1.0).abs() < 1e-9);
    }
}
