// Per-user interest profiles.
//
// A profile is a map from item-id to accumulated weight. Each interaction
// contributes base_weight(kind) × engagement_multiplier × exp(-decay × age),
// added on top of whatever weight the item already carries. Accumulation is
// strictly additive: the store has no deduplication, so replaying an event
// double-counts it. Callers own idempotence.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::model::{engagement_multiplier, Interaction, InteractionKind};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// What happened to an update batch: how many events were folded in and
/// how many were rejected for carrying an unknown kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub applied: usize,
    pub rejected: usize,
}

/// Holds every user's profile for the process lifetime.
///
/// Writes serialize behind the lock, which also covers the per-user
/// serialization contract; reads hand out cloned snapshots so scoring
/// passes never observe a half-applied batch.
#[derive(Default)]
pub struct ProfileStore {
    profiles: RwLock<HashMap<String, HashMap<String, f64>>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a batch of interactions into a user's profile.
    ///
    /// Decay is applied relative to `now` at this call, so older events
    /// contribute less the later they are folded in. Events with an
    /// unknown kind are rejected individually; the rest of the batch
    /// proceeds.
    pub fn update(
        &self,
        user_id: &str,
        interactions: &[Interaction],
        decay_rate: f64,
        now: DateTime<Utc>,
    ) -> UpdateOutcome {
        let mut outcome = UpdateOutcome::default();
        let mut profiles = self.profiles.write().expect("profile lock poisoned");
        let profile = profiles.entry(user_id.to_string()).or_default();

        for interaction in interactions {
            let kind = match InteractionKind::parse(&interaction.kind) {
                Ok(kind) => kind,
                Err(err) => {
                    warn!(
                        user = user_id,
                        item = interaction.item_id.as_str(),
                        %err,
                        "Rejected interaction"
                    );
                    outcome.rejected += 1;
                    continue;
                }
            };

            // Future-dated events clamp to age zero rather than inflating.
            let age_days =
                ((now - interaction.timestamp).num_seconds() as f64 / SECONDS_PER_DAY).max(0.0);
            let weight = kind.base_weight()
                * engagement_multiplier(interaction.duration_minutes)
                * (-decay_rate * age_days).exp();

            *profile.entry(interaction.item_id.clone()).or_insert(0.0) += weight;
            outcome.applied += 1;
        }

        debug!(
            user = user_id,
            applied = outcome.applied,
            rejected = outcome.rejected,
            "Profile updated"
        );
        outcome
    }

    /// A snapshot of the user's profile; empty for an unknown user.
    pub fn get(&self, user_id: &str) -> HashMap<String, f64> {
        self.profiles
            .read()
            .expect("profile lock poisoned")
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Clear a user's profile. The only way weight ever leaves the store.
    pub fn reset(&self, user_id: &str) {
        self.profiles
            .write()
            .expect("profile lock poisoned")
            .remove(user_id);
    }

    /// Fold an external weight map into a user's profile additively.
    pub fn merge(&self, user_id: &str, weights: &HashMap<String, f64>) {
        let mut profiles = self.profiles.write().expect("profile lock poisoned");
        let profile = profiles.entry(user_id.to_string()).or_default();
        for (item_id, weight) in weights {
            *profile.entry(item_id.clone()).or_insert(0.0) += weight;
        }
    }

    pub fn user_count(&self) -> usize {
        self.profiles.read().expect("profile lock poisoned").len()
    }
}
