// Group profile aggregation.
//
// A group profile is the L1-normalized sum of its members' profiles over
// the shared item-id space. Recomputed fully on every call — there is no
// incremental merge state, so membership changes show up on the next
// aggregation. Member profiles are read live; a member updating mid-call
// yields slight staleness, which is fine for an advisory signal.

use std::collections::HashMap;

use crate::model::GroupProfile;
use crate::profile::store::ProfileStore;

/// Aggregate member profiles into one normalized group profile.
///
/// Members with no profile contribute nothing. When no member has any
/// weight at all the group profile is all-zero — a valid profile that
/// never outranks anything, not an error.
pub fn aggregate(store: &ProfileStore, group_id: &str, member_ids: &[String]) -> GroupProfile {
    let mut summed: HashMap<String, f64> = HashMap::new();
    for member in member_ids {
        for (item_id, weight) in store.get(member) {
            *summed.entry(item_id).or_insert(0.0) += weight;
        }
    }

    let total: f64 = summed.values().sum();
    if total <= 0.0 {
        return GroupProfile::empty(group_id);
    }

    for weight in summed.values_mut() {
        *weight /= total;
    }

    GroupProfile {
        group_id: group_id.to_string(),
        weights: summed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Interaction;
    use chrono::Utc;

    fn store_with(users: &[(&str, &[(&str, &str)])]) -> ProfileStore {
        let store = ProfileStore::new();
        let now = Utc::now();
        for (user, events) in users {
            let batch: Vec<Interaction> = events
                .iter()
                .map(|(item, kind)| Interaction {
                    user_id: user.to_string(),
                    item_id: item.to_string(),
                    kind: kind.to_string(),
                    timestamp: now,
                    duration_minutes: None,
                })
                .collect();
            store.update(user, &batch, 0.1, now);
        }
        store
    }

    #[test]
    fn weights_sum_to_one() {
        let store = store_with(&[
            ("alice", &[("a", "view"), ("b", "bookmark")]),
            ("bob", &[("b", "note")]),
        ]);
        let group = aggregate(&store, "g", &["alice".to_string(), "bob".to_string()]);
        let total: f64 = group.weights.values().sum();
        assert!((total - 1.0).abs() < 1e-9, "sum = {total}");
    }

    #[test]
    fn members_without_profiles_contribute_nothing() {
        let store = store_with(&[("alice", &[("a", "view")])]);
        let group = aggregate(&store, "g", &["alice".to_string(), "ghost".to_string()]);
        assert_eq!(group.weights.len(), 1);
        assert!((group.weights["a"] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_membership_is_all_zero() {
        let store = ProfileStore::new();
        let group = aggregate(&store, "g", &[]);
        assert!(group.weights.is_empty());
    }

    #[test]
    fn no_weight_anywhere_is_all_zero() {
        let store = ProfileStore::new();
        let group = aggregate(&store, "g", &["nobody".to_string()]);
        assert!(group.weights.is_empty());
        assert_eq!(group.group_id, "g");
    }

    #[test]
    fn shared_items_accumulate_across_members() {
        let store = store_with(&[
            ("alice", &[("a", "view")]),
            ("bob", &[("a", "view")]),
            ("carol", &[("b", "view")]),
        ]);
        let group = aggregate(
            &store,
            "g",
            &["alice".to_string(), "bob".to_string(), "carol".to_string()],
        );
        // a carries 2 of 3 total weight units
        assert!((group.weights["a"] - 2.0 / 3.0).abs() < 1e-9);
        assert!((group.weights["b"] - 1.0 / 3.0).abs() < 1e-9);
    }
}
