// TTL cache contract for the fetch collaborator.
//
// Feed and article fetches are cached by URL with an expiry instant. The
// cache is owned by the collaborator that does the fetching — the core
// never assumes cached data exists, this type just pins down the contract.
// Expiry compares caller-supplied instants so tests control the clock.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};

/// A minimal expiring cache: `put` with an explicit expiry instant,
/// `get` with the caller's notion of now.
#[derive(Debug, Default)]
pub struct TtlCache<K, V> {
    entries: HashMap<K, (DateTime<Utc>, V)>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The cached value, unless it is absent or expired at `now`.
    /// Expired entries are left in place; see [`TtlCache::purge_expired`].
    pub fn get(&self, key: &K, now: DateTime<Utc>) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|(expires_at, _)| *expires_at > now)
            .map(|(_, value)| value)
    }

    /// Insert or replace, valid until `expires_at`.
    pub fn put(&mut self, key: K, value: V, expires_at: DateTime<Utc>) {
        self.entries.insert(key, (expires_at, value));
    }

    /// Drop every entry already expired at `now`.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) {
        self.entries.retain(|_, (expires_at, _)| *expires_at > now);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
