//! Match Registry - authoritative set of active matches
//!
//! ## Locking
//! - One `parking_lot::RwLock` guards the key map and the team index
//! - Lookups (`get`, `contains`, `snapshot`) take the read lock only long
//!   enough to clone an `Arc<Match>`; score changes then go through the
//!   match's atomic counters with no registry lock held, so goals on
//!   unrelated matches never wait on each other
//! - `insert` performs the key check, both team checks and the insertion
//!   under a single write lock, so two inserts sharing a team cannot both
//!   succeed
//!
//! Keys are opaque. The registry does not know how they are derived and does
//! not validate team names; both are the caller's job.

use super::match_state::Match;
use crate::shared::timestamp::MonotonicClock;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

struct Inner<K> {
    matches: HashMap<K, Arc<Match>>,
    /// Every team currently playing, home or away
    teams: HashSet<Arc<str>>,
    clock: MonotonicClock,
    next_sequence: u64,
}

/// Thread-safe store of active matches keyed by `K`
pub struct MatchRegistry<K> {
    inner: RwLock<Inner<K>>,
}

impl<K: Eq + Hash> MatchRegistry<K> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a registry sized for `capacity` simultaneous matches
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                matches: HashMap::with_capacity(capacity),
                teams: HashSet::with_capacity(capacity * 2),
                clock: MonotonicClock::new(),
                next_sequence: 0,
            }),
        }
    }

    /// Registers a new match under `key`
    ///
    /// Succeeds only if `key` is absent and neither team plays in any stored
    /// match. The start time and registration sequence are assigned inside
    /// the same critical section, so they grow together.
    ///
    /// # Returns
    /// `true` if the match was registered
    pub fn insert(&self, key: K, home: Arc<str>, away: Arc<str>) -> bool {
        let mut inner = self.inner.write();

        if inner.matches.contains_key(&key)
            || inner.teams.contains(&home)
            || inner.teams.contains(&away)
        {
            return false;
        }

        let started_at = inner.clock.stamp();
        let sequence = inner.next_sequence;
        inner.next_sequence += 1;

        inner.teams.insert(home.clone());
        inner.teams.insert(away.clone());
        inner
            .matches
            .insert(key, Arc::new(Match::new(home, away, started_at, sequence)));
        true
    }

    /// Removes the match under `key`, if any
    ///
    /// Returns the removed match. Of several concurrent removals of the same
    /// key exactly one gets `Some`.
    pub fn remove(&self, key: &K) -> Option<Arc<Match>> {
        let mut inner = self.inner.write();
        let removed = inner.matches.remove(key)?;
        inner.teams.remove(removed.home_arc());
        inner.teams.remove(removed.away_arc());
        Some(removed)
    }

    pub fn get(&self, key: &K) -> Option<Arc<Match>> {
        self.inner.read().matches.get(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().matches.contains_key(key)
    }

    /// Number of active matches
    pub fn count(&self) -> usize {
        self.inner.read().matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// True if `team` is the home or away team of any stored match
    pub fn team_in_any_match(&self, team: &str) -> bool {
        self.inner.read().teams.contains(team)
    }

    /// Point-in-time list of active matches
    ///
    /// The returned handles stay valid after the registry changes; scores
    /// read through them keep moving if the match is still being played.
    pub fn snapshot(&self) -> Vec<Arc<Match>> {
        self.inner.read().matches.values().cloned().collect()
    }
}

impl<K: Eq + Hash> Default for MatchRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}
