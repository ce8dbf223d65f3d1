/// Team name pool - shares one `Arc<str>` per team name
///
/// A team plays many matches over a tournament; interning keeps the
/// registry's match entries and team index pointing at the same allocation
/// instead of copying the name on every start.
///
/// - Known names: read lock + `Arc` clone
/// - New names: write lock + one heap allocation (double-checked)
/// - Finished teams are released, so the pool only holds names in play

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub struct TeamPool {
    teams: RwLock<HashMap<String, Arc<str>>>,
}

impl TeamPool {
    pub fn new() -> Self {
        Self {
            teams: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a pool sized for `capacity` distinct teams
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            teams: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Returns the shared name for `team`, creating it on first use
    #[inline]
    pub fn intern(&self, team: &str) -> Arc<str> {
        {
            let read_guard = self.teams.read();
            if let Some(arc) = read_guard.get(team) {
                return arc.clone();
            }
        }

        let mut write_guard = self.teams.write();

        // Another thread may have inserted it while we waited for the write lock
        write_guard
            .entry(team.to_string())
            .or_insert_with(|| Arc::from(team))
            .clone()
    }

    /// Drops `team` from the pool
    ///
    /// Handles already given out stay valid; the next `intern` of the same
    /// name allocates a fresh one.
    pub fn release(&self, team: &str) -> bool {
        self.teams.write().remove(team).is_some()
    }

    /// Number of distinct names held
    pub fn len(&self) -> usize {
        self.teams.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.read().is_empty()
    }
}

impl Default for TeamPool {
    fn default() -> Self {
        Self::new()
    }
}
