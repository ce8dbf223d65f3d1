//! Scoreboard Service - live match orchestration
//!
//! Validates requests, enforces the team-conflict rules and mutates scores on
//! top of a [`MatchRegistry`].
//!
//! ## Concurrency
//! - `start_match` and `finish_match` run their conflict checks and the
//!   registry mutation under one short `lifecycle` mutex, so every attempt
//!   touching the same teams is linearized with exactly one winner
//! - `update_score` / `adjust_score_for_infraction` never take that mutex:
//!   they look the match up under the registry's read lock and then change
//!   its atomic counters, so goals on unrelated matches proceed in parallel
//!   and no concurrent goal is lost
//! - `get_summary` ranks a snapshot; it may miss starts/finishes racing with
//!   it but never double counts
//!
//! ## Dependency Injection
//! The service is generic over the [`MatchKeyGenerator`], and can be handed
//! an existing registry and metrics set for inspection in tests.
//!
//! ## Usage
//! ```rust
//! use live_scoreboard::application::services::ScoreboardService;
//! use live_scoreboard::domain::{SimpleMatchKeyGenerator, Side};
//!
//! let board = ScoreboardService::new(SimpleMatchKeyGenerator);
//! board.start_match("Mexico", "Canada").unwrap();
//! board.update_score("Mexico", "Canada", Side::Away).unwrap();
//! assert_eq!(board.get_summary(), vec!["Mexico 0 - Canada 1"]);
//! ```

use super::summary::{format_summary, rank_matches};
use crate::domain::error::{Result, ScoreboardError};
use crate::domain::key::MatchKeyGenerator;
use crate::domain::match_state::{Match, MatchView};
use crate::domain::registry::MatchRegistry;
use crate::domain::score::Side;
use crate::domain::validation::validate_team_names;
use crate::shared::metrics::ScoreboardMetrics;
use crate::shared::team_pool::TeamPool;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, trace};

/// Scoreboard sizing
#[derive(Debug, Clone)]
pub struct ScoreboardConfig {
    /// Expected number of simultaneous matches (pre-sizes internal maps)
    pub expected_matches: usize,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            expected_matches: 64,
        }
    }
}

/// Live scoreboard
///
/// # Type Parameters
/// * `G` - key generator deciding how `(home, away)` pairs are keyed
pub struct ScoreboardService<G: MatchKeyGenerator> {
    keys: G,
    registry: Arc<MatchRegistry<G::Key>>,
    teams: TeamPool,
    metrics: Arc<ScoreboardMetrics>,
    /// Held across the multi-team checks of start/finish
    lifecycle: Mutex<()>,
}

impl<G: MatchKeyGenerator> ScoreboardService<G> {
    /// Creates an empty scoreboard with default sizing
    pub fn new(keys: G) -> Self {
        Self::with_config(keys, ScoreboardConfig::default())
    }

    pub fn with_config(keys: G, config: ScoreboardConfig) -> Self {
        let registry = Arc::new(MatchRegistry::with_capacity(config.expected_matches));
        let mut service = Self::with_registry(keys, registry, Arc::new(ScoreboardMetrics::new()));
        service.teams = TeamPool::with_capacity(config.expected_matches * 2);
        service
    }

    /// Creates a scoreboard over an existing registry and metrics set
    ///
    /// The registry should be dedicated to this service: matches inserted
    /// behind its back bypass the conflict checks and the active-match gauge.
    pub fn with_registry(
        keys: G,
        registry: Arc<MatchRegistry<G::Key>>,
        metrics: Arc<ScoreboardMetrics>,
    ) -> Self {
        Self {
            keys,
            registry,
            teams: TeamPool::new(),
            metrics,
            lifecycle: Mutex::new(()),
        }
    }

    /// Preconditions shared by every team-pair operation
    ///
    /// # Errors
    /// * `InvalidArgument` - empty name, or the same team twice
    /// * `ExistingMatchConflict` - `(away, home)` is currently being played
    pub fn validate_teams(&self, home: &str, away: &str) -> Result<()> {
        validate_team_names(home, away)?;

        if self.registry.contains(&self.keys.generate_key(away, home)) {
            return Err(ScoreboardError::existing_conflict(home, away));
        }

        Ok(())
    }

    /// Starts a match with a 0-0 score
    ///
    /// # Errors
    /// * `InvalidArgument`, `ExistingMatchConflict` - see [`Self::validate_teams`]
    /// * `MatchAlreadyStarted` - `(home, away)` is already active
    /// * `TeamAlreadyInMatch` - either team plays in another active match
    pub fn start_match(&self, home: &str, away: &str) -> Result<()> {
        let result = self.try_start(home, away);
        self.observe("start", result)
    }

    fn try_start(&self, home: &str, away: &str) -> Result<()> {
        let _lifecycle = self.lifecycle.lock();

        self.validate_teams(home, away)?;

        let key = self.keys.generate_key(home, away);
        if self.registry.contains(&key) {
            return Err(ScoreboardError::already_started(home, away));
        }

        if self.registry.team_in_any_match(home) || self.registry.team_in_any_match(away) {
            return Err(ScoreboardError::team_busy(home, away));
        }

        if !self
            .registry
            .insert(key, self.teams.intern(home), self.teams.intern(away))
        {
            // Only reachable if the registry is shared with another writer
            return Err(ScoreboardError::team_busy(home, away));
        }

        self.metrics.record_start();
        debug!(home, away, "match started");
        Ok(())
    }

    /// Finishes an active match, discarding it
    ///
    /// Of several concurrent finishes of the same match exactly one succeeds;
    /// the others get `MatchNotFound`.
    ///
    /// # Errors
    /// * `InvalidArgument`, `ExistingMatchConflict` - see [`Self::validate_teams`]
    /// * `MatchNotFound` - `(home, away)` is not active
    pub fn finish_match(&self, home: &str, away: &str) -> Result<()> {
        let result = self.try_finish(home, away);
        self.observe("finish", result)
    }

    fn try_finish(&self, home: &str, away: &str) -> Result<()> {
        let _lifecycle = self.lifecycle.lock();

        self.validate_teams(home, away)?;

        let key = self.keys.generate_key(home, away);
        let finished = self
            .registry
            .remove(&key)
            .ok_or_else(|| ScoreboardError::not_found(home, away))?;

        // Starts intern under the same lock, so neither name can be in use
        self.teams.release(finished.home());
        self.teams.release(finished.away());

        self.metrics.record_finish();
        debug!(home, away, final_score = %finished, "match finished");
        Ok(())
    }

    /// Looks up the active match for the forward pair only
    ///
    /// `(away, home)` is never consulted: callers must use the orientation
    /// the match was started with.
    pub fn find_match(&self, home: &str, away: &str) -> Result<Arc<Match>> {
        self.registry
            .get(&self.keys.generate_key(home, away))
            .ok_or_else(|| ScoreboardError::not_found(home, away))
    }

    /// Current score as `"<home> <homeScore> - <away> <awayScore>"`
    pub fn get_score(&self, home: &str, away: &str) -> Result<String> {
        self.find_match(home, away).map(|m| m.to_string())
    }

    /// Records one goal for `side`
    ///
    /// # Errors
    /// * `InvalidArgument`, `ExistingMatchConflict` - see [`Self::validate_teams`]
    /// * `MatchNotFound` - `(home, away)` is not active
    pub fn update_score(&self, home: &str, away: &str, side: Side) -> Result<()> {
        let result = self.try_update(home, away, side);
        self.observe("update", result)
    }

    /// [`Self::update_score`] with the side given as a `home`/`away` token
    ///
    /// The team checks run before the token is parsed, so an unknown side
    /// on a reversed fixture reports `ExistingMatchConflict`.
    pub fn update_score_by_token(&self, home: &str, away: &str, side: &str) -> Result<()> {
        let result = self
            .validate_teams(home, away)
            .and_then(|_| side.parse::<Side>())
            .and_then(|side| self.apply_goal(home, away, side));
        self.observe("update", result)
    }

    fn try_update(&self, home: &str, away: &str, side: Side) -> Result<()> {
        self.validate_teams(home, away)?;
        self.apply_goal(home, away, side)
    }

    fn apply_goal(&self, home: &str, away: &str, side: Side) -> Result<()> {
        let found = self.find_match(home, away)?;

        let goals = found.score().increment(side);
        self.metrics.record_goal(side);
        trace!(home, away, %side, goals, "goal recorded");
        Ok(())
    }

    /// Takes back one goal from `side`, correcting an over-counted score
    ///
    /// # Errors
    /// * `MatchNotFound` - `(home, away)` is not active
    /// * `IllegalState` - the side's score is already zero (left unchanged)
    pub fn adjust_score_for_infraction(&self, home: &str, away: &str, side: Side) -> Result<()> {
        let result = self.try_adjust(home, away, side);
        self.observe("adjust", result)
    }

    /// [`Self::adjust_score_for_infraction`] with the side given as a token
    pub fn adjust_score_by_token(&self, home: &str, away: &str, side: &str) -> Result<()> {
        let result = side
            .parse::<Side>()
            .and_then(|side| self.try_adjust(home, away, side));
        self.observe("adjust", result)
    }

    fn try_adjust(&self, home: &str, away: &str, side: Side) -> Result<()> {
        let found = self.find_match(home, away)?;

        let goals = found.score().decrement(side).ok_or_else(|| {
            ScoreboardError::IllegalState(format!(
                "cannot adjust score for infraction: {} team score of {} vs {} is already zero",
                side, home, away
            ))
        })?;

        self.metrics.record_adjustment(side);
        trace!(home, away, %side, goals, "goal taken back");
        Ok(())
    }

    /// Ranked summary lines of every active match
    ///
    /// Highest total first; ties go to the most recently started match.
    pub fn get_summary(&self) -> Vec<String> {
        format_summary(&self.summary_views())
    }

    /// Ranked summary as structured snapshots
    pub fn summary_views(&self) -> Vec<MatchView> {
        rank_matches(self.registry.snapshot())
    }

    /// Number of matches in progress
    pub fn active_matches(&self) -> usize {
        self.registry.count()
    }

    pub fn registry(&self) -> &Arc<MatchRegistry<G::Key>> {
        &self.registry
    }

    pub fn metrics(&self) -> &Arc<ScoreboardMetrics> {
        &self.metrics
    }

    fn observe<T>(&self, operation: &'static str, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.metrics.record_rejection(operation, err);
        }
        result
    }
}
