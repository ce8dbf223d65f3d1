//! Scoreboard errors
//!
//! Every failure of a scoreboard operation is a rejected request: it is
//! returned synchronously to the caller and never leaves partial state
//! behind. Callers branch on [`ErrorKind`] rather than on message text.

use serde::Serialize;
use thiserror::Error;

/// Result alias used across the domain and application layers
pub type Result<T> = std::result::Result<T, ScoreboardError>;

/// Rejection reasons for scoreboard operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreboardError {
    /// Malformed input: empty team name, same team twice, unknown side token
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The same two teams are already playing with home/away swapped
    #[error("cannot use {home} vs {away}: the match between {away} and {home} is in progress")]
    ExistingMatchConflict { home: String, away: String },

    /// The forward pair is already active
    #[error("the match between {home} and {away} has already been started")]
    MatchAlreadyStarted { home: String, away: String },

    /// One of the teams is playing in another active match
    #[error("cannot start {home} vs {away}: {home} or {away} is already in a match")]
    TeamAlreadyInMatch { home: String, away: String },

    /// No active match for the forward pair
    #[error("the match between {home} and {away} cannot be found")]
    MatchNotFound { home: String, away: String },

    /// The requested mutation would break a score invariant
    #[error("illegal state: {0}")]
    IllegalState(String),
}

impl ScoreboardError {
    pub(crate) fn existing_conflict(home: &str, away: &str) -> Self {
        Self::ExistingMatchConflict {
            home: home.to_owned(),
            away: away.to_owned(),
        }
    }

    pub(crate) fn already_started(home: &str, away: &str) -> Self {
        Self::MatchAlreadyStarted {
            home: home.to_owned(),
            away: away.to_owned(),
        }
    }

    pub(crate) fn team_busy(home: &str, away: &str) -> Self {
        Self::TeamAlreadyInMatch {
            home: home.to_owned(),
            away: away.to_owned(),
        }
    }

    pub(crate) fn not_found(home: &str, away: &str) -> Self {
        Self::MatchNotFound {
            home: home.to_owned(),
            away: away.to_owned(),
        }
    }

    /// Tag identifying which rejection this is
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoreboardError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ScoreboardError::ExistingMatchConflict { .. } => ErrorKind::ExistingMatchConflict,
            ScoreboardError::MatchAlreadyStarted { .. } => ErrorKind::MatchAlreadyStarted,
            ScoreboardError::TeamAlreadyInMatch { .. } => ErrorKind::TeamAlreadyInMatch,
            ScoreboardError::MatchNotFound { .. } => ErrorKind::MatchNotFound,
            ScoreboardError::IllegalState(_) => ErrorKind::IllegalState,
        }
    }
}

/// Copyable tag for [`ScoreboardError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    ExistingMatchConflict,
    MatchAlreadyStarted,
    TeamAlreadyInMatch,
    MatchNotFound,
    IllegalState,
}

impl ErrorKind {
    /// Stable label, used for metrics and CLI output
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::ExistingMatchConflict => "existing_match_conflict",
            ErrorKind::MatchAlreadyStarted => "match_already_started",
            ErrorKind::TeamAlreadyInMatch => "team_already_in_match",
            ErrorKind::MatchNotFound => "match_not_found",
            ErrorKind::IllegalState => "illegal_state",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
