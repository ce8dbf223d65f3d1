//! Active matches

use super::score::{Score, ScoreLine};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A match currently on the scoreboard
///
/// Teams, start time and registration sequence are fixed when the registry
/// admits the match. Only the score changes afterwards.
#[derive(Debug)]
pub struct Match {
    home: Arc<str>,
    away: Arc<str>,
    score: Score,
    /// Wall-clock nanoseconds, non-decreasing across registrations
    started_at: u64,
    /// Registration order within the owning registry
    sequence: u64,
}

impl Match {
    pub(crate) fn new(home: Arc<str>, away: Arc<str>, started_at: u64, sequence: u64) -> Self {
        Self {
            home,
            away,
            score: Score::new(),
            started_at,
            sequence,
        }
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn away(&self) -> &str {
        &self.away
    }

    pub(crate) fn home_arc(&self) -> &Arc<str> {
        &self.home
    }

    pub(crate) fn away_arc(&self) -> &Arc<str> {
        &self.away
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Freezes the current state into a plain value
    pub fn view(&self) -> MatchView {
        MatchView {
            home: self.home.to_string(),
            away: self.away.to_string(),
            score: self.score.line(),
            started_at: self.started_at,
            sequence: self.sequence,
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.score.line();
        write!(f, "{} {} - {} {}", self.home, line.home, self.away, line.away)
    }
}

/// Immutable snapshot of a match
///
/// The summary ranks views rather than live matches, so every comparison
/// during a sort sees the same score even while goals keep arriving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub home: String,
    pub away: String,
    pub score: ScoreLine,
    pub started_at: u64,
    pub sequence: u64,
}

impl fmt::Display for MatchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} {}",
            self.home, self.score.home, self.away, self.score.away
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::score::Side;

    fn sample() -> Match {
        Match::new(Arc::from("Mexico"), Arc::from("Canada"), 1_000, 0)
    }

    #[test]
    fn test_canonical_format() {
        let m = sample();
        assert_eq!(m.to_string(), "Mexico 0 - Canada 0");

        for _ in 0..5 {
            m.score().increment(Side::Away);
        }
        assert_eq!(m.to_string(), "Mexico 0 - Canada 5");
    }

    #[test]
    fn test_view_is_detached() {
        let m = sample();
        m.score().increment(Side::Home);
        let view = m.view();
        m.score().increment(Side::Home);

        assert_eq!(view.score, ScoreLine::new(1, 0));
        assert_eq!(view.to_string(), "Mexico 1 - Canada 0");
        assert_eq!(m.score().line(), ScoreLine::new(2, 0));
        assert_eq!(view.started_at, 1_000);
    }

    #[test]
    fn test_view_serialization() {
        let view = sample().view();
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"home\":\"Mexico\""));
        assert!(json.contains("\"score\":{\"home\":0,\"away\":0}"));
    }
}
