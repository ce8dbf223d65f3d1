//! Score counters
//!
//! A live [`Score`] is a pair of atomic counters so that goals on different
//! matches, and goals on the two sides of the same match, never contend on
//! a lock. [`ScoreLine`] is the plain value read out of it.

use super::error::{Result, ScoreboardError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Which team a score mutation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

impl FromStr for Side {
    type Err = ScoreboardError;

    fn from_str(token: &str) -> Result<Self> {
        if token.eq_ignore_ascii_case("home") {
            Ok(Side::Home)
        } else if token.eq_ignore_ascii_case("away") {
            Ok(Side::Away)
        } else {
            Err(ScoreboardError::InvalidArgument(format!(
                "unrecognized side '{}', expected 'home' or 'away'",
                token
            )))
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time score value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub home: u64,
    pub away: u64,
}

impl ScoreLine {
    pub fn new(home: u64, away: u64) -> Self {
        Self { home, away }
    }

    /// Goals scored by both teams
    pub fn total(&self) -> u64 {
        self.home + self.away
    }

    pub fn get(&self, side: Side) -> u64 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}

/// Live score of an active match
///
/// Neither counter ever goes below zero: decrements use a compare-and-swap
/// loop that refuses to cross zero instead of clamping.
#[derive(Debug, Default)]
pub struct Score {
    home: AtomicU64,
    away: AtomicU64,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn counter(&self, side: Side) -> &AtomicU64 {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn get(&self, side: Side) -> u64 {
        self.counter(side).load(Ordering::Acquire)
    }

    /// Reads both counters
    ///
    /// The two loads are independent, so under concurrent goals the pair may
    /// mix values from either side of a concurrent increment.
    pub fn line(&self) -> ScoreLine {
        ScoreLine {
            home: self.home.load(Ordering::Acquire),
            away: self.away.load(Ordering::Acquire),
        }
    }

    /// Adds one goal to `side` and returns the new value
    pub(crate) fn increment(&self, side: Side) -> u64 {
        self.counter(side).fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Takes one goal away from `side`, returning the new value
    ///
    /// Returns `None` and leaves the counter untouched if it is already zero.
    pub(crate) fn decrement(&self, side: Side) -> Option<u64> {
        self.counter(side)
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| v.checked_sub(1))
            .ok()
            .map(|previous| previous - 1)
    }
}
