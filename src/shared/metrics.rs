//! Prometheus Metrics Module
//!
//! Scoreboard counters and gauges, registered in a per-instance
//! `prometheus::Registry` so that independent scoreboards (and tests) never
//! share values.
//!
//! ## Metric Types
//! - **Counter**: matches started/finished, goals, score adjustments,
//!   rejected requests by operation and error kind
//! - **Gauge**: active matches
//!
//! ## Usage
//! ```rust,ignore
//! let metrics = ScoreboardMetrics::new();
//! metrics.record_start();
//! metrics.record_goal(Side::Home);
//! println!("{}", metrics.export());
//! ```

use crate::domain::error::ScoreboardError;
use crate::domain::score::Side;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Scoreboard metrics
pub struct ScoreboardMetrics {
    registry: Registry,

    /// Successful starts
    pub matches_started: IntCounter,

    /// Successful finishes
    pub matches_finished: IntCounter,

    /// Goals recorded (by side)
    pub goals: IntCounterVec,

    /// Goals taken back for infractions (by side)
    pub adjustments: IntCounterVec,

    /// Rejected requests (by operation and error kind)
    pub rejections: IntCounterVec,

    /// Matches currently on the board
    pub active_matches: IntGauge,
}

impl ScoreboardMetrics {
    /// Creates and registers all metrics
    pub fn try_new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let matches_started = IntCounter::with_opts(Opts::new(
            "scoreboard_matches_started_total",
            "Total number of matches started",
        ))?;
        let matches_finished = IntCounter::with_opts(Opts::new(
            "scoreboard_matches_finished_total",
            "Total number of matches finished",
        ))?;
        let goals = IntCounterVec::new(
            Opts::new("scoreboard_goals_total", "Total number of goals recorded"),
            &["side"],
        )?;
        let adjustments = IntCounterVec::new(
            Opts::new(
                "scoreboard_score_adjustments_total",
                "Total number of goals taken back for infractions",
            ),
            &["side"],
        )?;
        let rejections = IntCounterVec::new(
            Opts::new(
                "scoreboard_rejections_total",
                "Total number of rejected scoreboard requests",
            ),
            &["operation", "kind"],
        )?;
        let active_matches = IntGauge::with_opts(Opts::new(
            "scoreboard_active_matches",
            "Number of matches currently in progress",
        ))?;

        registry.register(Box::new(matches_started.clone()))?;
        registry.register(Box::new(matches_finished.clone()))?;
        registry.register(Box::new(goals.clone()))?;
        registry.register(Box::new(adjustments.clone()))?;
        registry.register(Box::new(rejections.clone()))?;
        registry.register(Box::new(active_matches.clone()))?;

        Ok(Self {
            registry,
            matches_started,
            matches_finished,
            goals,
            adjustments,
            rejections,
            active_matches,
        })
    }

    /// Creates the metrics set
    ///
    /// The metric names and labels are fixed and registered into a fresh
    /// registry, so construction cannot fail.
    pub fn new() -> Self {
        Self::try_new().expect("static scoreboard metric definitions are valid")
    }

    pub fn record_start(&self) {
        self.matches_started.inc();
        self.active_matches.inc();
    }

    pub fn record_finish(&self) {
        self.matches_finished.inc();
        self.active_matches.dec();
    }

    pub fn record_goal(&self, side: Side) {
        self.goals.with_label_values(&[side.as_str()]).inc();
    }

    pub fn record_adjustment(&self, side: Side) {
        self.adjustments.with_label_values(&[side.as_str()]).inc();
    }

    pub fn record_rejection(&self, operation: &str, error: &ScoreboardError) {
        self.rejections
            .with_label_values(&[operation, error.kind().as_str()])
            .inc();
    }

    /// Goals recorded on both sides, not counting adjustments
    pub fn total_goals(&self) -> u64 {
        self.goals.with_label_values(&[Side::Home.as_str()]).get()
            + self.goals.with_label_values(&[Side::Away.as_str()]).get()
    }

    /// Registry holding these metrics
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Renders the Prometheus text exposition format
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = vec![];
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl Default for ScoreboardMetrics {
    fn default() -> Self {
        Self::new()
    }
}
