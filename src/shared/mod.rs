//! Shared utilities used across all layers
//!
//! - Timestamps (match start times)
//! - Team name interning
//! - Prometheus metrics

pub mod metrics;
pub mod team_pool;
pub mod timestamp;

pub use metrics::ScoreboardMetrics;
pub use team_pool::TeamPool;
pub use timestamp::{get_precise_timestamp, MonotonicClock};
