//! Health Check
//!
//! Scoreboard health state for load balancers and monitoring.
//!
//! ## Response Format
//! ```json
//! {
//!   "status": "healthy",
//!   "uptime_seconds": 3600,
//!   "version": "0.1.0",
//!   "timestamp": 1234567890,
//!   "details": { "active_matches": 5, "matches_started": 12, ... }
//! }
//! ```

use crate::shared::metrics::ScoreboardMetrics;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Serving, but something needs attention
    Degraded,
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub uptime_seconds: u64,
    pub version: String,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Scoreboard activity figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDetails {
    pub active_matches: i64,
    pub matches_started: u64,
    pub matches_finished: u64,
    pub goals_recorded: u64,
}

impl HealthDetails {
    pub fn from_metrics(metrics: &ScoreboardMetrics) -> Self {
        Self {
            active_matches: metrics.active_matches.get(),
            matches_started: metrics.matches_started.get(),
            matches_finished: metrics.matches_finished.get(),
            goals_recorded: metrics.total_goals(),
        }
    }
}

/// Health checker
pub struct HealthChecker {
    start_time: SystemTime,
    status: RwLock<HealthStatus>,
    version: String,
}

impl HealthChecker {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            start_time: SystemTime::now(),
            status: RwLock::new(HealthStatus::Healthy),
            version: version.into(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time
            .elapsed()
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    pub fn set_status(&self, status: HealthStatus) {
        *self.status.write() = status;
    }

    pub fn get_status(&self) -> HealthStatus {
        *self.status.read()
    }

    pub fn check_health(&self) -> HealthResponse {
        HealthResponse {
            status: self.get_status(),
            uptime_seconds: self.uptime_seconds(),
            version: self.version.clone(),
            timestamp: Self::current_timestamp(),
            details: None,
        }
    }

    pub fn check_health_detailed(&self, details: HealthDetails) -> HealthResponse {
        HealthResponse {
            details: Some(details),
            ..self.check_health()
        }
    }

    /// Liveness probe: the process answers, so it is alive
    pub fn check_liveness(&self) -> bool {
        true
    }

    /// Readiness probe: accept traffic only while healthy
    pub fn check_readiness(&self) -> bool {
        matches!(self.get_status(), HealthStatus::Healthy)
    }
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::score::Side;

    #[test]
    fn test_health_checker_creation() {
        let checker = HealthChecker::new("1.0.0");
        assert_eq!(checker.version, "1.0.0");
        assert_eq!(checker.get_status(), HealthStatus::Healthy);
    }

    #[test]
    fn test_status_change() {
        let checker = HealthChecker::new("1.0.0");

        checker.set_status(HealthStatus::Degraded);
        assert_eq!(checker.get_status(), HealthStatus::Degraded);

        checker.set_status(HealthStatus::Unhealthy);
        assert_eq!(checker.get_status(), HealthStatus::Unhealthy);
    }

    #[test]
    fn test_health_response() {
        let checker = HealthChecker::new("1.0.0");
        let response = checker.check_health();

        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.version, "1.0.0");
        assert!(response.timestamp > 0);
        assert!(response.details.is_none());
    }

    #[test]
    fn test_details_from_metrics() {
        let metrics = ScoreboardMetrics::new();
        metrics.record_start();
        metrics.record_start();
        metrics.record_finish();
        metrics.record_goal(Side::Home);

        let details = HealthDetails::from_metrics(&metrics);
        assert_eq!(
            details,
            HealthDetails {
                active_matches: 1,
                matches_started: 2,
                matches_finished: 1,
                goals_recorded: 1,
            }
        );

        let response = HealthChecker::new("1.0.0").check_health_detailed(details);
        assert_eq!(response.details.unwrap().goals_recorded, 1);
    }

    #[test]
    fn test_liveness_probe() {
        let checker = HealthChecker::new("1.0.0");
        assert!(checker.check_liveness());

        // Still alive even when unhealthy
        checker.set_status(HealthStatus::Unhealthy);
        assert!(checker.check_liveness());
    }

    #[test]
    fn test_readiness_probe() {
        let checker = HealthChecker::new("1.0.0");
        assert!(checker.check_readiness());

        checker.set_status(HealthStatus::Degraded);
        assert!(!checker.check_readiness());

        checker.set_status(HealthStatus::Healthy);
        assert!(checker.check_readiness());
    }

    #[test]
    fn test_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            uptime_seconds: 3600,
            version: "1.0.0".to_string(),
            timestamp: 1234567890,
            details: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("3600"));
        assert!(!json.contains("details"));
    }
}
