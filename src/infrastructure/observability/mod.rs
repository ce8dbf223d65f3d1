//! Observability Module
//!
//! - `health` - health state and probes
//! - `http_server` - HTTP server for metrics and health endpoints

pub mod health;
pub mod http_server;

pub use health::{HealthChecker, HealthDetails, HealthResponse, HealthStatus};
pub use http_server::ObservabilityServer;
