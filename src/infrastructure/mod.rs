//! Infrastructure Layer - Technical Implementations
//!
//! Depends on the domain and shared layers; nothing in the domain depends
//! on it.
//!
//! ## Modules
//! - `observability`: Prometheus metrics endpoint and health checks

pub mod observability;

pub use observability::{HealthChecker, ObservabilityServer};
