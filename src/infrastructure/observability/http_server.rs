//! HTTP Observability Server
//!
//! Exposes a scoreboard's metrics and health. It never exposes scoreboard
//! operations themselves.
//!
//! ## Endpoints
//! - `GET /metrics` - Prometheus text format
//! - `GET /health` - health with activity details
//! - `GET /health/ready` - readiness probe
//! - `GET /health/live` - liveness probe

use super::health::{HealthChecker, HealthDetails, HealthStatus};
use crate::shared::metrics::ScoreboardMetrics;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    health: Arc<HealthChecker>,
    metrics: Arc<ScoreboardMetrics>,
}

/// Observability server
pub struct ObservabilityServer {
    addr: SocketAddr,
    state: AppState,
}

impl ObservabilityServer {
    pub fn new(addr: SocketAddr, metrics: Arc<ScoreboardMetrics>) -> Self {
        Self {
            addr,
            state: AppState {
                health: Arc::new(HealthChecker::default()),
                metrics,
            },
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn health_checker(&self) -> Arc<HealthChecker> {
        self.state.health.clone()
    }

    /// Routes served by this server
    pub fn router(&self) -> Router {
        Router::new()
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler))
            .route("/health/ready", get(readiness_handler))
            .route("/health/live", get(liveness_handler))
            .with_state(self.state.clone())
    }

    /// Binds and serves until the task is dropped or the listener fails
    pub async fn run(self) -> std::io::Result<()> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(self.addr).await?;

        info!(addr = %self.addr, "observability server listening");
        axum::serve(listener, app).await
    }
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    (StatusCode::OK, state.metrics.export()).into_response()
}

async fn health_handler(State(state): State<AppState>) -> Response {
    let details = HealthDetails::from_metrics(&state.metrics);
    let response = state.health.check_health_detailed(details);

    let status_code = match response.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response)).into_response()
}

async fn readiness_handler(State(state): State<AppState>) -> StatusCode {
    if state.health.check_readiness() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn liveness_handler(State(state): State<AppState>) -> StatusCode {
    if state.health.check_liveness() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::score::Side;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn server() -> ObservabilityServer {
        let metrics = Arc::new(ScoreboardMetrics::new());
        metrics.record_start();
        metrics.record_goal(Side::Home);
        ObservabilityServer::new(SocketAddr::from(([127, 0, 0, 1], 9100)), metrics)
    }

    async fn get_path(app: Router, path: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_server_creation() {
        assert_eq!(server().addr().port(), 9100);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let (status, body) = get_path(server().router(), "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("scoreboard_matches_started_total 1"));
        assert!(body.contains("scoreboard_goals_total{side=\"home\"} 1"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = get_path(server().router(), "/health").await;
        assert_eq!(status, StatusCode::OK);

        let response: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(response["status"], "healthy");
        assert_eq!(response["details"]["active_matches"], 1);
        assert_eq!(response["details"]["goals_recorded"], 1);
    }

    #[tokio::test]
    async fn test_degraded_serves_health_but_not_ready() {
        let server = server();
        server.health_checker().set_status(HealthStatus::Degraded);
        let app = server.router();

        let (status, body) = get_path(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"degraded\""));

        let (status, _) = get_path(app, "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unhealthy_returns_503() {
        let server = server();
        server.health_checker().set_status(HealthStatus::Unhealthy);
        let app = server.router();

        let (status, _) = get_path(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, _) = get_path(app.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, _) = get_path(app, "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }
}
