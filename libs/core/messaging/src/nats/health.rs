//! Liveness, readiness and metrics endpoints for a worker process.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub stream_connected: bool,
    pub processor_healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Flags updated by the worker loop and read by the probes.
#[derive(Clone)]
pub struct HealthState {
    inner: Arc<RwLock<Inner>>,
}

struct Inner {
    stream_connected: bool,
    processor_healthy: bool,
    last_error: Option<String>,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                stream_connected: false,
                processor_healthy: true,
                last_error: None,
            })),
        }
    }

    pub async fn set_stream_connected(&self, connected: bool) {
        self.inner.write().await.stream_connected = connected;
    }

    pub async fn set_processor_healthy(&self, healthy: bool) {
        self.inner.write().await.processor_healthy = healthy;
    }

    pub async fn set_error(&self, error: Option<String>) {
        self.inner.write().await.last_error = error;
    }

    /// Liveness ignores the bus: a broker outage should not restart the pod.
    pub async fn is_alive(&self) -> bool {
        self.inner.read().await.processor_healthy
    }

    pub async fn is_ready(&self) -> bool {
        let inner = self.inner.read().await;
        inner.stream_connected && inner.processor_healthy
    }

    pub async fn status(&self) -> HealthStatus {
        let inner = self.inner.read().await;
        let ready = inner.stream_connected && inner.processor_healthy;
        HealthStatus {
            status: if ready { "healthy" } else { "unhealthy" }.to_string(),
            stream_connected: inner.stream_connected,
            processor_healthy: inner.processor_healthy,
            last_error: inner.last_error.clone(),
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Small HTTP server next to the worker loop.
pub struct HealthServer {
    port: u16,
    state: HealthState,
    metrics_handle: Option<PrometheusHandle>,
}

impl HealthServer {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            state: HealthState::new(),
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    pub fn state(&self) -> HealthState {
        self.state.clone()
    }

    pub fn router(&self) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(self.state.clone());

        if let Some(handle) = self.metrics_handle.clone() {
            router = router.route("/metrics", get(move || async move { handle.render() }));
        }

        router
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.router();
        let addr = format!("0.0.0.0:{}", self.port);

        info!(addr = %addr, "Starting health server");

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await
    }
}

async fn health_handler(State(state): State<HealthState>) -> impl IntoResponse {
    let code = if state.is_alive().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(state.status().await))
}

async fn ready_handler(State(state): State<HealthState>) -> impl IntoResponse {
    let code = if state.is_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(state.status().await))
}
