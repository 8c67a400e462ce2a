//! Readiness probe backed by real database and broker checks.

use crate::state::AppState;
use async_nats::connection::State as ConnectionState;
use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;

/// 200 when Postgres answers and the NATS client is connected, 503 otherwise.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "database",
            Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) }),
        ),
        (
            "nats",
            Box::pin(async {
                match state.nats.connection_state() {
                    ConnectionState::Connected => Ok(()),
                    other => Err(format!("NATS connection is {:?}", other)),
                }
            }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(state)
}
