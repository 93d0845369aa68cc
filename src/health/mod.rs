/*!
 * # Health Check Module
 *
 * Liveness plus database reachability for load balancers and operators:
 *
 * - `/health` - overall status with per-dependency details
 * - `/health/live` - process is up
 * - `/health/ready` - database answers a ping
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthDetail {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub details: BTreeMap<String, HealthDetail>,
}

#[derive(Clone)]
pub struct HealthState {
    pub db: Arc<DatabaseConnection>,
    pub start_time: Instant,
}

impl HealthState {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            start_time: Instant::now(),
        }
    }
}

async fn database_detail(db: &DatabaseConnection) -> HealthDetail {
    let started = Instant::now();
    let result = crate::db::check_connection(db).await;
    let latency_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(()) => HealthDetail {
            status: HealthStatus::Up,
            message: None,
            latency_ms,
        },
        Err(err) => {
            warn!(error = %err, "database health check failed");
            HealthDetail {
                status: HealthStatus::Down,
                message: Some("database unreachable".to_string()),
                latency_ms,
            }
        }
    }
}

fn status_code(status: HealthStatus) -> StatusCode {
    match status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Overall health; 503 when any dependency is down.
pub async fn health_check(State(state): State<HealthState>) -> impl IntoResponse {
    let database = database_detail(&state.db).await;
    let status = database.status;

    let mut details = BTreeMap::new();
    details.insert("database".to_string(), database);

    let info = HealthInfo {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        details,
    };
    (status_code(status), Json(info))
}

pub async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": HealthStatus::Up })))
}

pub async fn readiness_check(State(state): State<HealthState>) -> impl IntoResponse {
    let database = database_detail(&state.db).await;
    (
        status_code(database.status),
        Json(json!({ "status": database.status })),
    )
}

/// Health routes with their own state, ready to merge into the app router.
pub fn health_routes(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
        .route("/health/ready", get(readiness_check))
        .with_state(HealthState::new(db))
}
