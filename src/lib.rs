//! TrackFit API Library
//!
//! Inventory tracking for railway track fittings: batch intake, inspections,
//! warranty and inspection classification, and derived analytics.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod analytics;
pub mod common;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod logging;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::{
    http::{HeaderValue, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use utoipa::ToSchema;

use crate::repositories::{InventoryStore, SeaOrmStore};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    /// Wires the SeaORM-backed store into every service.
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: config::AppConfig,
    ) -> Result<Self, errors::ServiceError> {
        let store: Arc<dyn InventoryStore> = Arc::new(SeaOrmStore::new(db.clone()));
        let services = handlers::AppServices::new(store, &config)?;
        Ok(Self {
            db,
            config,
            services,
        })
    }
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn success_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-123"), async {
                ApiResponse::success("ok")
            })
            .await;

        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-123"));
        DateTime::parse_from_rfc3339(&meta.timestamp).expect("timestamp should parse");
    }

    #[test]
    fn envelope_outside_request_has_no_request_id() {
        let response = ApiResponse::success(());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["meta"].get("request_id").is_none());
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// Result type for handlers that create resources (`201 Created`).
pub type CreatedResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), errors::ServiceError>;

/// Routes mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items",
            get(handlers::items::list_items).post(handlers::items::create_items),
        )
        .route(
            "/items/:id",
            get(handlers::items::get_item)
                .put(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        )
        .route(
            "/items/:id/inspections",
            get(handlers::inspections::list_item_inspections),
        )
        .route(
            "/inspections",
            post(handlers::inspections::create_inspection),
        )
        .route("/vendors", get(handlers::vendors::list_vendors))
        .route("/vendors/:id", get(handlers::vendors::get_vendor))
        .route("/qr/:id", get(handlers::qr::get_qr_code))
        .route("/stats", get(handlers::analytics::get_stats))
        .route(
            "/analytics/anomalies",
            get(handlers::analytics::get_anomalies),
        )
        .route(
            "/analytics/distribution",
            get(handlers::analytics::get_distribution),
        )
        .route(
            "/analytics/vendors",
            get(handlers::analytics::get_vendor_performance),
        )
        .route(
            "/ai/generate-summary",
            post(handlers::summary::generate_summary),
        )
}

/// CORS policy from config: explicit origins, else permissive when allowed.
pub fn cors_layer(cfg: &config::AppConfig) -> Result<CorsLayer, errors::ServiceError> {
    let origins: Vec<HeaderValue> = cfg
        .cors_allowed_origins
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !origins.is_empty() {
        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any))
    } else if cfg.should_allow_permissive_cors() {
        ::tracing::info!(
            environment = %cfg.environment,
            "using permissive CORS because explicit origins were not configured"
        );
        Ok(CorsLayer::permissive())
    } else {
        Err(errors::ServiceError::InternalError(
            "Missing CORS configuration: set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true"
                .to_string(),
        ))
    }
}

/// Full application: `/api`, health, Swagger UI and the middleware stack.
pub fn build_router(state: AppState, access_log: slog::Logger) -> Result<Router, errors::ServiceError> {
    let cors = cors_layer(&state.config)?;
    let logging_state = Arc::new(logging::LoggingState::new(access_log));
    let db = state.db.clone();

    let app = Router::new()
        .nest("/api", api_routes())
        .with_state(state)
        .merge(health::health_routes(db))
        .merge(openapi::swagger_ui())
        .layer(crate::tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            logging_state,
            logging::logging_middleware,
        ));
    Ok(app)
}

#[cfg(test)]
mod router_tests {
    use super::*;

    fn cfg(environment: &str) -> config::AppConfig {
        config::AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            8080,
            environment.into(),
        )
    }

    #[test]
    fn production_without_origins_is_rejected() {
        assert!(cors_layer(&cfg("production")).is_err());
    }

    #[test]
    fn explicit_origins_or_development_are_accepted() {
        assert!(cors_layer(&cfg("development")).is_ok());

        let mut prod = cfg("production");
        prod.cors_allowed_origins = Some("https://depot.example, https://ops.example".into());
        assert!(cors_layer(&prod).is_ok());
    }
}
