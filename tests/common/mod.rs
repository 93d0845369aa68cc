#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use trackfit_api::{config::AppConfig, db, logging, AppState};

/// Application backed by a private in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig::new(
        "sqlite::memory:".to_string(),
        "127.0.0.1".to_string(),
        18_080,
        "test".to_string(),
    );
    // One connection keeps every query on the same in-memory database.
    cfg.db_max_connections = 1;
    cfg.db_min_connections = 1;
    cfg.cors_allow_any_origin = true;
    cfg
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(cfg: AppConfig) -> Self {
        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool).await.expect("migrations");

        let state = AppState::new(Arc::new(pool), cfg).expect("app state");
        let router = trackfit_api::build_router(state.clone(), logging::discard_logger())
            .expect("router");
        Self { router, state }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router response")
    }

    /// Creates a batch and returns the created item objects.
    pub async fn create_items(&self, item_type: &str, vendor: &str, quantity: u32) -> Vec<Value> {
        let response = self
            .request(
                Method::POST,
                "/api/items",
                Some(json!({
                    "itemType": item_type,
                    "vendorName": vendor,
                    "supplyDate": "2024-01-15",
                    "warrantyPeriod": 24,
                    "quantity": quantity,
                })),
            )
            .await;
        assert_eq!(response.status(), 201);
        let body = response_json(response).await;
        body["data"]["items"]
            .as_array()
            .expect("items array")
            .clone()
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
