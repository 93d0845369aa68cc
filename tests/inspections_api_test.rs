mod common;

use axum::http::Method;
use chrono::{Duration, SecondsFormat, Utc};
use serde_json::json;
use uuid::Uuid;

use common::{response_json, TestApp};

fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[tokio::test]
async fn recording_inspection_updates_item() {
    let app = TestApp::new().await;
    let items = app.create_items("rail-pad", "Acme Rail", 1).await;
    let id = items[0]["id"].as_str().unwrap().to_string();

    let inspected_at = days_ago(10);
    let response = app
        .request(
            Method::POST,
            "/api/inspections",
            Some(json!({
                "itemId": id,
                "inspectionDate": inspected_at,
                "inspectorName": "  R. Iyer ",
                "condition": "fair",
                "notes": "Pad worn at gauge side",
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let created = response_json(response).await["data"].clone();
    assert_eq!(created["itemId"], id.as_str());
    assert_eq!(created["inspectorName"], "R. Iyer");
    assert_eq!(created["condition"], "fair");
    assert_eq!(created["inspectionDate"], inspected_at.as_str());

    let item = response_json(app.request(Method::GET, &format!("/api/items/{}", id), None).await).await;
    assert_eq!(item["data"]["lastInspectionDate"], inspected_at.as_str());
    assert_eq!(item["data"]["inspectionStatus"], "current");
}

#[tokio::test]
async fn inspections_list_newest_first() {
    let app = TestApp::new().await;
    let items = app.create_items("rail-liner", "Acme Rail", 1).await;
    let id = items[0]["id"].as_str().unwrap().to_string();

    for (days, condition) in [(200, "good"), (5, "poor"), (100, "fair")] {
        let response = app
            .request(
                Method::POST,
                "/api/inspections",
                Some(json!({
                    "itemId": id,
                    "inspectionDate": days_ago(days),
                    "condition": condition,
                })),
            )
            .await;
        assert_eq!(response.status(), 201);
    }

    let response = app
        .request(Method::GET, &format!("/api/items/{}/inspections", id), None)
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    let conditions: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["condition"].as_str().unwrap())
        .collect();
    assert_eq!(conditions, vec!["poor", "fair", "good"]);
}

#[tokio::test]
async fn inspection_requires_live_item() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/inspections",
            Some(json!({
                "itemId": Uuid::new_v4(),
                "inspectionDate": days_ago(1),
                "condition": "good",
            })),
        )
        .await;
    assert_eq!(response.status(), 404);

    let items = app.create_items("rail-pad", "Acme Rail", 1).await;
    let id = items[0]["id"].as_str().unwrap().to_string();
    let response = app.request(Method::DELETE, &format!("/api/items/{}", id), None).await;
    assert_eq!(response.status(), 200);

    let response = app
        .request(
            Method::POST,
            "/api/inspections",
            Some(json!({ "itemId": id, "inspectionDate": days_ago(1), "condition": "good" })),
        )
        .await;
    assert_eq!(response.status(), 404);

    let response = app
        .request(Method::GET, &format!("/api/items/{}/inspections", id), None)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn malformed_inspection_is_bad_request() {
    let app = TestApp::new().await;
    let items = app.create_items("rail-pad", "Acme Rail", 1).await;
    let id = items[0]["id"].as_str().unwrap();

    let response = app
        .request(
            Method::POST,
            "/api/inspections",
            Some(json!({ "itemId": id, "inspectionDate": days_ago(1), "condition": "broken" })),
        )
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .request(
            Method::POST,
            "/api/inspections",
            Some(json!({ "itemId": id, "condition": "good" })),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn vendor_lookup() {
    let app = TestApp::new().await;
    app.create_items("rail-pad", "Acme Rail", 1).await;

    let vendors = response_json(app.request(Method::GET, "/api/vendors", None).await).await;
    let vendor_id = vendors["data"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(vendors["data"][0]["name"], "Acme Rail");

    let response = app
        .request(Method::GET, &format!("/api/vendors/{}", vendor_id), None)
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response_json(response).await["data"]["name"], "Acme Rail");

    let response = app
        .request(Method::GET, &format!("/api/vendors/{}", Uuid::new_v4()), None)
        .await;
    assert_eq!(response.status(), 404);
}
