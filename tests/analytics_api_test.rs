mod common;

use axum::http::Method;
use chrono::{DateTime, Duration, Months, SecondsFormat, Utc};
use serde_json::{json, Value};

use common::{response_json, TestApp};

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

async fn create_one(app: &TestApp, item_type: &str, vendor: &str, supply: DateTime<Utc>) -> String {
    let response = app
        .request(
            Method::POST,
            "/api/items",
            Some(json!({
                "itemType": item_type,
                "vendorName": vendor,
                "supplyDate": rfc3339(supply),
                "warrantyPeriod": 12,
                "quantity": 1,
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    response_json(response).await["data"]["items"][0]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Three items: one expiring in about 20 days, one fresh and inspected, one expired.
async fn seeded() -> (TestApp, [String; 3]) {
    let app = TestApp::new().await;
    let now = Utc::now();

    let expiring_supply = (now + Duration::days(20)).checked_sub_months(Months::new(12)).unwrap();
    let expiring = create_one(&app, "rail-pad", "Acme Rail", expiring_supply).await;
    let fresh = create_one(&app, "rail-pad", "Acme Rail", now).await;
    let expired_supply = now.checked_sub_months(Months::new(13)).unwrap();
    let expired = create_one(&app, "rail-liner", "Bharat Fittings", expired_supply).await;

    let response = app
        .request(
            Method::POST,
            "/api/inspections",
            Some(json!({
                "itemId": fresh,
                "inspectionDate": rfc3339(now - Duration::days(10)),
                "condition": "excellent",
            })),
        )
        .await;
    assert_eq!(response.status(), 201);

    (app, [expiring, fresh, expired])
}

#[tokio::test]
async fn stats_count_live_items() {
    let (app, [expiring, _, _]) = seeded().await;

    let response = app.request(Method::GET, "/api/stats", None).await;
    assert_eq!(response.status(), 200);
    let stats = response_json(response).await["data"].clone();
    assert_eq!(
        stats,
        json!({
            "totalItems": 3,
            "warrantyExpiring": 1,
            "inspectionsOverdue": 2,
            "activeVendors": 2,
        })
    );

    let response = app
        .request(Method::DELETE, &format!("/api/items/{}", expiring), None)
        .await;
    assert_eq!(response.status(), 200);

    let stats = response_json(app.request(Method::GET, "/api/stats", None).await).await["data"].clone();
    assert_eq!(stats["totalItems"], 2);
    assert_eq!(stats["warrantyExpiring"], 0);
    assert_eq!(stats["inspectionsOverdue"], 1);
}

#[tokio::test]
async fn derived_statuses_and_filters() {
    let (app, [expiring, fresh, expired]) = seeded().await;

    let status_of = |body: &Value, id: &str| -> (String, String) {
        let item = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|i| i["id"] == id)
            .unwrap()
            .clone();
        (
            item["warrantyStatus"].as_str().unwrap().to_string(),
            item["inspectionStatus"].as_str().unwrap().to_string(),
        )
    };

    let all = response_json(app.request(Method::GET, "/api/items", None).await).await;
    assert_eq!(status_of(&all, &expiring), ("expiring-soon".into(), "never".into()));
    assert_eq!(status_of(&all, &fresh), ("valid".into(), "current".into()));
    assert_eq!(status_of(&all, &expired), ("expired".into(), "never".into()));

    let expired_only = response_json(
        app.request(Method::GET, "/api/items?warrantyStatus=expired", None)
            .await,
    )
    .await;
    let ids: Vec<&str> = expired_only["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![expired.as_str()]);
}

#[tokio::test]
async fn anomaly_feed_ranks_by_severity() {
    let (app, [expiring, _, expired]) = seeded().await;

    let response = app.request(Method::GET, "/api/analytics/anomalies", None).await;
    assert_eq!(response.status(), 200);
    let feed = response_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(feed.len(), 3);
    assert!(feed.iter().all(|a| a["severity"] == "high"));

    let ids: Vec<&str> = feed.iter().map(|a| a["id"].as_str().unwrap()).collect();
    assert!(ids.contains(&format!("warranty-{}", expiring).as_str()));
    assert!(ids.contains(&format!("inspection-never-{}", expiring).as_str()));
    assert!(ids.contains(&format!("inspection-never-{}", expired).as_str()));

    let warranty = feed
        .iter()
        .find(|a| a["type"] == "warranty-expiring")
        .unwrap();
    assert_eq!(warranty["title"], "Warranty Expiring Soon");
    assert_eq!(warranty["itemId"], expiring.as_str());
    assert!(DateTime::parse_from_rfc3339(warranty["detectedAt"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn busy_vendor_raises_supply_pattern() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Method::POST,
            "/api/items",
            Some(json!({
                "itemType": "concrete-sleeper",
                "vendorName": "Konkan Sleepers",
                "supplyDate": rfc3339(Utc::now()),
                "warrantyPeriod": 36,
                "quantity": 5,
            })),
        )
        .await;
    assert_eq!(response.status(), 201);

    let feed = response_json(app.request(Method::GET, "/api/analytics/anomalies", None).await).await;
    let feed = feed["data"].as_array().unwrap();
    assert_eq!(feed.len(), 6);

    let last = feed.last().unwrap();
    assert_eq!(last["type"], "supply-pattern");
    assert_eq!(last["severity"], "low");
    assert_eq!(
        last["description"],
        "Vendor Konkan Sleepers showing increased supply frequency (5 items)"
    );
    assert!(last.get("itemId").is_none());
}

#[tokio::test]
async fn distribution_and_vendor_volume() {
    let (app, _) = seeded().await;

    let response = app.request(Method::GET, "/api/analytics/distribution", None).await;
    assert_eq!(response.status(), 200);
    let shares = response_json(response).await["data"].clone();
    assert_eq!(shares[0]["type"], "rail-pad");
    assert_eq!(shares[0]["count"], 2);
    assert_eq!(shares[0]["percentage"], 67);
    assert_eq!(shares[1]["type"], "rail-liner");
    assert_eq!(shares[1]["percentage"], 33);

    let response = app.request(Method::GET, "/api/analytics/vendors", None).await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response_json(response).await["data"],
        json!([
            { "vendor": "Acme Rail", "itemCount": 2 },
            { "vendor": "Bharat Fittings", "itemCount": 1 },
        ])
    );
}

#[tokio::test]
async fn empty_inventory_has_zero_stats() {
    let app = TestApp::new().await;

    let stats = response_json(app.request(Method::GET, "/api/stats", None).await).await;
    assert_eq!(stats["data"]["totalItems"], 0);
    assert_eq!(stats["data"]["activeVendors"], 0);

    let feed = response_json(app.request(Method::GET, "/api/analytics/anomalies", None).await).await;
    assert!(feed["data"].as_array().unwrap().is_empty());

    let shares = response_json(app.request(Method::GET, "/api/analytics/distribution", None).await).await;
    assert!(shares["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn health_and_docs_are_served() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response_json(response).await["status"], "up");

    let response = app.request(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), 200);
    let doc = response_json(response).await;
    assert!(doc["paths"].get("/api/items/{id}").is_some());
}
