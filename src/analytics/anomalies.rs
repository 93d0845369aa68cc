use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

use super::status::{
    days_since, days_until, severity_for_days_until_expiry, Severity, EXPIRING_SOON_DAYS,
    INSPECTION_OVERDUE_DAYS,
};
use crate::entities::item;

pub const MAX_ANOMALIES: usize = 10;
pub const SUPPLY_PATTERN_MIN_ITEMS: usize = 5;
const SEVERE_OVERDUE_DAYS: i64 = 365;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AnomalyType {
    WarrantyExpiring,
    InspectionOverdue,
    SupplyPattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub id: String,
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<Uuid>,
    pub severity: Severity,
    pub detected_at: DateTime<Utc>,
}

/// How far back `detected_at` may be placed for each kind of finding.
fn detection_window(anomaly_id: &str, anomaly_type: AnomalyType) -> Duration {
    match anomaly_type {
        AnomalyType::WarrantyExpiring => Duration::hours(24),
        AnomalyType::InspectionOverdue if anomaly_id.starts_with("inspection-never-") => {
            Duration::days(7)
        }
        AnomalyType::InspectionOverdue => Duration::days(3),
        AnomalyType::SupplyPattern => Duration::days(2),
    }
}

/// Stable, hash-derived detection instant within the record's window before `now`.
fn detected_at(anomaly_id: &str, anomaly_type: AnomalyType, now: DateTime<Utc>) -> DateTime<Utc> {
    let window_ms = detection_window(anomaly_id, anomaly_type).num_milliseconds() as u64;
    let digest = Sha256::digest(anomaly_id.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let offset_ms = u64::from_be_bytes(prefix) % window_ms.max(1);
    now - Duration::milliseconds(offset_ms as i64)
}

fn anomaly(
    id: String,
    anomaly_type: AnomalyType,
    title: &str,
    description: String,
    item_id: Option<Uuid>,
    severity: Severity,
    now: DateTime<Utc>,
) -> Anomaly {
    let detected_at = detected_at(&id, anomaly_type, now);
    Anomaly {
        id,
        anomaly_type,
        title: title.to_string(),
        description,
        item_id,
        severity,
        detected_at,
    }
}

fn item_anomalies(item: &item::Model, now: DateTime<Utc>, out: &mut Vec<Anomaly>) {
    let until_expiry = days_until(item.warranty_expiry_date, now);
    if until_expiry > 0 && until_expiry <= EXPIRING_SOON_DAYS {
        out.push(anomaly(
            format!("warranty-{}", item.id),
            AnomalyType::WarrantyExpiring,
            "Warranty Expiring Soon",
            format!(
                "Item {} warranty expires in {} days",
                item.id, until_expiry
            ),
            Some(item.id),
            severity_for_days_until_expiry(until_expiry),
            now,
        ));
    }

    match item.last_inspection_date {
        None => out.push(anomaly(
            format!("inspection-never-{}", item.id),
            AnomalyType::InspectionOverdue,
            "Inspection Required",
            format!("Item {} has never been inspected", item.id),
            Some(item.id),
            Severity::High,
            now,
        )),
        Some(last) => {
            let since = days_since(last, now);
            if since > INSPECTION_OVERDUE_DAYS {
                let severity = if since > SEVERE_OVERDUE_DAYS {
                    Severity::High
                } else {
                    Severity::Medium
                };
                out.push(anomaly(
                    format!("inspection-overdue-{}", item.id),
                    AnomalyType::InspectionOverdue,
                    "Inspection Overdue",
                    format!(
                        "Item {} is {} days overdue for inspection",
                        item.id, since
                    ),
                    Some(item.id),
                    severity,
                    now,
                ));
            }
        }
    }
}

/// Builds the ranked anomaly feed: severity first, then most recent
/// detection, capped at [`MAX_ANOMALIES`].
pub fn detect_anomalies(items: &[item::Model], now: DateTime<Utc>) -> Vec<Anomaly> {
    let live: Vec<&item::Model> = items.iter().filter(|i| i.deleted_at.is_none()).collect();

    let mut detected = Vec::new();
    for item in &live {
        item_anomalies(item, now, &mut detected);
    }

    let mut vendor_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in &live {
        *vendor_counts.entry(item.vendor_name.as_str()).or_default() += 1;
    }
    for (vendor, count) in vendor_counts {
        if count >= SUPPLY_PATTERN_MIN_ITEMS {
            detected.push(anomaly(
                format!("supply-pattern-{}", vendor),
                AnomalyType::SupplyPattern,
                "Supply Pattern Detected",
                format!(
                    "Vendor {} showing increased supply frequency ({} items)",
                    vendor, count
                ),
                None,
                Severity::Low,
                now,
            ));
        }
    }

    detected.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.detected_at.cmp(&a.detected_at))
    });
    detected.truncate(MAX_ANOMALIES);
    detected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::item_fixture;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn healthy(vendor: &str) -> item::Model {
        let mut item = item_fixture(vendor);
        item.warranty_expiry_date = now() + Duration::days(500);
        item.last_inspection_date = Some(now() - Duration::days(5));
        item
    }

    #[test]
    fn ranks_mixed_inventory_by_severity() {
        let now = now();
        let vendors = ["Acme Rail", "Bharat Fittings", "Coastal Track", "Delta Works"];
        let mut items: Vec<item::Model> = (0..12).map(|i| healthy(vendors[i % 4])).collect();

        items[0].warranty_expiry_date = now + Duration::days(20);
        items[1].warranty_expiry_date = now + Duration::days(45);
        items[2].warranty_expiry_date = now + Duration::days(80);
        items[3].last_inspection_date = Some(now - Duration::days(400));
        items[4].last_inspection_date = Some(now - Duration::days(700));

        let feed = detect_anomalies(&items, now);
        let severities: Vec<Severity> = feed.iter().map(|a| a.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::High,
                Severity::High,
                Severity::High,
                Severity::Medium,
                Severity::Low
            ]
        );
        assert!(feed.len() <= MAX_ANOMALIES);

        let high_types: Vec<AnomalyType> = feed[..3].iter().map(|a| a.anomaly_type).collect();
        assert_eq!(
            high_types
                .iter()
                .filter(|t| **t == AnomalyType::InspectionOverdue)
                .count(),
            2
        );
        for window in feed.windows(2) {
            if window[0].severity == window[1].severity {
                assert!(window[0].detected_at >= window[1].detected_at);
            }
        }
    }

    #[test]
    fn never_inspected_item_is_high() {
        let now = now();
        let mut item = healthy("Acme Rail");
        item.last_inspection_date = None;

        let feed = detect_anomalies(&[item.clone()], now);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, format!("inspection-never-{}", item.id));
        assert_eq!(feed[0].title, "Inspection Required");
        assert_eq!(
            feed[0].description,
            format!("Item {} has never been inspected", item.id)
        );
        assert_eq!(feed[0].severity, Severity::High);
        assert!(feed[0].detected_at <= now);
        assert!(feed[0].detected_at > now - Duration::days(7));
    }

    #[test]
    fn overdue_between_half_year_and_year_is_medium() {
        let mut item = healthy("Acme Rail");
        item.last_inspection_date = Some(now() - Duration::days(200));

        let feed = detect_anomalies(&[item.clone()], now());
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].severity, Severity::Medium);
        assert_eq!(
            feed[0].description,
            format!("Item {} is 200 days overdue for inspection", item.id)
        );
    }

    #[test]
    fn expired_warranty_is_not_reported() {
        let mut item = healthy("Acme Rail");
        item.warranty_expiry_date = now() - Duration::days(3);
        assert!(detect_anomalies(&[item], now()).is_empty());
    }

    #[test]
    fn supply_pattern_needs_five_items_per_vendor() {
        let mut items: Vec<item::Model> = (0..5).map(|_| healthy("Acme Rail")).collect();
        items.extend((0..4).map(|_| healthy("Bharat Fittings")));

        let feed = detect_anomalies(&items, now());
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, "supply-pattern-Acme Rail");
        assert_eq!(feed[0].anomaly_type, AnomalyType::SupplyPattern);
        assert_eq!(
            feed[0].description,
            "Vendor Acme Rail showing increased supply frequency (5 items)"
        );
        assert_eq!(feed[0].item_id, None);
        assert_eq!(feed[0].severity, Severity::Low);
    }

    #[test]
    fn feed_is_truncated_to_ten() {
        let items: Vec<item::Model> = (0..15)
            .map(|_| {
                let mut item = healthy("Acme Rail");
                item.last_inspection_date = None;
                item
            })
            .collect();
        let feed = detect_anomalies(&items, now());
        assert_eq!(feed.len(), MAX_ANOMALIES);
        assert!(feed.iter().all(|a| a.severity == Severity::High));
    }

    #[test]
    fn detected_at_is_deterministic() {
        let now = now();
        let first = detected_at("warranty-abc", AnomalyType::WarrantyExpiring, now);
        let second = detected_at("warranty-abc", AnomalyType::WarrantyExpiring, now);
        assert_eq!(first, second);
        assert!(first <= now && first > now - Duration::hours(24));
    }

    #[test]
    fn serializes_type_field_in_kebab_case() {
        let mut item = healthy("Acme Rail");
        item.warranty_expiry_date = now() + Duration::days(10);
        let feed = detect_anomalies(&[item], now());
        let json = serde_json::to_value(&feed[0]).unwrap();
        assert_eq!(json["type"], "warranty-expiring");
        assert_eq!(json["severity"], "high");
        assert!(json.get("itemId").is_some());
        assert!(json.get("detectedAt").is_some());
    }
}
