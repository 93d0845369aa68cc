//! Pure derived-data computations over item records.
//!
//! Every function here takes the reference instant `now` explicitly and
//! performs no I/O, so the HTTP layer, the storage layer and the tests all
//! agree on the same classification for the same inputs.

pub mod anomalies;
pub mod distribution;
pub mod stats;
pub mod status;
pub mod summary;
pub mod warranty;

pub use anomalies::{detect_anomalies, Anomaly, AnomalyType, MAX_ANOMALIES};
pub use distribution::{type_distribution, vendor_performance, TypeShare, VendorVolume};
pub use stats::{compute_stats, KpiStats};
pub use status::{
    inspection_status, severity_for_days_until_expiry, warranty_status, InspectionStatus,
    Severity, WarrantyStatus,
};
pub use summary::{local_summary, SummaryRequest, SummaryResponse, LOCAL_SUMMARY_SOURCE};
pub use warranty::{compute_expiry, WarrantyPeriod};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::entities::item::{self, ConditionStatus, ItemType};

    /// A live concrete sleeper supplied 2024-01-01 with a 24 month warranty.
    pub fn item_fixture(vendor: &str) -> item::Model {
        let supply = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let id = Uuid::new_v4();
        item::Model {
            id,
            item_type: ItemType::ConcreteSleeper,
            vendor_name: vendor.to_string(),
            supply_date: supply,
            warranty_period: 24,
            warranty_expiry_date: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            last_inspection_date: None,
            condition_status: ConditionStatus::Good,
            inspection_notes: None,
            qr_code_url: Some(item::qr_code_path(id)),
            created_at: supply,
            updated_at: supply,
            deleted_at: None,
        }
    }
}
