use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::item;

pub const STATS_EXPIRING_WINDOW_DAYS: i64 = 90;
pub const STATS_INSPECTION_WINDOW_MONTHS: u32 = 6;

/// Dashboard KPI counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiStats {
    pub total_items: u64,
    pub warranty_expiring: u64,
    pub inspections_overdue: u64,
    pub active_vendors: u64,
}

/// Upper bound of the "expiring" window: `(now, now + 90 days]`.
pub fn expiring_window_end(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(STATS_EXPIRING_WINDOW_DAYS)
}

/// Items last inspected before this instant count as overdue.
///
/// Six calendar months, which is not the same as the 180-day threshold used
/// by `inspection_status`.
pub fn inspection_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(STATS_INSPECTION_WINDOW_MONTHS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn is_warranty_expiring(item: &item::Model, now: DateTime<Utc>) -> bool {
    item.warranty_expiry_date > now && item.warranty_expiry_date <= expiring_window_end(now)
}

pub fn is_inspection_overdue(item: &item::Model, now: DateTime<Utc>) -> bool {
    match item.last_inspection_date {
        None => true,
        Some(last) => last < inspection_cutoff(now),
    }
}

/// In-memory reference for `InventoryStore::get_stats`. The SeaORM store runs
/// the same predicates as COUNT queries and is checked against this in its tests.
pub fn compute_stats(items: &[item::Model], vendor_count: u64, now: DateTime<Utc>) -> KpiStats {
    let live = items.iter().filter(|i| i.deleted_at.is_none());

    let mut stats = KpiStats {
        active_vendors: vendor_count,
        ..KpiStats::default()
    };
    for item in live {
        stats.total_items += 1;
        if is_warranty_expiring(item, now) {
            stats.warranty_expiring += 1;
        }
        if is_inspection_overdue(item, now) {
            stats.inspections_overdue += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::item_fixture;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 31, 9, 0, 0).unwrap()
    }

    #[test]
    fn empty_inventory_reports_only_vendors() {
        let stats = compute_stats(&[], 3, now());
        assert_eq!(
            stats,
            KpiStats {
                total_items: 0,
                warranty_expiring: 0,
                inspections_overdue: 0,
                active_vendors: 3,
            }
        );
    }

    #[test]
    fn counts_follow_window_predicates() {
        let now = now();
        let mut expiring = item_fixture("Acme Rail");
        expiring.warranty_expiry_date = now + Duration::days(45);
        expiring.last_inspection_date = Some(now - Duration::days(10));

        let mut already_expired = item_fixture("Acme Rail");
        already_expired.warranty_expiry_date = now - Duration::days(1);
        already_expired.last_inspection_date = Some(now - Duration::days(10));

        let mut never_inspected = item_fixture("Bharat Fittings");
        never_inspected.warranty_expiry_date = now + Duration::days(400);

        let mut deleted = item_fixture("Bharat Fittings");
        deleted.deleted_at = Some(now);

        let stats = compute_stats(&[expiring, already_expired, never_inspected, deleted], 2, now);
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.warranty_expiring, 1);
        assert_eq!(stats.inspections_overdue, 1);
        assert_eq!(stats.active_vendors, 2);
    }

    #[test]
    fn expiry_exactly_at_window_end_counts() {
        let now = now();
        let mut item = item_fixture("Acme Rail");
        item.warranty_expiry_date = expiring_window_end(now);
        assert!(is_warranty_expiring(&item, now));

        item.warranty_expiry_date = now;
        assert!(!is_warranty_expiring(&item, now));
    }

    #[test]
    fn overdue_uses_calendar_months() {
        // 2024-08-31 minus six months clamps to 2024-02-29.
        let now = now();
        assert_eq!(
            inspection_cutoff(now),
            Utc.with_ymd_and_hms(2024, 2, 29, 9, 0, 0).unwrap()
        );

        let mut item = item_fixture("Acme Rail");
        item.last_inspection_date = Some(Utc.with_ymd_and_hms(2024, 2, 29, 10, 0, 0).unwrap());
        assert!(!is_inspection_overdue(&item, now));

        item.last_inspection_date = Some(Utc.with_ymd_and_hms(2024, 2, 28, 9, 0, 0).unwrap());
        assert!(is_inspection_overdue(&item, now));
    }
}
