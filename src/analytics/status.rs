use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const DAY_MS: i64 = 86_400_000;

pub const EXPIRING_SOON_DAYS: i64 = 90;
pub const INSPECTION_DUE_SOON_DAYS: i64 = 90;
pub const INSPECTION_OVERDUE_DAYS: i64 = 180;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum WarrantyStatus {
    Expired,
    ExpiringSoon,
    Valid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum InspectionStatus {
    Never,
    Overdue,
    DueSoon,
    Current,
}

/// Anomaly severity. Ordering follows urgency: `Low < Medium < High`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Whole days from `from` to `to`, rounded up.
pub fn ceil_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let ms = to.signed_duration_since(from).num_milliseconds();
    let days = ms / DAY_MS;
    if ms % DAY_MS > 0 {
        days + 1
    } else {
        days
    }
}

pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    ceil_days_between(now, target)
}

pub fn days_since(past: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    ceil_days_between(past, now)
}

pub fn warranty_status(expiry: DateTime<Utc>, now: DateTime<Utc>) -> WarrantyStatus {
    if expiry < now {
        WarrantyStatus::Expired
    } else if days_until(expiry, now) <= EXPIRING_SOON_DAYS {
        WarrantyStatus::ExpiringSoon
    } else {
        WarrantyStatus::Valid
    }
}

pub fn inspection_status(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> InspectionStatus {
    let Some(last) = last else {
        return InspectionStatus::Never;
    };
    let since = days_since(last, now);
    if since > INSPECTION_OVERDUE_DAYS {
        InspectionStatus::Overdue
    } else if since > INSPECTION_DUE_SOON_DAYS {
        InspectionStatus::DueSoon
    } else {
        InspectionStatus::Current
    }
}

/// Severity of an approaching warranty expiry, finer than the
/// 90-day `expiring-soon` bucket.
pub fn severity_for_days_until_expiry(days: i64) -> Severity {
    if days <= 30 {
        Severity::High
    } else if days <= 60 {
        Severity::Medium
    } else {
        Severity::Low
    }
}
