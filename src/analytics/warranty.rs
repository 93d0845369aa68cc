use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub const MIN_WARRANTY_MONTHS: u32 = 12;
pub const MAX_WARRANTY_MONTHS: u32 = 48;

/// Warranty length in whole months, always within 12..=48.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct WarrantyPeriod(u32);

impl WarrantyPeriod {
    pub fn new(months: i64) -> Result<Self, ServiceError> {
        if (MIN_WARRANTY_MONTHS as i64..=MAX_WARRANTY_MONTHS as i64).contains(&months) {
            Ok(Self(months as u32))
        } else {
            Err(ServiceError::ValidationError(format!(
                "warrantyPeriod must be between {} and {} months, got {}",
                MIN_WARRANTY_MONTHS, MAX_WARRANTY_MONTHS, months
            )))
        }
    }

    pub fn months(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for WarrantyPeriod {
    type Error = ServiceError;

    fn try_from(months: i64) -> Result<Self, Self::Error> {
        Self::new(months)
    }
}

impl From<WarrantyPeriod> for u32 {
    fn from(period: WarrantyPeriod) -> Self {
        period.0
    }
}

/// Adds the warranty period to the supply date in calendar months.
///
/// The day of month is kept when the target month has it and clamped to the
/// last day otherwise (2024-01-31 + 1 month is 2024-02-29). Results past the
/// representable range saturate to `DateTime::<Utc>::MAX_UTC`.
pub fn compute_expiry(supply_date: DateTime<Utc>, period: WarrantyPeriod) -> DateTime<Utc> {
    supply_date
        .checked_add_months(Months::new(period.months()))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn twelve_months_lands_on_same_day_next_year() {
        let expiry = compute_expiry(at(2024, 1, 15), WarrantyPeriod::new(12).unwrap());
        assert_eq!(expiry, at(2025, 1, 15));
    }

    #[test]
    fn end_of_month_is_clamped() {
        let expiry = compute_expiry(at(2023, 10, 31), WarrantyPeriod::new(16).unwrap());
        assert_eq!(expiry, at(2025, 2, 28));

        let leap = compute_expiry(at(2024, 2, 29), WarrantyPeriod::new(12).unwrap());
        assert_eq!(leap, at(2025, 2, 28));
    }

    #[test]
    fn time_of_day_is_preserved() {
        let supply = Utc.with_ymd_and_hms(2024, 3, 10, 14, 30, 5).unwrap();
        let expiry = compute_expiry(supply, WarrantyPeriod::new(24).unwrap());
        assert_eq!(expiry, Utc.with_ymd_and_hms(2026, 3, 10, 14, 30, 5).unwrap());
    }

    #[test]
    fn period_bounds_are_enforced() {
        assert!(WarrantyPeriod::new(11).is_err());
        assert!(WarrantyPeriod::new(49).is_err());
        assert!(WarrantyPeriod::new(-12).is_err());
        assert_eq!(WarrantyPeriod::new(12).unwrap().months(), 12);
        assert_eq!(WarrantyPeriod::new(48).unwrap().months(), 48);
    }

    #[test]
    fn deserializing_rejects_out_of_range() {
        let ok: WarrantyPeriod = serde_json::from_str("36").unwrap();
        assert_eq!(ok.months(), 36);
        assert!(serde_json::from_str::<WarrantyPeriod>("60").is_err());
    }
}
