use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::{de_opt_timestamp, de_timestamp};
use crate::entities::item::ConditionStatus;
use crate::errors::ServiceError;

pub const LOCAL_SUMMARY_SOURCE: &str = "local_analysis";

const DAY_MS: i64 = 86_400_000;
const MONTH_MS: i64 = 30 * DAY_MS;

/// Input for an item summary. Forwarded verbatim to the external service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[validate(length(min = 1, message = "Item ID is required"))]
    pub item_id: String,
    #[validate(length(min = 1, message = "Item type is required"))]
    pub item_type: String,
    #[validate(length(min = 1, message = "Vendor is required"))]
    pub vendor: String,
    #[serde(deserialize_with = "de_timestamp")]
    #[schema(value_type = String, example = "2023-04-01")]
    pub supply_date: DateTime<Utc>,
    #[validate(range(min = 0, max = 1200))]
    pub warranty_period: i64,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    #[schema(value_type = Option<String>)]
    pub last_inspection: Option<DateTime<Utc>>,
    #[serde(default)]
    pub condition: Option<ConditionStatus>,
}

impl SummaryRequest {
    pub fn validated(self) -> Result<Self, ServiceError> {
        self.validate()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

fn condition_sentence(condition: ConditionStatus) -> &'static str {
    match condition {
        ConditionStatus::Excellent => "The current condition is excellent. ",
        ConditionStatus::Good => "The current condition is good. ",
        ConditionStatus::Fair => "The condition is fair, consider monitoring. ",
        ConditionStatus::Poor => "The condition is poor, immediate attention required. ",
    }
}

fn inspection_sentence(days_ago: Option<i64>) -> String {
    match days_ago {
        None => "No inspection record found. ".to_string(),
        Some(d) if d < 30 => format!(
            "Recent inspection ({} days ago) indicates proactive maintenance. ",
            d
        ),
        Some(d) if d < 90 => format!(
            "Last inspection was {} days ago, within acceptable intervals. ",
            d
        ),
        Some(d) => format!(
            "Last inspection was {} days ago, schedule new inspection soon. ",
            d
        ),
    }
}

/// Rule-based summary used whenever the external service cannot answer.
pub fn local_summary(request: &SummaryRequest, now: DateTime<Utc>) -> SummaryResponse {
    let supply_age_months = now
        .signed_duration_since(request.supply_date)
        .num_milliseconds()
        .div_euclid(MONTH_MS);
    let warranty_remaining = request.warranty_period.saturating_sub(supply_age_months);
    let inspection_age_days = request.last_inspection.map(|last| {
        now.signed_duration_since(last)
            .num_milliseconds()
            .div_euclid(DAY_MS)
    });

    let mut summary = format!("Item Analysis Report for {}:\n\n", request.item_id);
    summary.push_str(&format!(
        "This {} was supplied by {} approximately {} months ago. ",
        request.item_type.replacen('-', " ", 1),
        request.vendor,
        supply_age_months
    ));
    if warranty_remaining > 0 {
        summary.push_str(&format!(
            "The item is currently under warranty with {} months remaining. ",
            warranty_remaining
        ));
    } else {
        summary.push_str(&format!(
            "The warranty period has expired {} months ago. ",
            warranty_remaining.unsigned_abs()
        ));
    }
    if let Some(condition) = request.condition {
        summary.push_str(condition_sentence(condition));
    }
    summary.push_str(&inspection_sentence(inspection_age_days));

    SummaryResponse {
        summary,
        source: Some(LOCAL_SUMMARY_SOURCE.to_string()),
        generated_at: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    }
}
