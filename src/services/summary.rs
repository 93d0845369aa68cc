use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::analytics::{local_summary, SummaryRequest, SummaryResponse};
use crate::errors::ServiceError;

/// Item summaries from the external AI endpoint, with the local rule-based
/// generator as the fallback for every failure mode.
#[derive(Clone)]
pub struct SummaryService {
    client: reqwest::Client,
    endpoint: Option<String>,
    timeout: Duration,
}

impl SummaryService {
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::InternalError(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// Summary that only ever uses the local generator.
    pub fn local_only() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: None,
            timeout: Duration::from_secs(5),
        }
    }

    /// Never fails: one bounded attempt at the external service, then the local summary.
    #[instrument(skip(self, request), fields(item_id = %request.item_id))]
    pub async fn generate(&self, request: &SummaryRequest, now: DateTime<Utc>) -> SummaryResponse {
        if let Some(endpoint) = self.endpoint.as_deref() {
            match tokio::time::timeout(self.timeout, self.call_external(endpoint, request)).await {
                Ok(Ok(response)) => {
                    debug!("summary served by external service");
                    return response;
                }
                Ok(Err(err)) => {
                    warn!(error = %err, "summary service unavailable, using local fallback");
                }
                Err(_) => {
                    warn!(
                        timeout_ms = self.timeout.as_millis() as u64,
                        "summary service timed out, using local fallback"
                    );
                }
            }
        }
        local_summary(request, now)
    }

    async fn call_external(
        &self,
        endpoint: &str,
        request: &SummaryRequest,
    ) -> Result<SummaryResponse, ServiceError> {
        let response = self
            .client
            .post(endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::ExternalServiceError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServiceError::ExternalServiceError(format!(
                "summary service returned {}",
                response.status()
            )));
        }

        response
            .json::<SummaryResponse>()
            .await
            .map_err(|e| ServiceError::ExternalServiceError(format!("malformed summary: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::LOCAL_SUMMARY_SOURCE;
    use chrono::TimeZone;

    #[tokio::test]
    async fn without_endpoint_uses_local_generator() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let request = SummaryRequest {
            item_id: "ITM-9".into(),
            item_type: "rail-pad".into(),
            vendor: "Acme Rail".into(),
            supply_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            warranty_period: 12,
            last_inspection: None,
            condition: None,
        };

        let response = SummaryService::local_only().generate(&request, now).await;
        assert_eq!(response.source.as_deref(), Some(LOCAL_SUMMARY_SOURCE));
        assert!(response.summary.starts_with("Item Analysis Report for ITM-9:"));
    }
}
