use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::analytics::{
    detect_anomalies, type_distribution, vendor_performance, Anomaly, KpiStats, TypeShare,
    VendorVolume,
};
use crate::errors::ServiceError;
use crate::repositories::InventoryStore;

/// Derived views over the live inventory.
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn InventoryStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn stats(&self, now: DateTime<Utc>) -> Result<KpiStats, ServiceError> {
        self.store.get_stats(now).await
    }

    #[instrument(skip(self))]
    pub async fn anomalies(&self, now: DateTime<Utc>) -> Result<Vec<Anomaly>, ServiceError> {
        let items = self.store.get_items().await?;
        let anomalies = detect_anomalies(&items, now);
        debug!(scanned = items.len(), reported = anomalies.len(), "anomaly scan");
        Ok(anomalies)
    }

    #[instrument(skip(self))]
    pub async fn distribution(&self) -> Result<Vec<TypeShare>, ServiceError> {
        let items = self.store.get_items().await?;
        Ok(type_distribution(&items))
    }

    #[instrument(skip(self))]
    pub async fn vendor_performance(&self) -> Result<Vec<VendorVolume>, ServiceError> {
        let items = self.store.get_items().await?;
        Ok(vendor_performance(&items))
    }
}
