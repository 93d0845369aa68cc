pub mod analytics;
pub mod common;
pub mod inspections;
pub mod items;
pub mod qr;
pub mod summary;
pub mod vendors;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::ServiceError;
use crate::repositories::InventoryStore;
use crate::services::{
    analytics::AnalyticsService,
    inspections::InspectionService,
    items::ItemService,
    qr::{DataUriEncoder, QrService},
    summary::SummaryService,
    vendors::VendorService,
};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub items: Arc<ItemService>,
    pub inspections: Arc<InspectionService>,
    pub vendors: Arc<VendorService>,
    pub analytics: Arc<AnalyticsService>,
    pub qr: Arc<QrService>,
    pub summary: Arc<SummaryService>,
}

impl AppServices {
    /// Wires every service over one shared store.
    pub fn new(store: Arc<dyn InventoryStore>, config: &AppConfig) -> Result<Self, ServiceError> {
        let summary = SummaryService::new(
            config.summary_service_url.clone(),
            config.summary_timeout(),
        )?;

        Ok(Self {
            items: Arc::new(ItemService::new(store.clone(), config.max_batch_quantity)),
            inspections: Arc::new(InspectionService::new(store.clone())),
            vendors: Arc::new(VendorService::new(store.clone())),
            analytics: Arc::new(AnalyticsService::new(store.clone())),
            qr: Arc::new(QrService::new(store, Arc::new(DataUriEncoder))),
            summary: Arc::new(summary),
        })
    }
}
