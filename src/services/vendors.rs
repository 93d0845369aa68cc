use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::entities::vendor;
use crate::errors::ServiceError;
use crate::repositories::InventoryStore;

#[derive(Clone)]
pub struct VendorService {
    store: Arc<dyn InventoryStore>,
}

impl VendorService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list_vendors(&self) -> Result<Vec<vendor::Model>, ServiceError> {
        self.store.get_vendors().await
    }

    #[instrument(skip(self))]
    pub async fn get_vendor(&self, id: Uuid) -> Result<vendor::Model, ServiceError> {
        self.store
            .get_vendor(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Vendor {} not found", id)))
    }
}
