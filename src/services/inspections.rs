use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::inspection;
use crate::errors::ServiceError;
use crate::repositories::{InventoryStore, NewInspection};

#[derive(Clone)]
pub struct InspectionService {
    store: Arc<dyn InventoryStore>,
}

impl InspectionService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Records an inspection; the item's last inspection date follows it.
    #[instrument(skip(self, new_inspection), fields(item_id = %new_inspection.item_id))]
    pub async fn record_inspection(
        &self,
        new_inspection: NewInspection,
    ) -> Result<inspection::Model, ServiceError> {
        let created = self.store.create_inspection(new_inspection).await?;
        info!(inspection_id = %created.id, "inspection recorded");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn inspections_for_item(
        &self,
        item_id: Uuid,
    ) -> Result<Vec<inspection::Model>, ServiceError> {
        if self.store.get_item(item_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("Item {} not found", item_id)));
        }
        self.store.get_inspections_for_item(item_id).await
    }
}
