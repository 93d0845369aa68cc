use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::analytics::{inspection_status, warranty_status, InspectionStatus, WarrantyStatus};
use crate::entities::item::{self, ConditionStatus, ItemType};
use crate::errors::ServiceError;
use crate::repositories::{InventoryStore, ItemChanges, NewItemBatch};

/// Optional list filters; every present filter must match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ItemFilter {
    pub item_type: Option<ItemType>,
    pub condition: Option<ConditionStatus>,
    pub warranty_status: Option<WarrantyStatus>,
    pub inspection_status: Option<InspectionStatus>,
    /// Exact vendor name.
    pub vendor: Option<String>,
    /// Case-insensitive match on id, item type or vendor name.
    pub search: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, item: &item::Model, now: DateTime<Utc>) -> bool {
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let hit = item.id.to_string().contains(&needle)
                || item.item_type.to_string().contains(&needle)
                || item.vendor_name.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if self.item_type.is_some_and(|t| t != item.item_type) {
            return false;
        }
        if self.condition.is_some_and(|c| c != item.condition_status) {
            return false;
        }
        if self
            .warranty_status
            .is_some_and(|s| s != warranty_status(item.warranty_expiry_date, now))
        {
            return false;
        }
        if self
            .inspection_status
            .is_some_and(|s| s != inspection_status(item.last_inspection_date, now))
        {
            return false;
        }
        if self
            .vendor
            .as_deref()
            .is_some_and(|v| v != item.vendor_name)
        {
            return false;
        }
        true
    }
}

/// Item lifecycle: batch intake, reads, partial updates and soft deletion.
#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn InventoryStore>,
    max_batch_quantity: u32,
}

impl ItemService {
    pub fn new(store: Arc<dyn InventoryStore>, max_batch_quantity: u32) -> Self {
        Self {
            store,
            max_batch_quantity,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        filter: &ItemFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<item::Model>, ServiceError> {
        let items = self.store.get_items().await?;
        Ok(items
            .into_iter()
            .filter(|item| filter.matches(item, now))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: Uuid) -> Result<item::Model, ServiceError> {
        self.store
            .get_item(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))
    }

    #[instrument(skip(self, batch), fields(quantity = batch.quantity))]
    pub async fn create_batch(&self, batch: NewItemBatch) -> Result<Vec<item::Model>, ServiceError> {
        if batch.quantity == 0 || batch.quantity > self.max_batch_quantity {
            return Err(ServiceError::ValidationError(format!(
                "quantity must be between 1 and {}",
                self.max_batch_quantity
            )));
        }
        if batch.vendor_name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "vendorName is required".to_string(),
            ));
        }

        let requested = batch.quantity as usize;
        let items = self.store.create_items(batch).await?;
        if items.len() != requested {
            return Err(ServiceError::InternalError(format!(
                "batch created {} of {} items",
                items.len(),
                requested
            )));
        }
        info!(count = items.len(), "items created");
        Ok(items)
    }

    #[instrument(skip(self, changes))]
    pub async fn update_item(
        &self,
        id: Uuid,
        changes: ItemChanges,
    ) -> Result<item::Model, ServiceError> {
        if changes
            .vendor_name
            .as_deref()
            .is_some_and(|v| v.trim().is_empty())
        {
            return Err(ServiceError::ValidationError(
                "vendorName must not be empty".to_string(),
            ));
        }
        self.store
            .update_item(id, changes)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.store.delete_item(id).await? {
            info!(item_id = %id, "item soft-deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!("Item {} not found", id)))
        }
    }
}
