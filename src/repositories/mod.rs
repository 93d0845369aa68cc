use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::Json;
use uuid::Uuid;

use crate::analytics::{KpiStats, WarrantyPeriod};
use crate::entities::item::{ConditionStatus, ItemType};
use crate::entities::{inspection, item, vendor};
use crate::errors::ServiceError;

pub mod sea_orm_store;

pub use sea_orm_store::SeaOrmStore;

/// A batch of identical items to create in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItemBatch {
    pub item_type: ItemType,
    pub vendor_name: String,
    pub supply_date: DateTime<Utc>,
    pub warranty_period: WarrantyPeriod,
    pub quantity: u32,
}

/// Partial update of an item. `None` leaves a field untouched; for nullable
/// columns `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemChanges {
    pub item_type: Option<ItemType>,
    pub vendor_name: Option<String>,
    pub supply_date: Option<DateTime<Utc>>,
    pub warranty_period: Option<WarrantyPeriod>,
    pub last_inspection_date: Option<Option<DateTime<Utc>>>,
    pub condition_status: Option<ConditionStatus>,
    pub inspection_notes: Option<Option<String>>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVendor {
    pub name: String,
    pub contact_info: Option<Json>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInspection {
    pub item_id: Uuid,
    pub inspection_date: DateTime<Utc>,
    pub inspector_name: Option<String>,
    pub condition: ConditionStatus,
    pub notes: Option<String>,
}

/// Persistence boundary for items, vendors and inspections.
///
/// Soft-deleted items are invisible through every method: they are not
/// listed, not returned by id, cannot be updated or inspected, and are not
/// counted by `get_stats`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn get_items(&self) -> Result<Vec<item::Model>, ServiceError>;

    async fn get_item(&self, id: Uuid) -> Result<Option<item::Model>, ServiceError>;

    /// Creates `batch.quantity` rows and get-or-creates the vendor, all or nothing.
    async fn create_items(&self, batch: NewItemBatch) -> Result<Vec<item::Model>, ServiceError>;

    /// Returns `None` when the item does not exist.
    async fn update_item(
        &self,
        id: Uuid,
        changes: ItemChanges,
    ) -> Result<Option<item::Model>, ServiceError>;

    /// Soft delete. Returns `false` when there was nothing to delete.
    async fn delete_item(&self, id: Uuid) -> Result<bool, ServiceError>;

    async fn get_vendors(&self) -> Result<Vec<vendor::Model>, ServiceError>;

    async fn get_vendor(&self, id: Uuid) -> Result<Option<vendor::Model>, ServiceError>;

    async fn get_vendor_by_name(&self, name: &str) -> Result<Option<vendor::Model>, ServiceError>;

    /// Fails with `Conflict` when the name is taken.
    async fn create_vendor(&self, vendor: NewVendor) -> Result<vendor::Model, ServiceError>;

    /// Records the inspection and moves the item's `last_inspection_date`
    /// in the same transaction. Fails with `NotFound` for unknown items.
    async fn create_inspection(
        &self,
        inspection: NewInspection,
    ) -> Result<inspection::Model, ServiceError>;

    /// Newest first.
    async fn get_inspections_for_item(
        &self,
        item_id: Uuid,
    ) -> Result<Vec<inspection::Model>, ServiceError>;

    async fn get_stats(&self, now: DateTime<Utc>) -> Result<KpiStats, ServiceError>;
}
