use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbBackend, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, MutexGuard};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{InventoryStore, ItemChanges, NewInspection, NewItemBatch, NewVendor};
use crate::analytics::stats::{expiring_window_end, inspection_cutoff};
use crate::analytics::{compute_expiry, KpiStats};
use crate::entities::item::{self, ConditionStatus, Entity as Item};
use crate::entities::inspection::{self, Entity as Inspection};
use crate::entities::vendor::{self, Entity as Vendor};
use crate::errors::ServiceError;

/// `InventoryStore` backed by a SeaORM connection pool.
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: Arc<DatabaseConnection>,
    /// Serializes write transactions on SQLite, which admits a single writer.
    write_lock: Option<Arc<AsyncMutex<()>>>,
}

impl SeaOrmStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let write_lock = (db.get_database_backend() == DbBackend::Sqlite)
            .then(|| Arc::new(AsyncMutex::new(())));
        Self { db, write_lock }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn write_guard(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.write_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

async fn find_live_item<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<item::Model>, DbErr> {
    Item::find_by_id(id)
        .filter(item::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

async fn find_vendor_by_name<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Option<vendor::Model>, DbErr> {
    Vendor::find()
        .filter(vendor::Column::Name.eq(name))
        .one(conn)
        .await
}

fn vendor_row(new_vendor: NewVendor) -> vendor::ActiveModel {
    vendor::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(new_vendor.name),
        contact_info: Set(new_vendor.contact_info),
        created_at: Set(Utc::now()),
    }
}

/// `INSERT .. ON CONFLICT (name) DO NOTHING`; returns the number of rows written.
async fn insert_vendor_if_absent<C: ConnectionTrait>(conn: &C, name: &str) -> Result<u64, DbErr> {
    Vendor::insert(vendor_row(NewVendor {
        name: name.to_string(),
        contact_info: None,
    }))
    .on_conflict(
        OnConflict::column(vendor::Column::Name)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await
}

/// Returns the vendor with `name`, creating it on first use. A row inserted
/// concurrently under the same name is selected instead of conflicting.
async fn ensure_vendor<C: ConnectionTrait>(conn: &C, name: &str) -> Result<vendor::Model, DbErr> {
    if let Some(existing) = find_vendor_by_name(conn, name).await? {
        return Ok(existing);
    }
    debug!(vendor = %name, "creating vendor on first use");
    if insert_vendor_if_absent(conn, name).await? == 0 {
        debug!(vendor = %name, "vendor registered by a concurrent writer");
    }
    find_vendor_by_name(conn, name)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("vendor {}", name)))
}

#[async_trait]
impl InventoryStore for SeaOrmStore {
    #[instrument(skip(self))]
    async fn get_items(&self) -> Result<Vec<item::Model>, ServiceError> {
        let items = Item::find()
            .filter(item::Column::DeletedAt.is_null())
            .order_by_desc(item::Column::CreatedAt)
            .order_by_asc(item::Column::Id)
            .all(self.db())
            .await?;
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn get_item(&self, id: Uuid) -> Result<Option<item::Model>, ServiceError> {
        Ok(find_live_item(self.db(), id).await?)
    }

    #[instrument(skip(self), fields(quantity = batch.quantity, vendor = %batch.vendor_name))]
    async fn create_items(&self, batch: NewItemBatch) -> Result<Vec<item::Model>, ServiceError> {
        let _write = self.write_guard().await;
        let txn = self.db().begin().await?;

        ensure_vendor(&txn, &batch.vendor_name).await?;

        let expiry = compute_expiry(batch.supply_date, batch.warranty_period);
        let now = Utc::now();
        let mut created = Vec::with_capacity(batch.quantity as usize);
        for _ in 0..batch.quantity {
            let id = Uuid::new_v4();
            let model = item::ActiveModel {
                id: Set(id),
                item_type: Set(batch.item_type),
                vendor_name: Set(batch.vendor_name.clone()),
                supply_date: Set(batch.supply_date),
                warranty_period: Set(batch.warranty_period.months() as i32),
                warranty_expiry_date: Set(expiry),
                last_inspection_date: Set(None),
                condition_status: Set(ConditionStatus::default()),
                inspection_notes: Set(None),
                qr_code_url: Set(Some(item::qr_code_path(id))),
                created_at: Set(now),
                updated_at: Set(now),
                deleted_at: Set(None),
            }
            .insert(&txn)
            .await?;
            created.push(model);
        }

        txn.commit().await?;
        info!(count = created.len(), "item batch created");
        Ok(created)
    }

    #[instrument(skip(self, changes))]
    async fn update_item(
        &self,
        id: Uuid,
        changes: ItemChanges,
    ) -> Result<Option<item::Model>, ServiceError> {
        let _write = self.write_guard().await;
        let txn = self.db().begin().await?;

        let Some(existing) = find_live_item(&txn, id).await? else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(existing));
        }

        let mut active: item::ActiveModel = existing.into();
        if let Some(item_type) = changes.item_type {
            active.item_type = Set(item_type);
        }
        if let Some(vendor_name) = changes.vendor_name {
            ensure_vendor(&txn, &vendor_name).await?;
            active.vendor_name = Set(vendor_name);
        }
        if let Some(supply_date) = changes.supply_date {
            active.supply_date = Set(supply_date);
        }
        if let Some(period) = changes.warranty_period {
            active.warranty_period = Set(period.months() as i32);
        }
        if let Some(last) = changes.last_inspection_date {
            active.last_inspection_date = Set(last);
        }
        if let Some(condition) = changes.condition_status {
            active.condition_status = Set(condition);
        }
        if let Some(notes) = changes.inspection_notes {
            active.inspection_notes = Set(notes);
        }

        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(Some(updated))
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, id: Uuid) -> Result<bool, ServiceError> {
        let _write = self.write_guard().await;
        let Some(existing) = find_live_item(self.db(), id).await? else {
            return Ok(false);
        };
        let mut active: item::ActiveModel = existing.into();
        active.deleted_at = Set(Some(Utc::now()));
        active.update(self.db()).await?;
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn get_vendors(&self) -> Result<Vec<vendor::Model>, ServiceError> {
        let vendors = Vendor::find()
            .order_by_asc(vendor::Column::Name)
            .all(self.db())
            .await?;
        Ok(vendors)
    }

    #[instrument(skip(self))]
    async fn get_vendor(&self, id: Uuid) -> Result<Option<vendor::Model>, ServiceError> {
        Ok(Vendor::find_by_id(id).one(self.db()).await?)
    }

    #[instrument(skip(self))]
    async fn get_vendor_by_name(&self, name: &str) -> Result<Option<vendor::Model>, ServiceError> {
        Ok(find_vendor_by_name(self.db(), name).await?)
    }

    #[instrument(skip(self, new_vendor), fields(name = %new_vendor.name))]
    async fn create_vendor(&self, new_vendor: NewVendor) -> Result<vendor::Model, ServiceError> {
        let _write = self.write_guard().await;
        let name = new_vendor.name.clone();
        vendor_row(new_vendor)
            .insert(self.db())
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    ServiceError::Conflict(format!("Vendor {} already exists", name))
                } else {
                    ServiceError::DatabaseError(err)
                }
            })
    }

    #[instrument(skip(self, new_inspection), fields(item_id = %new_inspection.item_id))]
    async fn create_inspection(
        &self,
        new_inspection: NewInspection,
    ) -> Result<inspection::Model, ServiceError> {
        let _write = self.write_guard().await;
        let txn = self.db().begin().await?;

        let item = find_live_item(&txn, new_inspection.item_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Item {} not found", new_inspection.item_id))
            })?;

        let created = inspection::ActiveModel {
            id: Set(Uuid::new_v4()),
            item_id: Set(new_inspection.item_id),
            inspection_date: Set(new_inspection.inspection_date),
            inspector_name: Set(new_inspection.inspector_name),
            condition: Set(new_inspection.condition),
            notes: Set(new_inspection.notes),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        let mut active: item::ActiveModel = item.into();
        active.last_inspection_date = Set(Some(new_inspection.inspection_date));
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn get_inspections_for_item(
        &self,
        item_id: Uuid,
    ) -> Result<Vec<inspection::Model>, ServiceError> {
        let inspections = Inspection::find()
            .filter(inspection::Column::ItemId.eq(item_id))
            .order_by_desc(inspection::Column::InspectionDate)
            .all(self.db())
            .await?;
        Ok(inspections)
    }

    #[instrument(skip(self))]
    async fn get_stats(&self, now: DateTime<Utc>) -> Result<KpiStats, ServiceError> {
        let live = || Item::find().filter(item::Column::DeletedAt.is_null());

        let total_items = live().count(self.db()).await?;
        let warranty_expiring = live()
            .filter(item::Column::WarrantyExpiryDate.gt(now))
            .filter(item::Column::WarrantyExpiryDate.lte(expiring_window_end(now)))
            .count(self.db())
            .await?;
        let inspections_overdue = live()
            .filter(
                Condition::any()
                    .add(item::Column::LastInspectionDate.is_null())
                    .add(item::Column::LastInspectionDate.lt(inspection_cutoff(now))),
            )
            .count(self.db())
            .await?;
        let active_vendors = Vendor::find().count(self.db()).await?;

        Ok(KpiStats {
            total_items,
            warranty_expiring,
            inspections_overdue,
            active_vendors,
        })
    }
}
