use crate::{
    analytics::{inspection_status, warranty_status, InspectionStatus, WarrantyPeriod, WarrantyStatus},
    common::{de_double_option, de_opt_opt_timestamp, de_timestamp},
    entities::item::{self, ConditionStatus, ItemType},
    errors::ServiceError,
    handlers::common::{created, path_id},
    repositories::{ItemChanges, NewItemBatch},
    services::items::ItemFilter,
    ApiResponse, ApiResult, AppState, CreatedResult,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "4f6c2a1e-8b7d-4c3a-9e21-0d5f7a9b1c23",
    "itemType": "concrete-sleeper",
    "vendorName": "Acme Rail",
    "supplyDate": "2024-01-15T00:00:00Z",
    "warrantyPeriod": 24,
    "warrantyExpiryDate": "2026-01-15T00:00:00Z",
    "lastInspectionDate": null,
    "conditionStatus": "good",
    "inspectionNotes": null,
    "qrCodeUrl": "/api/qr/4f6c2a1e-8b7d-4c3a-9e21-0d5f7a9b1c23",
    "createdAt": "2024-01-15T10:30:00Z",
    "updatedAt": "2024-01-15T10:30:00Z",
    "warrantyStatus": "valid",
    "inspectionStatus": "never"
}))]
pub struct ItemResponse {
    pub id: Uuid,
    pub item_type: ItemType,
    pub vendor_name: String,
    pub supply_date: DateTime<Utc>,
    /// Warranty length in months
    pub warranty_period: i32,
    pub warranty_expiry_date: DateTime<Utc>,
    pub last_inspection_date: Option<DateTime<Utc>>,
    pub condition_status: ConditionStatus,
    pub inspection_notes: Option<String>,
    pub qr_code_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Derived at read time
    pub warranty_status: WarrantyStatus,
    /// Derived at read time
    pub inspection_status: InspectionStatus,
}

impl ItemResponse {
    pub fn from_model(model: item::Model, now: DateTime<Utc>) -> Self {
        Self {
            warranty_status: warranty_status(model.warranty_expiry_date, now),
            inspection_status: inspection_status(model.last_inspection_date, now),
            id: model.id,
            item_type: model.item_type,
            vendor_name: model.vendor_name,
            supply_date: model.supply_date,
            warranty_period: model.warranty_period,
            warranty_expiry_date: model.warranty_expiry_date,
            last_inspection_date: model.last_inspection_date,
            condition_status: model.condition_status,
            inspection_notes: model.inspection_notes,
            qr_code_url: model.qr_code_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "itemType": "elastic-rail-clip",
    "vendorName": "Acme Rail",
    "supplyDate": "2024-01-15",
    "warrantyPeriod": 24,
    "quantity": 50
}))]
pub struct CreateItemsRequest {
    pub item_type: ItemType,
    #[validate(length(min = 1, max = 255, message = "Vendor name is required"))]
    pub vendor_name: String,
    /// `YYYY-MM-DD` or RFC 3339
    #[serde(deserialize_with = "de_timestamp")]
    #[schema(value_type = String, example = "2024-01-15")]
    pub supply_date: DateTime<Utc>,
    /// Months, 12 to 48
    #[validate(range(min = 12, max = 48))]
    pub warranty_period: i64,
    /// Upper bound is `max_batch_quantity`
    #[validate(range(min = 1))]
    pub quantity: u32,
}

impl CreateItemsRequest {
    pub fn into_batch(self) -> Result<NewItemBatch, ServiceError> {
        self.validate()?;
        Ok(NewItemBatch {
            item_type: self.item_type,
            vendor_name: self.vendor_name.trim().to_string(),
            supply_date: self.supply_date,
            warranty_period: WarrantyPeriod::new(self.warranty_period)?,
            quantity: self.quantity,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedItems {
    pub items: Vec<ItemResponse>,
    pub count: usize,
}

/// Partial update. Absent fields are untouched; `null` clears nullable ones.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub item_type: Option<ItemType>,
    #[validate(length(min = 1, max = 255))]
    pub vendor_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_opt_timestamp")]
    #[schema(value_type = Option<String>)]
    pub supply_date: Option<Option<DateTime<Utc>>>,
    #[validate(range(min = 12, max = 48))]
    pub warranty_period: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_opt_timestamp")]
    #[schema(value_type = Option<String>)]
    pub last_inspection_date: Option<Option<DateTime<Utc>>>,
    pub condition_status: Option<ConditionStatus>,
    #[serde(default, deserialize_with = "de_double_option")]
    #[schema(value_type = Option<String>)]
    pub inspection_notes: Option<Option<String>>,
}

impl UpdateItemRequest {
    pub fn into_changes(self) -> Result<ItemChanges, ServiceError> {
        self.validate()?;
        let supply_date = match self.supply_date {
            Some(None) => {
                return Err(ServiceError::ValidationError(
                    "supplyDate cannot be null".to_string(),
                ))
            }
            Some(Some(date)) => Some(date),
            None => None,
        };
        Ok(ItemChanges {
            item_type: self.item_type,
            vendor_name: self.vendor_name.map(|v| v.trim().to_string()),
            supply_date,
            warranty_period: self.warranty_period.map(WarrantyPeriod::new).transpose()?,
            last_inspection_date: self.last_inspection_date,
            condition_status: self.condition_status,
            inspection_notes: self.inspection_notes,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/items",
    params(ItemFilter),
    responses(
        (status = 200, description = "Items listed", body = ApiResponse<Vec<ItemResponse>>),
        (status = 400, description = "Invalid filter", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<ItemFilter>, QueryRejection>,
) -> ApiResult<Vec<ItemResponse>> {
    let Query(filter) = query?;
    let now = Utc::now();
    let items = state.services.items.list_items(&filter, now).await?;
    Ok(Json(ApiResponse::success(
        items
            .into_iter()
            .map(|item| ItemResponse::from_model(item, now))
            .collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item fetched", body = ApiResponse<ItemResponse>),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<ItemResponse> {
    let id = path_id(path)?;
    let item = state.services.items.get_item(id).await?;
    Ok(Json(ApiResponse::success(ItemResponse::from_model(
        item,
        Utc::now(),
    ))))
}

#[utoipa::path(
    post,
    path = "/api/items",
    request_body = CreateItemsRequest,
    responses(
        (status = 201, description = "Item batch created", body = ApiResponse<CreatedItems>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_items(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemsRequest>, JsonRejection>,
) -> CreatedResult<CreatedItems> {
    let Json(payload) = payload?;
    let batch = payload.into_batch()?;

    let items = state.services.items.create_batch(batch).await?;
    let now = Utc::now();
    let items: Vec<ItemResponse> = items
        .into_iter()
        .map(|item| ItemResponse::from_model(item, now))
        .collect();
    Ok(created(CreatedItems {
        count: items.len(),
        items,
    }))
}

#[utoipa::path(
    put,
    path = "/api/items/{id}",
    request_body = UpdateItemRequest,
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<ItemResponse>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_item(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> ApiResult<ItemResponse> {
    let id = path_id(path)?;
    let Json(payload) = payload?;
    let changes = payload.into_changes()?;

    let updated = state.services.items.update_item(id, changes).await?;
    Ok(Json(ApiResponse::success(ItemResponse::from_model(
        updated,
        Utc::now(),
    ))))
}

#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<serde_json::Value> {
    let id = path_id(path)?;
    state.services.items.delete_item(id).await?;

    let mut response = ApiResponse::success(json!({ "id": id }));
    response.message = Some("Item deleted successfully".to_string());
    Ok(Json(response))
}
