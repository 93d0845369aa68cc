use crate::{entities::vendor, handlers::common::path_id, ApiResponse, ApiResult, AppState};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = Option<Object>)]
    pub contact_info: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<vendor::Model> for VendorResponse {
    fn from(model: vendor::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            contact_info: model.contact_info,
            created_at: model.created_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/vendors",
    responses(
        (status = 200, description = "Vendors listed by name", body = ApiResponse<Vec<VendorResponse>>)
    ),
    tag = "vendors"
)]
pub async fn list_vendors(State(state): State<AppState>) -> ApiResult<Vec<VendorResponse>> {
    let vendors = state.services.vendors.list_vendors().await?;
    Ok(Json(ApiResponse::success(
        vendors.into_iter().map(VendorResponse::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/vendors/{id}",
    params(
        ("id" = Uuid, Path, description = "Vendor ID")
    ),
    responses(
        (status = 200, description = "Vendor fetched", body = ApiResponse<VendorResponse>),
        (status = 404, description = "Vendor not found", body = crate::errors::ErrorResponse)
    ),
    tag = "vendors"
)]
pub async fn get_vendor(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<VendorResponse> {
    let id = path_id(path)?;
    let vendor = state.services.vendors.get_vendor(id).await?;
    Ok(Json(ApiResponse::success(VendorResponse::from(vendor))))
}
