use crate::{
    common::de_timestamp,
    entities::{inspection, item::ConditionStatus},
    errors::ServiceError,
    handlers::common::{created, path_id},
    repositories::NewInspection,
    ApiResponse, ApiResult, AppState, CreatedResult,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
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
pub struct InspectionResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub inspection_date: DateTime<Utc>,
    pub inspector_name: Option<String>,
    pub condition: ConditionStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<inspection::Model> for InspectionResponse {
    fn from(model: inspection::Model) -> Self {
        Self {
            id: model.id,
            item_id: model.item_id,
            inspection_date: model.inspection_date,
            inspector_name: model.inspector_name,
            condition: model.condition,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "itemId": "4f6c2a1e-8b7d-4c3a-9e21-0d5f7a9b1c23",
    "inspectionDate": "2024-05-05T08:00:00Z",
    "inspectorName": "R. Iyer",
    "condition": "fair",
    "notes": "Minor corrosion on clip shoulder"
}))]
pub struct CreateInspectionRequest {
    pub item_id: Uuid,
    #[serde(deserialize_with = "de_timestamp")]
    #[schema(value_type = String)]
    pub inspection_date: DateTime<Utc>,
    #[validate(length(max = 255))]
    pub inspector_name: Option<String>,
    pub condition: ConditionStatus,
    pub notes: Option<String>,
}

impl CreateInspectionRequest {
    pub fn into_new_inspection(self) -> Result<NewInspection, ServiceError> {
        self.validate()?;
        Ok(NewInspection {
            item_id: self.item_id,
            inspection_date: self.inspection_date,
            inspector_name: self
                .inspector_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            condition: self.condition,
            notes: self.notes,
        })
    }
}

#[utoipa::path(
    post,
    path = "/api/inspections",
    request_body = CreateInspectionRequest,
    responses(
        (status = 201, description = "Inspection recorded", body = ApiResponse<InspectionResponse>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inspections"
)]
pub async fn create_inspection(
    State(state): State<AppState>,
    payload: Result<Json<CreateInspectionRequest>, JsonRejection>,
) -> CreatedResult<InspectionResponse> {
    let Json(payload) = payload?;
    let new_inspection = payload.into_new_inspection()?;

    let created_inspection = state
        .services
        .inspections
        .record_inspection(new_inspection)
        .await?;
    Ok(created(InspectionResponse::from(created_inspection)))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}/inspections",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Inspections of the item, newest first", body = ApiResponse<Vec<InspectionResponse>>),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inspections"
)]
pub async fn list_item_inspections(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Vec<InspectionResponse>> {
    let id = path_id(path)?;
    let inspections = state.services.inspections.inspections_for_item(id).await?;
    Ok(Json(ApiResponse::success(
        inspections.into_iter().map(InspectionResponse::from).collect(),
    )))
}
