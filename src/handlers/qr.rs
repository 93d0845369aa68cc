use crate::{
    handlers::common::path_id, services::qr::QrCode, ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/qr/{id}",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "QR payload and encoded image reference", body = ApiResponse<QrCode>),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "qr"
)]
pub async fn get_qr_code(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<QrCode> {
    let id = path_id(path)?;
    let qr = state.services.qr.qr_for_item(id).await?;
    Ok(Json(ApiResponse::success(qr)))
}
