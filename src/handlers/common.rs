use axum::{
    extract::{rejection::PathRejection, Path},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{errors::ServiceError, ApiResponse};

/// Success envelope with `201 Created`.
pub fn created<T>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

/// Unwraps a UUID path segment, turning a malformed id into a 400.
pub fn path_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ServiceError> {
    let Path(id) = path?;
    Ok(id)
}
