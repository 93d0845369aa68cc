use crate::{
    analytics::{SummaryRequest, SummaryResponse},
    ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use chrono::Utc;

#[utoipa::path(
    post,
    path = "/api/ai/generate-summary",
    request_body = SummaryRequest,
    responses(
        (status = 200, description = "Summary from the external service or the local generator", body = ApiResponse<SummaryResponse>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "summary"
)]
pub async fn generate_summary(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> ApiResult<SummaryResponse> {
    let Json(payload) = payload?;
    let request = payload.validated()?;

    let summary = state.services.summary.generate(&request, Utc::now()).await;
    Ok(Json(ApiResponse::success(summary)))
}
