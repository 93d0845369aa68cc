use crate::{
    analytics::{Anomaly, KpiStats, TypeShare, VendorVolume},
    ApiResponse, ApiResult, AppState,
};
use axum::{extract::State, response::Json};
use chrono::Utc;

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Dashboard KPI counters", body = ApiResponse<KpiStats>)
    ),
    tag = "analytics"
)]
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<KpiStats> {
    let stats = state.services.analytics.stats(Utc::now()).await?;
    Ok(Json(ApiResponse::success(stats)))
}

#[utoipa::path(
    get,
    path = "/api/analytics/anomalies",
    responses(
        (status = 200, description = "Top anomalies by severity", body = ApiResponse<Vec<Anomaly>>)
    ),
    tag = "analytics"
)]
pub async fn get_anomalies(State(state): State<AppState>) -> ApiResult<Vec<Anomaly>> {
    let anomalies = state.services.analytics.anomalies(Utc::now()).await?;
    Ok(Json(ApiResponse::success(anomalies)))
}

#[utoipa::path(
    get,
    path = "/api/analytics/distribution",
    responses(
        (status = 200, description = "Item counts per type", body = ApiResponse<Vec<TypeShare>>)
    ),
    tag = "analytics"
)]
pub async fn get_distribution(State(state): State<AppState>) -> ApiResult<Vec<TypeShare>> {
    let shares = state.services.analytics.distribution().await?;
    Ok(Json(ApiResponse::success(shares)))
}

#[utoipa::path(
    get,
    path = "/api/analytics/vendors",
    responses(
        (status = 200, description = "Top vendors by supplied items", body = ApiResponse<Vec<VendorVolume>>)
    ),
    tag = "analytics"
)]
pub async fn get_vendor_performance(State(state): State<AppState>) -> ApiResult<Vec<VendorVolume>> {
    let volumes = state.services.analytics.vendor_performance().await?;
    Ok(Json(ApiResponse::success(volumes)))
}
