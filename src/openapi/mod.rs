use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TrackFit API",
        version = "0.1.0",
        description = r#"
# TrackFit Inventory API

Inventory tracking for railway track fittings: sleepers, liners, pads and elastic rail clips.

## Features

- **Batch intake**: register N identical items in one transactional call
- **Inspections**: record maintenance checks and keep item condition current
- **Warranty tracking**: expiry dates and expiring-soon classification
- **Analytics**: KPI counters, anomaly feed, type distribution, vendor volume
- **QR tags**: canonical per-item payloads
- **Summaries**: AI-generated item reports with a local rule-based fallback

## Response envelope

Successful responses are wrapped as `{success, data, message, errors, meta}`.
Errors use `{error, message, details?, request_id?, timestamp}`.
"#,
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "items", description = "Track-fitting items"),
        (name = "inspections", description = "Inspection records"),
        (name = "vendors", description = "Suppliers"),
        (name = "qr", description = "QR tag payloads"),
        (name = "analytics", description = "KPI stats and derived views"),
        (name = "summary", description = "Item summaries")
    ),
    paths(
        crate::handlers::items::list_items,
        crate::handlers::items::get_item,
        crate::handlers::items::create_items,
        crate::handlers::items::update_item,
        crate::handlers::items::delete_item,

        crate::handlers::inspections::create_inspection,
        crate::handlers::inspections::list_item_inspections,

        crate::handlers::vendors::list_vendors,
        crate::handlers::vendors::get_vendor,

        crate::handlers::qr::get_qr_code,

        crate::handlers::analytics::get_stats,
        crate::handlers::analytics::get_anomalies,
        crate::handlers::analytics::get_distribution,
        crate::handlers::analytics::get_vendor_performance,

        crate::handlers::summary::generate_summary,
    ),
    components(
        schemas(
            crate::ApiResponse<serde_json::Value>,
            crate::ResponseMeta,

            // Items
            crate::entities::item::ItemType,
            crate::entities::item::ConditionStatus,
            crate::handlers::items::ItemResponse,
            crate::handlers::items::CreateItemsRequest,
            crate::handlers::items::CreatedItems,
            crate::handlers::items::UpdateItemRequest,
            crate::analytics::WarrantyStatus,
            crate::analytics::InspectionStatus,

            // Inspections and vendors
            crate::handlers::inspections::InspectionResponse,
            crate::handlers::inspections::CreateInspectionRequest,
            crate::handlers::vendors::VendorResponse,

            // QR
            crate::services::qr::QrCode,
            crate::services::qr::QrPayload,

            // Analytics
            crate::analytics::KpiStats,
            crate::analytics::Anomaly,
            crate::analytics::AnomalyType,
            crate::analytics::Severity,
            crate::analytics::TypeShare,
            crate::analytics::VendorVolume,

            // Summary
            crate::analytics::SummaryRequest,
            crate::analytics::SummaryResponse,

            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
