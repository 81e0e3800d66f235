//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, products};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SKU Sync API",
        version = "1.0.0",
        description = "Batch product updates addressed by SKU"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Products
        products::update_by_sku,
    ),
    components(
        schemas(
            crate::models::update::UpdateRequestItem,
            crate::models::update::ImageRef,
            crate::models::update::CategoryRef,
            crate::models::update::TagRef,
            crate::models::update::ItemResult,
            crate::models::update::BatchResponse,
            crate::models::product::ProductStatus,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "products", description = "Product updates by SKU")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
