//! Product update-by-SKU endpoint

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::update::{BatchInput, BatchResponse},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdateBySkuParams {
    /// SKU for a lone item (single object or one-element array) that does
    /// not carry one
    pub sku: Option<String>,
}

/// Update one product, or a batch of products, addressed by SKU.
///
/// The body is either one update object or an array of them. Every item gets
/// exactly one entry in `results`, in input order; per-item failures do not
/// stop the batch. The `sku` query parameter only fills in a lone item, so a
/// larger batch without SKUs still reports "SKU not specified" per item.
#[utoipa::path(
    post,
    path = "/wc/v3/products/update-by-sku",
    tag = "products",
    params(UpdateBySkuParams),
    request_body(
        content = crate::models::update::UpdateRequestItem,
        description = "One update object, or an array of update objects"
    ),
    responses(
        (status = 200, description = "Per-item outcomes", body = BatchResponse),
        (status = 400, description = "Empty or unparseable body, or bad query string", body = crate::error::ErrorResponse),
        (status = 413, description = "Body over the configured size limit", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_by_sku(
    State(state): State<crate::AppState>,
    params: Result<Query<UpdateBySkuParams>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<BatchResponse>> {
    let Query(params) = params?;
    let body = body?;
    let input = BatchInput::parse(&body)?.with_default_sku(params.sku.as_deref());

    let response = state.services.sku_update.update_batch(input).await?;
    Ok(Json(response))
}
