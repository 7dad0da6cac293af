use axum::extract::{Path, State};
use storefront_core::domain::catalog::{entities::ProductDetails, ports::CatalogService};
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/{product_id}",
    tag = "catalog",
    summary = "Get product",
    description = "Returns a published product with all its images and purchasable variants.",
    params(
        ("product_id" = Uuid, Path, description = "Product id"),
    ),
    responses(
        (status = 200, body = ProductDetails),
        (status = 404, description = "Product not found or not published")
    ),
)]
pub async fn get_product(
    Path(product_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<ProductDetails>, ApiError> {
    let product = state
        .service
        .get_product(product_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("product {product_id} not found")))?;

    Ok(Response::OK(product))
}
