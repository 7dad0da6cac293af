use axum::extract::State;
use serde::{Deserialize, Serialize};
use storefront_core::domain::catalog::{
    card::{CardView, CollectionTile, ProductCard},
    ports::CatalogService,
};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetCollectionsResponse {
    pub cards: Vec<CardView>,
}

#[utoipa::path(
    get,
    path = "/collections",
    tag = "catalog",
    summary = "Collections",
    description = "One collection card per category, linking to the filtered listing.",
    responses(
        (status = 200, body = GetCollectionsResponse)
    ),
)]
pub async fn get_collections(
    State(state): State<AppState>,
) -> Result<Response<GetCollectionsResponse>, ApiError> {
    let options = state
        .service
        .get_filter_options()
        .await
        .map_err(ApiError::from)?;

    let cards = options
        .categories
        .iter()
        .map(CollectionTile::for_category)
        .map(|tile| ProductCard::Collection(&tile).render())
        .collect();

    Ok(Response::OK(GetCollectionsResponse { cards }))
}
