use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use storefront_core::domain::catalog::{
    card::{CardView, ProductCard},
    filter_params::{FilterParams, SortOption},
    ports::CatalogService,
};
use utoipa::{IntoParams, ToSchema};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

const FEATURED_BADGE: &str = "Just In";
const DEFAULT_FEATURED: usize = 3;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetFeaturedQuery {
    /// How many cards to return, 1 to 12
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetFeaturedResponse {
    pub cards: Vec<CardView>,
}

#[utoipa::path(
    get,
    path = "/featured",
    tag = "catalog",
    summary = "Featured products",
    description = "Newest published products rendered as featured cards.",
    params(GetFeaturedQuery),
    responses(
        (status = 200, body = GetFeaturedResponse)
    ),
)]
pub async fn get_featured_products(
    Query(query): Query<GetFeaturedQuery>,
    State(state): State<AppState>,
) -> Result<Response<GetFeaturedResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_FEATURED).clamp(1, 12);

    let params = FilterParams {
        sort: Some(SortOption::Newest.key().to_string()),
        ..Default::default()
    };
    let page = state
        .service
        .list_products(params)
        .await
        .map_err(ApiError::from)?;

    let cards = page
        .products
        .iter()
        .take(limit)
        .map(|product| {
            ProductCard::Featured {
                product,
                badge: FEATURED_BADGE,
            }
            .render()
        })
        .collect();

    Ok(Response::OK(GetFeaturedResponse { cards }))
}
