use axum::extract::State;
use serde::{Deserialize, Serialize};
use storefront_core::domain::catalog::{
    card::{CardView, ProductCard},
    entities::ProductWithDetails,
    filter_params::{ActiveFilter, SortOption},
    ports::CatalogService,
};
use utoipa::ToSchema;

use crate::application::http::{
    query_extractor::FilterQuery,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetProductsResponse {
    pub products: Vec<ProductWithDetails>,
    pub cards: Vec<CardView>,
    pub total_count: i64,
    pub page: u32,
    pub page_size: u64,
    pub total_pages: u64,
    /// Chips for every active filter, ready to be removed one by one
    pub filters: Vec<ActiveFilter>,
    pub sort: SortOption,
    /// Canonical form of the request query
    pub query: String,
}

pub fn total_pages(total_count: i64, page_size: u64) -> u64 {
    let total = u64::try_from(total_count).unwrap_or(0);
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

#[utoipa::path(
    get,
    path = "",
    tag = "catalog",
    summary = "List products",
    description = "Lists published products matching the query filters. Multi-valued filters take comma separated slugs.",
    params(
        ("gender" = Option<String>, Query, description = "Gender slugs"),
        ("color" = Option<String>, Query, description = "Color slugs"),
        ("size" = Option<String>, Query, description = "Size slugs"),
        ("price" = Option<String>, Query, description = "Price buckets such as 0-75 or 150+"),
        ("category" = Option<String>, Query, description = "Category slugs"),
        ("brand" = Option<String>, Query, description = "Brand slugs"),
        ("search" = Option<String>, Query, description = "Text searched in product names"),
        ("sort" = Option<String>, Query, description = "featured, newest, price_asc or price_desc"),
        ("page" = Option<u32>, Query, description = "1-indexed page"),
        ("priceMin" = Option<String>, Query, description = "Lower price bound"),
        ("priceMax" = Option<String>, Query, description = "Upper price bound"),
    ),
    responses(
        (status = 200, body = GetProductsResponse),
        (status = 500, description = "Catalog could not be loaded")
    ),
)]
pub async fn get_products(
    State(state): State<AppState>,
    FilterQuery(params): FilterQuery,
) -> Result<Response<GetProductsResponse>, ApiError> {
    let filters = params.active_filters();
    let sort = params.sort_option();
    let query = params.encode();

    let page = state
        .service
        .list_products(params)
        .await
        .map_err(ApiError::from)?;

    let cards = page
        .products
        .iter()
        .map(|product| ProductCard::Product(product).render())
        .collect();

    Ok(Response::OK(GetProductsResponse {
        total_pages: total_pages(page.total_count, page.page_size),
        cards,
        total_count: page.total_count,
        page: page.page,
        page_size: page.page_size,
        products: page.products,
        filters,
        sort,
        query,
    }))
}
