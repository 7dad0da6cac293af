use axum::extract::State;
use serde::{Deserialize, Serialize};
use storefront_core::domain::catalog::{
    entities::FilterOptions, filter_params::SortOption, ports::CatalogService,
};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SortOptionView {
    pub value: SortOption,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FilterOptionsResponse {
    #[serde(flatten)]
    pub options: FilterOptions,
    pub sort_options: Vec<SortOptionView>,
}

#[utoipa::path(
    get,
    path = "/filters/options",
    tag = "catalog",
    summary = "Filter options",
    description = "Every value the filter sidebar can offer, plus the sort choices.",
    responses(
        (status = 200, body = FilterOptionsResponse)
    ),
)]
pub async fn get_filter_options(
    State(state): State<AppState>,
) -> Result<Response<FilterOptionsResponse>, ApiError> {
    let options = state
        .service
        .get_filter_options()
        .await
        .map_err(ApiError::from)?;

    let sort_options = SortOption::ALL
        .iter()
        .map(|sort| SortOptionView {
            value: *sort,
            label: sort.label().to_string(),
        })
        .collect();

    Ok(Response::OK(FilterOptionsResponse {
        options,
        sort_options,
    }))
}
