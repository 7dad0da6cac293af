use serde::{Deserialize, Serialize};
use storefront_core::domain::catalog::filter_params::{ActiveFilter, FilterParams};
use utoipa::ToSchema;

use crate::application::http::{
    catalog::validators::ApplyFilterActionValidator,
    server::api_entities::{
        api_error::{ApiError, ValidateJson},
        response::Response,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ApplyFilterActionResponse {
    pub query: String,
    pub href: String,
    pub params: FilterParams,
    pub filters: Vec<ActiveFilter>,
}

#[utoipa::path(
    post,
    path = "/filters",
    tag = "catalog",
    summary = "Edit listing filters",
    description = "Applies one filter edit to a listing query string and returns the new query. Every edit except clear_all sends the listing back to page 1.",
    request_body = ApplyFilterActionValidator,
    responses(
        (status = 200, body = ApplyFilterActionResponse),
        (status = 422, description = "Invalid action")
    ),
)]
pub async fn apply_filter_action(
    ValidateJson(payload): ValidateJson<ApplyFilterActionValidator>,
) -> Result<Response<ApplyFilterActionResponse>, ApiError> {
    let current = FilterParams::decode(&payload.query);
    let next = payload.action.apply(&current);
    let query = next.encode();

    Ok(Response::OK(ApplyFilterActionResponse {
        href: if query.is_empty() {
            "/products".to_string()
        } else {
            format!("/products?{query}")
        },
        query,
        filters: next.active_filters(),
        params: next,
    }))
}
