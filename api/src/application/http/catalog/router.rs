use super::handlers::apply_filter_action::{__path_apply_filter_action, apply_filter_action};
use super::handlers::get_collections::{__path_get_collections, get_collections};
use super::handlers::get_featured_products::{__path_get_featured_products, get_featured_products};
use super::handlers::get_filter_options::{__path_get_filter_options, get_filter_options};
use super::handlers::get_product::{__path_get_product, get_product};
use super::handlers::get_products::{__path_get_products, get_products};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_products,
    get_product,
    get_filter_options,
    apply_filter_action,
    get_featured_products,
    get_collections
))]
pub struct CatalogApiDoc;

pub fn catalog_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/products", state.args.server.root_path),
            get(get_products),
        )
        .route(
            &format!("{}/products/featured", state.args.server.root_path),
            get(get_featured_products),
        )
        .route(
            &format!("{}/products/collections", state.args.server.root_path),
            get(get_collections),
        )
        .route(
            &format!("{}/products/filters", state.args.server.root_path),
            post(apply_filter_action),
        )
        .route(
            &format!("{}/products/filters/options", state.args.server.root_path),
            get(get_filter_options),
        )
        .route(
            &format!("{}/products/{{product_id}}", state.args.server.root_path),
            get(get_product),
        )
}
