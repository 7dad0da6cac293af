use super::handlers::add_cart_item::{__path_add_cart_item, add_cart_item};
use super::handlers::clear_cart::{__path_clear_cart, clear_cart};
use super::handlers::get_cart::{__path_get_cart, get_cart};
use super::handlers::migrate_cart::{__path_migrate_cart, migrate_cart};
use super::handlers::remove_cart_item::{__path_remove_cart_item, remove_cart_item};
use super::handlers::update_cart_item::{__path_update_cart_item, update_cart_item};
use crate::application::{cart_session::cart_session, http::server::app_state::AppState};

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_cart,
    clear_cart,
    add_cart_item,
    update_cart_item,
    remove_cart_item,
    migrate_cart
))]
pub struct CartApiDoc;

pub fn cart_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/cart", state.args.server.root_path),
            get(get_cart).delete(clear_cart),
        )
        .route(
            &format!("{}/cart/items", state.args.server.root_path),
            post(add_cart_item),
        )
        .route(
            &format!("{}/cart/items/{{variant_id}}", state.args.server.root_path),
            put(update_cart_item).delete(remove_cart_item),
        )
        .route(
            &format!("{}/cart/migrate", state.args.server.root_path),
            post(migrate_cart),
        )
        .layer(middleware::from_fn(cart_session))
}
