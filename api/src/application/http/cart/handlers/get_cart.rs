use axum::{Extension, extract::State};
use storefront_core::domain::cart::{ports::CartService, value_objects::CartSummary};

use crate::application::{
    cart_session::CartSession,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "",
    tag = "cart",
    summary = "Get cart",
    params(
        ("x-cart-session" = String, Header, description = "Cart session id"),
    ),
    responses(
        (status = 200, body = CartSummary),
        (status = 400, description = "Missing or malformed session")
    ),
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(CartSession(session)): Extension<CartSession>,
) -> Result<Response<CartSummary>, ApiError> {
    let cart = state
        .service
        .get_cart(session)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(cart))
}
