use axum::{
    Extension,
    extract::{Path, State},
};
use storefront_core::domain::cart::{ports::CartService, value_objects::CartSummary};
use uuid::Uuid;

use crate::application::{
    cart_session::CartSession,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    delete,
    path = "/items/{variant_id}",
    tag = "cart",
    summary = "Remove item",
    params(
        ("variant_id" = Uuid, Path, description = "Variant id"),
        ("x-cart-session" = String, Header, description = "Cart session id"),
    ),
    responses(
        (status = 200, body = CartSummary)
    ),
)]
pub async fn remove_cart_item(
    Path(variant_id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(CartSession(session)): Extension<CartSession>,
) -> Result<Response<CartSummary>, ApiError> {
    let cart = state
        .service
        .remove_item(session, variant_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(cart))
}
