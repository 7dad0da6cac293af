use axum::{
    Extension,
    extract::{Path, State},
};
use storefront_core::domain::cart::{ports::CartService, value_objects::CartSummary};
use uuid::Uuid;

use crate::application::{
    cart_session::CartSession,
    http::{
        cart::validators::UpdateCartItemValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    put,
    path = "/items/{variant_id}",
    tag = "cart",
    summary = "Update item quantity",
    params(
        ("variant_id" = Uuid, Path, description = "Variant id"),
        ("x-cart-session" = String, Header, description = "Cart session id"),
    ),
    request_body = UpdateCartItemValidator,
    responses(
        (status = 200, body = CartSummary),
        (status = 400, description = "Not enough stock"),
        (status = 404, description = "Variant is not in the cart or no longer sold")
    ),
)]
pub async fn update_cart_item(
    Path(variant_id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(CartSession(session)): Extension<CartSession>,
    ValidateJson(payload): ValidateJson<UpdateCartItemValidator>,
) -> Result<Response<CartSummary>, ApiError> {
    let cart = state
        .service
        .update_quantity(session, variant_id, payload.quantity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(cart))
}
