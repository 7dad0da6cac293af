use axum::{Extension, extract::State};
use storefront_core::domain::cart::{
    ports::CartService,
    value_objects::{AddCartItemInput, CartSummary},
};

use crate::application::{
    cart_session::CartSession,
    http::{
        cart::validators::AddCartItemValidator,
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
    post,
    path = "/items",
    tag = "cart",
    summary = "Add item",
    description = "Adds a variant to the cart at its current catalog price. Adding a variant already in the cart increases its quantity.",
    params(
        ("x-cart-session" = String, Header, description = "Cart session id"),
    ),
    request_body = AddCartItemValidator,
    responses(
        (status = 201, body = CartSummary),
        (status = 400, description = "Not enough stock"),
        (status = 404, description = "Variant not found")
    ),
)]
pub async fn add_cart_item(
    State(state): State<AppState>,
    Extension(CartSession(session)): Extension<CartSession>,
    ValidateJson(payload): ValidateJson<AddCartItemValidator>,
) -> Result<Response<CartSummary>, ApiError> {
    let cart = state
        .service
        .add_item(
            session,
            AddCartItemInput {
                variant_id: payload.variant_id,
                quantity: payload.quantity,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(cart))
}
