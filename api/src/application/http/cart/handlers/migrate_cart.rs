use axum::{Extension, extract::State};
use storefront_core::domain::cart::{ports::CartService, value_objects::CartSummary};

use crate::application::{
    cart_session::{CartSession, parse_session},
    http::{
        cart::validators::MigrateCartValidator,
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
    path = "/migrate",
    tag = "cart",
    summary = "Migrate guest cart",
    description = "Merges the guest session's cart into the cart of the calling session, then forgets the guest cart.",
    params(
        ("x-cart-session" = String, Header, description = "Session that receives the items"),
    ),
    request_body = MigrateCartValidator,
    responses(
        (status = 200, body = CartSummary),
        (status = 400, description = "Sessions are identical or malformed")
    ),
)]
pub async fn migrate_cart(
    State(state): State<AppState>,
    Extension(CartSession(session)): Extension<CartSession>,
    ValidateJson(payload): ValidateJson<MigrateCartValidator>,
) -> Result<Response<CartSummary>, ApiError> {
    let guest_session = parse_session(&payload.guest_session)?;

    let cart = state
        .service
        .migrate_guest_cart(guest_session, session)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(cart))
}
