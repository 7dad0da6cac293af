use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::entities::{Cart, CartItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCartItemInput {
    pub variant_id: Uuid,
    pub quantity: u32,
}

/// A cart together with its derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub total_items: u32,
    pub total_price: Decimal,
}

impl From<Cart> for CartSummary {
    fn from(cart: Cart) -> Self {
        Self {
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            items: cart.items,
        }
    }
}
