use uuid::Uuid;

use crate::domain::{
    cart::{
        entities::Cart,
        value_objects::{AddCartItemInput, CartSummary},
    },
    common::entities::app_errors::CoreError,
};

#[cfg_attr(test, mockall::automock)]
pub trait CartService: Send + Sync {
    fn get_cart(
        &self,
        session: String,
    ) -> impl Future<Output = Result<CartSummary, CoreError>> + Send;

    fn add_item(
        &self,
        session: String,
        input: AddCartItemInput,
    ) -> impl Future<Output = Result<CartSummary, CoreError>> + Send;

    fn update_quantity(
        &self,
        session: String,
        variant_id: Uuid,
        quantity: i32,
    ) -> impl Future<Output = Result<CartSummary, CoreError>> + Send;

    fn remove_item(
        &self,
        session: String,
        variant_id: Uuid,
    ) -> impl Future<Output = Result<CartSummary, CoreError>> + Send;

    fn clear_cart(
        &self,
        session: String,
    ) -> impl Future<Output = Result<CartSummary, CoreError>> + Send;

    /// Moves a guest cart into a signed-in user's cart and forgets the guest
    /// session.
    fn migrate_guest_cart(
        &self,
        guest_session: String,
        user_session: String,
    ) -> impl Future<Output = Result<CartSummary, CoreError>> + Send;
}

/// Persistence for carts, keyed by session id. An unknown session loads as
/// an empty cart.
pub trait CartStorage: Send + Sync {
    fn load(&self, session: String) -> impl Future<Output = Result<Cart, CoreError>> + Send;

    /// Applies `apply` to the session's cart while no other write to that
    /// cart can interleave. The cart is stored only when `apply` succeeds.
    fn update<T, F>(
        &self,
        session: String,
        apply: F,
    ) -> impl Future<Output = Result<T, CoreError>> + Send
    where
        T: Send,
        F: FnOnce(&mut Cart) -> Result<T, CoreError> + Send;

    fn save(
        &self,
        session: String,
        cart: Cart,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn discard(&self, session: String) -> impl Future<Output = Result<(), CoreError>> + Send;
}
