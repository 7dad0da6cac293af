use std::collections::HashMap;

use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    cart::{
        entities::{Cart, CartItem},
        ports::{CartService, CartStorage},
        value_objects::{AddCartItemInput, CartSummary},
    },
    catalog::{ports::CatalogRepository, value_objects::VariantSnapshot},
    common::{entities::app_errors::CoreError, services::Service},
};

fn check_stock(sku: &str, in_stock: i32, requested: i64) -> Result<(), CoreError> {
    if requested > i64::from(in_stock) {
        return Err(CoreError::Invalid(format!(
            "only {} left in stock for {}",
            in_stock.max(0),
            sku
        )));
    }
    Ok(())
}

impl<CR, CS> Service<CR, CS>
where
    CR: CatalogRepository,
    CS: CartStorage,
{
    /// Published variant or `NotFound`.
    async fn sellable_variant(&self, variant_id: Uuid) -> Result<VariantSnapshot, CoreError> {
        self.catalog_repository
            .find_variant(variant_id)
            .await?
            .filter(|variant| variant.is_published)
            .ok_or(CoreError::NotFound)
    }
}

impl<CR, CS> CartService for Service<CR, CS>
where
    CR: CatalogRepository,
    CS: CartStorage,
{
    #[instrument(skip(self))]
    async fn get_cart(&self, session: String) -> Result<CartSummary, CoreError> {
        let cart = self.cart_storage.load(session).await?;
        Ok(cart.into())
    }

    #[instrument(skip(self))]
    async fn add_item(
        &self,
        session: String,
        input: AddCartItemInput,
    ) -> Result<CartSummary, CoreError> {
        if input.quantity == 0 {
            return Err(CoreError::Invalid("quantity must be at least 1".to_string()));
        }

        let variant = self.sellable_variant(input.variant_id).await?;
        let item = CartItem {
            variant_id: variant.variant_id,
            product_id: variant.product_id,
            name: variant.product_name.clone(),
            sku: variant.sku.clone(),
            unit_price: variant.effective_price(),
            quantity: input.quantity,
        };

        let cart = self
            .cart_storage
            .update(session, move |cart| {
                let already = cart
                    .item(variant.variant_id)
                    .map(|item| item.quantity)
                    .unwrap_or(0);
                check_stock(
                    &variant.sku,
                    variant.in_stock,
                    i64::from(already) + i64::from(item.quantity),
                )?;

                cart.add_item(item);
                Ok(cart.clone())
            })
            .await?;

        Ok(cart.into())
    }

    #[instrument(skip(self))]
    async fn update_quantity(
        &self,
        session: String,
        variant_id: Uuid,
        quantity: i32,
    ) -> Result<CartSummary, CoreError> {
        // lowering to zero removes the line and needs no stock
        if quantity > 0 {
            let variant = self.sellable_variant(variant_id).await?;
            check_stock(&variant.sku, variant.in_stock, i64::from(quantity))?;
        }

        let cart = self
            .cart_storage
            .update(session, move |cart| {
                cart.update_quantity(variant_id, quantity)?;
                Ok(cart.clone())
            })
            .await?;
        Ok(cart.into())
    }

    #[instrument(skip(self))]
    async fn remove_item(
        &self,
        session: String,
        variant_id: Uuid,
    ) -> Result<CartSummary, CoreError> {
        let cart = self
            .cart_storage
            .update(session, move |cart| {
                cart.remove_item(variant_id);
                Ok(cart.clone())
            })
            .await?;
        Ok(cart.into())
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self, session: String) -> Result<CartSummary, CoreError> {
        self.cart_storage.discard(session).await?;
        Ok(Cart::default().into())
    }

    #[instrument(skip(self))]
    async fn migrate_guest_cart(
        &self,
        guest_session: String,
        user_session: String,
    ) -> Result<CartSummary, CoreError> {
        if guest_session == user_session {
            return Err(CoreError::Invalid(
                "guest and user sessions must differ".to_string(),
            ));
        }

        let guest = self.cart_storage.load(guest_session.clone()).await?;
        if guest.is_empty() {
            return self.get_cart(user_session).await;
        }

        // Variants that are gone or unpublished count as out of stock.
        let mut stock = HashMap::with_capacity(guest.items.len());
        for item in &guest.items {
            let in_stock = self
                .catalog_repository
                .find_variant(item.variant_id)
                .await?
                .filter(|variant| variant.is_published)
                .map(|variant| variant.in_stock)
                .unwrap_or(0);
            stock.insert(item.variant_id, in_stock);
        }

        let moved = guest.total_items();
        let cart = self
            .cart_storage
            .update(user_session, move |cart| {
                cart.merge(guest);
                for (variant_id, in_stock) in stock {
                    if let Some(item) = cart.item(variant_id)
                        && i64::from(item.quantity) > i64::from(in_stock)
                    {
                        cart.update_quantity(variant_id, in_stock)?;
                    }
                }
                Ok(cart.clone())
            })
            .await?;
        self.cart_storage.discard(guest_session).await?;

        tracing::info!(moved, "guest cart migrated");
        Ok(cart.into())
    }
}
