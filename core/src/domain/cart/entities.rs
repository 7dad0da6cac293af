use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub variant_id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub sku: String,
    /// Price captured from the catalog when the item was last added.
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Contents of one session's cart, one line per variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, variant_id: Uuid) -> Option<&CartItem> {
        self.items.iter().find(|item| item.variant_id == variant_id)
    }

    /// Adds a line, or bumps the quantity of the existing line for the same
    /// variant. The incoming price replaces the stored one.
    pub fn add_item(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.variant_id == item.variant_id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                existing.unit_price = item.unit_price;
            }
            None => self.items.push(item),
        }
    }

    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, variant_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.variant_id != variant_id);
        self.items.len() != before
    }

    /// A quantity of zero or less removes the line.
    pub fn update_quantity(&mut self, variant_id: Uuid, quantity: i32) -> Result<(), CoreError> {
        let Some(index) = self
            .items
            .iter()
            .position(|item| item.variant_id == variant_id)
        else {
            return Err(CoreError::NotFound);
        };

        match u32::try_from(quantity) {
            Ok(quantity) if quantity > 0 => self.items[index].quantity = quantity,
            _ => {
                self.items.remove(index);
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity))
    }

    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Folds another cart into this one, summing quantities per variant.
    /// Lines already present keep their price.
    pub fn merge(&mut self, other: Cart) {
        for item in other.items {
            match self
                .items
                .iter_mut()
                .find(|existing| existing.variant_id == item.variant_id)
            {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => self.items.push(item),
            }
        }
    }
}
