use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::catalog::entities::{Brand, Category, Color, Gender, ProductImage, Size};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub id: Uuid,
    pub sku: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub in_stock: i32,
    pub color: Option<Color>,
    pub size: Option<Size>,
}

/// One flat row of the product × variant × color × size × image join.
///
/// Every joined entity is optional: a left join may leave any of them
/// unresolved and the assembler has to cope with each case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub product: ProductRecord,
    pub category: Option<Category>,
    pub brand: Option<Brand>,
    pub gender: Option<Gender>,
    pub variant: Option<VariantRecord>,
    pub image: Option<ProductImage>,
}

/// Which images a listing shows for each product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageScope {
    /// Images not tied to any variant.
    Generic,
    /// Images of variants whose color slug is selected, generic ones when
    /// the product has none.
    Colors(Vec<String>),
    All,
}

/// Pricing and stock facts about a single variant, used when filling a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSnapshot {
    pub variant_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub sku: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub in_stock: i32,
    pub is_published: bool,
}

impl VariantSnapshot {
    pub fn effective_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.price)
    }
}
