use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Gender {
    pub id: Uuid,
    pub label: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Color {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub hex_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Size {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductImage {
    pub id: Uuid,
    pub url: String,
    pub sort_order: i32,
    pub is_primary: bool,
    /// Set when the image belongs to one specific variant (color shot).
    pub variant_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductVariant {
    pub id: Uuid,
    pub sku: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub in_stock: i32,
    pub color: Color,
    pub size: Size,
}

/// Listing view of a product: resolved references, list price range,
/// ordered images and the distinct color names of its variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductWithDetails {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Category,
    pub brand: Brand,
    pub gender: Gender,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub images: Vec<ProductImage>,
    pub colors: Vec<String>,
}

impl ProductWithDetails {
    /// The image flagged primary, otherwise the first one in display order.
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.first())
    }

    pub fn has_single_price(&self) -> bool {
        self.min_price == self.max_price
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: ProductWithDetails,
    pub variants: Vec<ProductVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductsPage {
    pub products: Vec<ProductWithDetails>,
    pub total_count: i64,
    pub page: u32,
    pub page_size: u64,
}

impl ProductsPage {
    pub fn empty(page: u32, page_size: u64, total_count: i64) -> Self {
        Self {
            products: Vec::new(),
            total_count,
            page,
            page_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriceRangeOption {
    pub label: String,
    pub value: String,
}

/// Everything the filter sidebar can offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterOptions {
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub genders: Vec<Gender>,
    pub colors: Vec<Color>,
    pub sizes: Vec<Size>,
    pub price_ranges: Vec<PriceRangeOption>,
}
