use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::catalog::{
    entities::{Category, ProductWithDetails},
    filter_params::{FilterDimension, FilterParams},
};

pub const PLACEHOLDER_IMAGE: &str = "/shoes/shoe-1.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Product,
    Collection,
    Featured,
}

/// Presentation-ready fields of a card, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CardView {
    pub kind: CardKind,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub price_label: Option<String>,
    pub image_url: String,
    pub image_alt: String,
    pub badge: Option<String>,
    pub colors_label: Option<String>,
    pub href: String,
}

/// A browsable collection, e.g. "Running" linking to the filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CollectionTile {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub href: String,
}

impl CollectionTile {
    pub fn for_category(category: &Category) -> Self {
        let mut params = FilterParams::default().add_filter(FilterDimension::Category, &category.slug);
        params.page = None;
        let query = params.encode();

        Self {
            title: category.name.clone(),
            description: None,
            image_url: None,
            href: format!("/products?{query}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductCard<'a> {
    Product(&'a ProductWithDetails),
    Collection(&'a CollectionTile),
    Featured {
        product: &'a ProductWithDetails,
        badge: &'a str,
    },
}

impl ProductCard<'_> {
    pub fn kind(&self) -> CardKind {
        match self {
            ProductCard::Product(_) => CardKind::Product,
            ProductCard::Collection(_) => CardKind::Collection,
            ProductCard::Featured { .. } => CardKind::Featured,
        }
    }

    pub fn render(&self) -> CardView {
        match *self {
            ProductCard::Product(product) => render_product(product),
            ProductCard::Collection(tile) => render_collection(tile),
            ProductCard::Featured { product, badge } => render_featured(product, badge),
        }
    }
}

pub fn price_label(product: &ProductWithDetails) -> String {
    if product.has_single_price() {
        product.min_price.normalize().to_string()
    } else {
        format!(
            "{} - {}",
            product.min_price.normalize(),
            product.max_price.normalize()
        )
    }
}

fn colors_label(count: usize) -> String {
    match count {
        1 => "1 Colour".to_string(),
        n => format!("{n} Colours"),
    }
}

fn product_href(product: &ProductWithDetails) -> String {
    format!("/products/{}", product.id)
}

fn image_of(product: &ProductWithDetails) -> String {
    product
        .primary_image()
        .map(|image| image.url.clone())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

fn render_product(product: &ProductWithDetails) -> CardView {
    CardView {
        kind: CardKind::Product,
        title: product.name.clone(),
        subtitle: Some(format!(
            "{}'s {}",
            product.gender.label, product.category.name
        )),
        description: None,
        price_label: Some(price_label(product)),
        image_url: image_of(product),
        image_alt: product.name.clone(),
        badge: None,
        colors_label: Some(colors_label(product.colors.len())),
        href: product_href(product),
    }
}

fn render_collection(tile: &CollectionTile) -> CardView {
    CardView {
        kind: CardKind::Collection,
        title: tile.title.clone(),
        subtitle: None,
        description: tile.description.clone(),
        price_label: None,
        image_url: tile
            .image_url
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        image_alt: tile.title.clone(),
        badge: None,
        colors_label: None,
        href: tile.href.clone(),
    }
}

fn render_featured(product: &ProductWithDetails, badge: &str) -> CardView {
    CardView {
        kind: CardKind::Featured,
        subtitle: Some(product.category.name.clone()),
        description: product.description.clone(),
        badge: Some(badge.to_string()),
        colors_label: None,
        ..render_product(product)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;
    use crate::domain::catalog::entities::{Brand, Gender, ProductImage};

    fn sample_product(min: i64, max: i64) -> ProductWithDetails {
        ProductWithDetails {
            id: Uuid::from_u128(1),
            name: "Air Max 90".to_string(),
            description: Some("Classic runner".to_string()),
            is_published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            category: Category {
                id: Uuid::from_u128(2),
                name: "Shoes".to_string(),
                slug: "shoes".to_string(),
            },
            brand: Brand {
                id: Uuid::from_u128(3),
                name: "Nike".to_string(),
                slug: "nike".to_string(),
            },
            gender: Gender {
                id: Uuid::from_u128(4),
                label: "Men".to_string(),
                slug: "men".to_string(),
            },
            min_price: Decimal::from(min),
            max_price: Decimal::from(max),
            images: vec![],
            colors: vec!["Red".to_string(), "Blue".to_string()],
        }
    }

    #[test]
    fn test_product_card() {
        let product = sample_product(80, 100);
        let view = ProductCard::Product(&product).render();

        assert_eq!(view.kind, CardKind::Product);
        assert_eq!(view.subtitle.as_deref(), Some("Men's Shoes"));
        assert_eq!(view.price_label.as_deref(), Some("80 - 100"));
        assert_eq!(view.colors_label.as_deref(), Some("2 Colours"));
        assert_eq!(view.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(view.href, format!("/products/{}", product.id));
    }

    #[test]
    fn test_single_price_and_primary_image() {
        let mut product = sample_product(120, 120);
        product.colors.truncate(1);
        product.images = vec![ProductImage {
            id: Uuid::from_u128(9),
            url: "/img/air-max.jpg".to_string(),
            sort_order: 0,
            is_primary: false,
            variant_id: None,
        }];

        let view = ProductCard::Product(&product).render();
        assert_eq!(view.price_label.as_deref(), Some("120"));
        assert_eq!(view.colors_label.as_deref(), Some("1 Colour"));
        assert_eq!(view.image_url, "/img/air-max.jpg");
    }

    #[test]
    fn test_featured_card_carries_badge() {
        let product = sample_product(80, 100);
        let view = ProductCard::Featured {
            product: &product,
            badge: "Just In",
        }
        .render();

        assert_eq!(view.kind, CardKind::Featured);
        assert_eq!(view.badge.as_deref(), Some("Just In"));
        assert_eq!(view.description.as_deref(), Some("Classic runner"));
        assert_eq!(view.price_label.as_deref(), Some("80 - 100"));
        assert_eq!(view.colors_label, None);
    }

    #[test]
    fn test_collection_card_links_to_filtered_listing() {
        let tile = CollectionTile::for_category(&Category {
            id: Uuid::from_u128(2),
            name: "Running Shoes".to_string(),
            slug: "running-shoes".to_string(),
        });
        let card = ProductCard::Collection(&tile);
        let view = card.render();

        assert_eq!(card.kind(), CardKind::Collection);
        assert_eq!(view.title, "Running Shoes");
        assert_eq!(view.price_label, None);
        assert_eq!(view.href, "/products?category=running-shoes");
        assert_eq!(
            FilterParams::decode(view.href.trim_start_matches("/products?")).category,
            Some(vec!["running-shoes".to_string()])
        );
    }
}
