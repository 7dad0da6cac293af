//! Folds flat joined rows into nested per-product views.

use std::{cmp::Reverse, collections::HashMap};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::catalog::{
    entities::{Brand, Category, Gender, ProductDetails, ProductImage, ProductVariant, ProductWithDetails},
    value_objects::{CatalogRow, ImageScope, ProductRecord, VariantRecord},
};

#[derive(Debug)]
struct ProductGroup<'a> {
    product: &'a ProductRecord,
    category: Option<&'a Category>,
    brand: Option<&'a Brand>,
    gender: Option<&'a Gender>,
    variants: Vec<&'a VariantRecord>,
    images: Vec<&'a ProductImage>,
}

impl<'a> ProductGroup<'a> {
    fn new(row: &'a CatalogRow) -> Self {
        Self {
            product: &row.product,
            category: None,
            brand: None,
            gender: None,
            variants: Vec::new(),
            images: Vec::new(),
        }
    }

    fn absorb(&mut self, row: &'a CatalogRow) {
        self.category = self.category.or(row.category.as_ref());
        self.brand = self.brand.or(row.brand.as_ref());
        self.gender = self.gender.or(row.gender.as_ref());

        if let Some(variant) = &row.variant
            && !self.variants.iter().any(|v| v.id == variant.id)
        {
            self.variants.push(variant);
        }
        if let Some(image) = &row.image
            && !self.images.iter().any(|i| i.id == image.id)
        {
            self.images.push(image);
        }
    }

    fn price_range(&self) -> (Decimal, Decimal) {
        let mut prices = self.variants.iter().map(|v| v.price);
        let Some(first) = prices.next() else {
            return (Decimal::ZERO, Decimal::ZERO);
        };
        prices.fold((first, first), |(min, max), price| (min.min(price), max.max(price)))
    }

    fn color_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for color in self.variants.iter().filter_map(|v| v.color.as_ref()) {
            if !names.contains(&color.name) {
                names.push(color.name.clone());
            }
        }
        names
    }

    fn select_images(&self, scope: &ImageScope) -> Vec<ProductImage> {
        let generic = || -> Vec<&ProductImage> {
            self.images
                .iter()
                .copied()
                .filter(|image| image.variant_id.is_none())
                .collect()
        };

        let mut selected = match scope {
            ImageScope::All => self.images.clone(),
            ImageScope::Generic => generic(),
            ImageScope::Colors(slugs) => {
                let color_of: HashMap<Uuid, &str> = self
                    .variants
                    .iter()
                    .filter_map(|v| v.color.as_ref().map(|c| (v.id, c.slug.as_str())))
                    .collect();
                let tied = self
                    .images
                    .iter()
                    .copied()
                    .filter(|image| {
                        image
                            .variant_id
                            .and_then(|id| color_of.get(&id))
                            .is_some_and(|slug| slugs.iter().any(|s| s == slug))
                    })
                    .collect::<Vec<_>>();
                if tied.is_empty() { generic() } else { tied }
            }
        };

        selected.sort_by_key(|image| (Reverse(image.is_primary), image.sort_order));
        selected.into_iter().cloned().collect()
    }

    fn into_product(self, scope: &ImageScope) -> Option<ProductWithDetails> {
        let (category, brand, gender) = (self.category?, self.brand?, self.gender?);
        let (min_price, max_price) = self.price_range();

        Some(ProductWithDetails {
            id: self.product.id,
            name: self.product.name.clone(),
            description: self.product.description.clone(),
            is_published: self.product.is_published,
            created_at: self.product.created_at,
            updated_at: self.product.updated_at,
            category: category.clone(),
            brand: brand.clone(),
            gender: gender.clone(),
            min_price,
            max_price,
            images: self.select_images(scope),
            colors: self.color_names(),
        })
    }

    fn purchasable_variants(&self) -> Vec<ProductVariant> {
        self.variants
            .iter()
            .filter_map(|v| {
                Some(ProductVariant {
                    id: v.id,
                    sku: v.sku.clone(),
                    price: v.price,
                    sale_price: v.sale_price,
                    in_stock: v.in_stock,
                    color: v.color.clone()?,
                    size: v.size.clone()?,
                })
            })
            .collect()
    }
}

fn group_rows(rows: &[CatalogRow]) -> Vec<ProductGroup<'_>> {
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut groups: Vec<ProductGroup<'_>> = Vec::new();

    for row in rows {
        let position = *index.entry(row.product.id).or_insert_with(|| {
            groups.push(ProductGroup::new(row));
            groups.len() - 1
        });
        groups[position].absorb(row);
    }

    groups
}

/// One view per distinct product, in order of first appearance.
///
/// Products whose category, brand or gender never resolved are left out.
pub fn assemble_products(rows: &[CatalogRow], scope: &ImageScope) -> Vec<ProductWithDetails> {
    group_rows(rows)
        .into_iter()
        .filter_map(|group| group.into_product(scope))
        .collect()
}

/// Detail view of the first product in `rows`, with every image and the
/// variants that resolve both a color and a size.
pub fn assemble_product_details(rows: &[CatalogRow]) -> Option<ProductDetails> {
    let group = group_rows(rows).into_iter().next()?;
    let variants = group.purchasable_variants();
    let product = group.into_product(&ImageScope::All)?;

    Some(ProductDetails { product, variants })
}
