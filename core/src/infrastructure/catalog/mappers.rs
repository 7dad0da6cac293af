use chrono::NaiveDateTime;
use sea_orm::{DbErr, QueryResult, TryGetable};
use uuid::Uuid;

use crate::domain::catalog::{
    entities::{Brand, Category, Color, Gender, ProductImage, Size},
    value_objects::{CatalogRow, ProductRecord, VariantRecord, VariantSnapshot},
};

/// Joined groups selected by a row statement.
///
/// Groups outside the shape are never read. Inside it, a NULL key means no
/// joined row, and any other decode failure is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    /// Variants inner joined, no image columns.
    Variants,
    /// Images inner joined, no variant columns.
    Images,
    /// Variants and images both left joined.
    Full,
}

fn nullable<T: TryGetable>(row: &QueryResult, column: &str) -> Result<Option<T>, DbErr> {
    row.try_get::<Option<T>>("", column)
}

fn key(row: &QueryResult, column: &str, required: bool) -> Result<Option<Uuid>, DbErr> {
    if required {
        row.try_get("", column).map(Some)
    } else {
        nullable(row, column)
    }
}

fn product(row: &QueryResult) -> Result<ProductRecord, DbErr> {
    let created_at: NaiveDateTime = row.try_get("", "product_created_at")?;
    let updated_at: NaiveDateTime = row.try_get("", "product_updated_at")?;

    Ok(ProductRecord {
        id: row.try_get("", "product_id")?,
        name: row.try_get("", "product_name")?,
        description: nullable(row, "product_description")?,
        is_published: row.try_get("", "product_is_published")?,
        created_at: created_at.and_utc(),
        updated_at: updated_at.and_utc(),
    })
}

fn category(row: &QueryResult) -> Result<Option<Category>, DbErr> {
    let Some(id) = nullable(row, "category_id")? else {
        return Ok(None);
    };
    Ok(Some(Category {
        id,
        name: row.try_get("", "category_name")?,
        slug: row.try_get("", "category_slug")?,
    }))
}

fn brand(row: &QueryResult) -> Result<Option<Brand>, DbErr> {
    let Some(id) = nullable(row, "brand_id")? else {
        return Ok(None);
    };
    Ok(Some(Brand {
        id,
        name: row.try_get("", "brand_name")?,
        slug: row.try_get("", "brand_slug")?,
    }))
}

fn gender(row: &QueryResult) -> Result<Option<Gender>, DbErr> {
    let Some(id) = nullable(row, "gender_id")? else {
        return Ok(None);
    };
    Ok(Some(Gender {
        id,
        label: row.try_get("", "gender_label")?,
        slug: row.try_get("", "gender_slug")?,
    }))
}

fn color(row: &QueryResult) -> Result<Option<Color>, DbErr> {
    let Some(id) = nullable(row, "color_id")? else {
        return Ok(None);
    };
    Ok(Some(Color {
        id,
        name: row.try_get("", "color_name")?,
        slug: row.try_get("", "color_slug")?,
        hex_code: row.try_get("", "color_hex_code")?,
    }))
}

fn size(row: &QueryResult) -> Result<Option<Size>, DbErr> {
    let Some(id) = nullable(row, "size_id")? else {
        return Ok(None);
    };
    Ok(Some(Size {
        id,
        name: row.try_get("", "size_name")?,
        slug: row.try_get("", "size_slug")?,
        sort_order: row.try_get("", "size_sort_order")?,
    }))
}

fn variant(row: &QueryResult, required: bool) -> Result<Option<VariantRecord>, DbErr> {
    let Some(id) = key(row, "variant_id", required)? else {
        return Ok(None);
    };
    Ok(Some(VariantRecord {
        id,
        sku: row.try_get("", "variant_sku")?,
        price: row.try_get("", "variant_price")?,
        sale_price: nullable(row, "variant_sale_price")?,
        in_stock: row.try_get("", "variant_in_stock")?,
        color: color(row)?,
        size: size(row)?,
    }))
}

fn image(row: &QueryResult, required: bool) -> Result<Option<ProductImage>, DbErr> {
    let Some(id) = key(row, "image_id", required)? else {
        return Ok(None);
    };
    Ok(Some(ProductImage {
        id,
        url: row.try_get("", "image_url")?,
        sort_order: row.try_get("", "image_sort_order")?,
        is_primary: row.try_get("", "image_is_primary")?,
        variant_id: nullable(row, "image_variant_id")?,
    }))
}

/// Maps one joined row selected with the given shape.
pub fn catalog_row(row: &QueryResult, shape: RowShape) -> Result<CatalogRow, DbErr> {
    let (variant, image) = match shape {
        RowShape::Variants => (variant(row, true)?, None),
        RowShape::Images => (None, image(row, true)?),
        RowShape::Full => (variant(row, false)?, image(row, false)?),
    };

    Ok(CatalogRow {
        product: product(row)?,
        category: category(row)?,
        brand: brand(row)?,
        gender: gender(row)?,
        variant,
        image,
    })
}

pub fn variant_snapshot(row: &QueryResult) -> Result<VariantSnapshot, DbErr> {
    Ok(VariantSnapshot {
        variant_id: row.try_get("", "variant_id")?,
        product_id: row.try_get("", "product_id")?,
        product_name: row.try_get("", "product_name")?,
        sku: row.try_get("", "sku")?,
        price: row.try_get("", "price")?,
        sale_price: row.try_get("", "sale_price")?,
        in_stock: row.try_get("", "in_stock")?,
        is_published: row.try_get("", "is_published")?,
    })
}

pub fn category_entry(row: &QueryResult) -> Result<Category, DbErr> {
    Ok(Category {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        slug: row.try_get("", "slug")?,
    })
}

pub fn brand_entry(row: &QueryResult) -> Result<Brand, DbErr> {
    Ok(Brand {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        slug: row.try_get("", "slug")?,
    })
}

pub fn gender_entry(row: &QueryResult) -> Result<Gender, DbErr> {
    Ok(Gender {
        id: row.try_get("", "id")?,
        label: row.try_get("", "label")?,
        slug: row.try_get("", "slug")?,
    })
}

pub fn color_entry(row: &QueryResult) -> Result<Color, DbErr> {
    Ok(Color {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        slug: row.try_get("", "slug")?,
        hex_code: row.try_get("", "hex_code")?,
    })
}

pub fn size_entry(row: &QueryResult) -> Result<Size, DbErr> {
    Ok(Size {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        slug: row.try_get("", "slug")?,
        sort_order: row.try_get("", "sort_order")?,
    })
}
