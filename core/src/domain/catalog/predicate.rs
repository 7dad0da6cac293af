//! Translation of decoded listing parameters into storage-agnostic query
//! conditions.
//!
//! Nothing here touches the database: the output is handed to a
//! [`CatalogRepository`](crate::domain::catalog::ports::CatalogRepository)
//! which renders it for its backend.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::catalog::{
    entities::PriceRangeOption,
    filter_params::{FilterParams, SortOption},
};

/// Products shown per listing page
pub const PAGE_SIZE: u64 = 12;

/// Price buckets offered by the filter sidebar, as `(value, label)`.
pub const PRICE_BUCKETS: [(&str, &str); 4] = [
    ("0-75", "Under $75"),
    ("75-100", "$75 - $100"),
    ("100-150", "$100 - $150"),
    ("150+", "Over $150"),
];

pub fn price_range_options() -> Vec<PriceRangeOption> {
    PRICE_BUCKETS
        .iter()
        .map(|(value, label)| PriceRangeOption {
            label: label.to_string(),
            value: value.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,    // equals
    Gte,   // greater than or equal
    Lte,   // less than or equal
    In,    // any of a list
    Ilike, // case-insensitive substring
}

/// Columns reachable from the product row itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    IsPublished,
    Name,
    CategorySlug,
    BrandSlug,
    GenderSlug,
}

/// Columns of a single variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantField {
    ColorSlug,
    SizeSlug,
    Price,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
    Decimal(Decimal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition<F> {
    pub field: F,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl<F> FilterCondition<F> {
    pub fn new(field: F, operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            field,
            operator,
            value,
        }
    }
}

/// Conditions that one and the same variant has to satisfy together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantPredicate {
    pub conditions: Vec<FilterCondition<VariantField>>,
}

impl VariantPredicate {
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Product conditions are ANDed; `variant`, when present, requires at least
/// one variant matching all of its conditions at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPredicate {
    pub product: Vec<FilterCondition<ProductField>>,
    pub variant: Option<VariantPredicate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOrder {
    MinPriceAsc,
    MaxPriceDesc,
    CreatedAtDesc,
}

impl From<SortOption> for ProductOrder {
    fn from(sort: SortOption) -> Self {
        match sort {
            SortOption::PriceAsc => ProductOrder::MinPriceAsc,
            SortOption::PriceDesc => ProductOrder::MaxPriceDesc,
            // no ranking signal exists for "featured" yet
            SortOption::Featured | SortOption::Newest => ProductOrder::CreatedAtDesc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub offset: u64,
    pub limit: u64,
}

impl PageWindow {
    /// 1-indexed; a missing or zero page is the first one.
    pub fn for_page(page: Option<u32>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        Self {
            page,
            offset: u64::from(page - 1) * PAGE_SIZE,
            limit: PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub predicate: ProductPredicate,
    pub order: ProductOrder,
    pub window: PageWindow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceBounds {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceBounds {
    /// Outer bounds of every recognizable bucket.
    ///
    /// Selecting `0-75` and `100-150` yields `[0, 150]`, which also admits
    /// the gap between them. Exact only when the buckets are contiguous.
    pub fn from_buckets<S: AsRef<str>>(buckets: &[S]) -> Self {
        let mut bounds = PriceBounds::default();
        let mut open_ended = false;

        for (min, max) in buckets
            .iter()
            .filter_map(|bucket| parse_price_bucket(bucket.as_ref()))
        {
            bounds.min = Some(bounds.min.map_or(min, |current| current.min(min)));
            match max {
                Some(max) => {
                    bounds.max = Some(bounds.max.map_or(max, |current| current.max(max)))
                }
                None => open_ended = true,
            }
        }

        if open_ended {
            bounds.max = None;
        }
        bounds
    }
}

/// `"75-100"` → `(75, Some(100))`, `"150+"` → `(150, None)`.
pub fn parse_price_bucket(bucket: &str) -> Option<(Decimal, Option<Decimal>)> {
    let bucket = bucket.trim();
    if let Some(min) = bucket.strip_suffix('+') {
        return Decimal::from_str(min.trim()).ok().map(|min| (min, None));
    }

    let (min, max) = bucket.split_once('-')?;
    let min = Decimal::from_str(min.trim()).ok()?;
    let max = Decimal::from_str(max.trim()).ok()?;
    (min <= max).then_some((min, Some(max)))
}

pub fn build_product_query(params: &FilterParams) -> ProductQuery {
    ProductQuery {
        predicate: build_predicate(params),
        order: ProductOrder::from(params.sort_option()),
        window: PageWindow::for_page(params.page),
    }
}

pub fn build_predicate(params: &FilterParams) -> ProductPredicate {
    let mut product = vec![FilterCondition::new(
        ProductField::IsPublished,
        FilterOperator::Eq,
        FilterValue::Bool(true),
    )];

    if let Some(search) = &params.search {
        product.push(FilterCondition::new(
            ProductField::Name,
            FilterOperator::Ilike,
            FilterValue::Text(search.clone()),
        ));
    }

    for (field, values) in [
        (ProductField::CategorySlug, &params.category),
        (ProductField::BrandSlug, &params.brand),
        (ProductField::GenderSlug, &params.gender),
    ] {
        if let Some(values) = values.as_ref().filter(|v| !v.is_empty()) {
            product.push(FilterCondition::new(
                field,
                FilterOperator::In,
                FilterValue::List(values.clone()),
            ));
        }
    }

    let mut variant = VariantPredicate::default();

    for (field, values) in [
        (VariantField::ColorSlug, &params.color),
        (VariantField::SizeSlug, &params.size),
    ] {
        if let Some(values) = values.as_ref().filter(|v| !v.is_empty()) {
            variant.conditions.push(FilterCondition::new(
                field,
                FilterOperator::In,
                FilterValue::List(values.clone()),
            ));
        }
    }

    let buckets = PriceBounds::from_buckets(params.price.as_deref().unwrap_or_default());
    let bounds = PriceBounds {
        min: params.price_min.or(buckets.min),
        max: params.price_max.or(buckets.max),
    };
    if let Some(min) = bounds.min {
        variant.conditions.push(FilterCondition::new(
            VariantField::Price,
            FilterOperator::Gte,
            FilterValue::Decimal(min),
        ));
    }
    if let Some(max) = bounds.max {
        variant.conditions.push(FilterCondition::new(
            VariantField::Price,
            FilterOperator::Lte,
            FilterValue::Decimal(max),
        ));
    }

    ProductPredicate {
        product,
        variant: (!variant.is_empty()).then_some(variant),
    }
}
