use uuid::Uuid;

use crate::domain::{
    catalog::{
        entities::{FilterOptions, ProductDetails, ProductsPage},
        filter_params::FilterParams,
        predicate::{ProductPredicate, ProductQuery, VariantPredicate},
        value_objects::{CatalogRow, VariantSnapshot},
    },
    common::entities::app_errors::CoreError,
};

#[cfg_attr(test, mockall::automock)]
pub trait CatalogService: Send + Sync {
    fn list_products(
        &self,
        params: FilterParams,
    ) -> impl Future<Output = Result<ProductsPage, CoreError>> + Send;

    fn get_product(
        &self,
        product_id: Uuid,
    ) -> impl Future<Output = Result<Option<ProductDetails>, CoreError>> + Send;

    fn get_filter_options(&self) -> impl Future<Output = Result<FilterOptions, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait CatalogRepository: Send + Sync {
    /// Whether any variant of a published product satisfies every condition
    /// of `predicate` at once.
    fn any_variant_matches(
        &self,
        predicate: VariantPredicate,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn count_products(
        &self,
        predicate: ProductPredicate,
    ) -> impl Future<Output = Result<i64, CoreError>> + Send;

    /// Ids of the requested page, in display order.
    fn find_product_page(
        &self,
        query: ProductQuery,
    ) -> impl Future<Output = Result<Vec<Uuid>, CoreError>> + Send;

    /// Product, reference and variant rows of the given products. No images.
    fn fetch_variant_rows(
        &self,
        product_ids: Vec<Uuid>,
    ) -> impl Future<Output = Result<Vec<CatalogRow>, CoreError>> + Send;

    /// Product, reference and image rows of the given products. No variants.
    fn fetch_image_rows(
        &self,
        product_ids: Vec<Uuid>,
    ) -> impl Future<Output = Result<Vec<CatalogRow>, CoreError>> + Send;

    /// Every row of one product: variants and images joined.
    fn fetch_product_rows(
        &self,
        product_id: Uuid,
    ) -> impl Future<Output = Result<Vec<CatalogRow>, CoreError>> + Send;

    fn find_variant(
        &self,
        variant_id: Uuid,
    ) -> impl Future<Output = Result<Option<VariantSnapshot>, CoreError>> + Send;

    fn fetch_filter_options(&self) -> impl Future<Output = Result<FilterOptions, CoreError>> + Send;
}
