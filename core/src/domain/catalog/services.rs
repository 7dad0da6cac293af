use std::collections::HashMap;

use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    cart::ports::CartStorage,
    catalog::{
        assembler::{assemble_product_details, assemble_products},
        entities::{FilterOptions, ProductDetails, ProductsPage},
        filter_params::FilterParams,
        ports::{CatalogRepository, CatalogService},
        predicate::{build_product_query, price_range_options},
        value_objects::ImageScope,
    },
    common::{entities::app_errors::CoreError, services::Service},
};

impl<CR, CS> CatalogService for Service<CR, CS>
where
    CR: CatalogRepository,
    CS: CartStorage,
{
    #[instrument(skip(self))]
    async fn list_products(&self, params: FilterParams) -> Result<ProductsPage, CoreError> {
        let query = build_product_query(&params);
        let window = query.window;

        // Staged lookup: skip the product queries when no variant can match
        if let Some(variant) = query.predicate.variant.clone()
            && !self.catalog_repository.any_variant_matches(variant).await?
        {
            tracing::debug!("no variant matches the variant filters");
            return Ok(ProductsPage::empty(window.page, window.limit, 0));
        }

        let predicate = query.predicate.clone();
        let (total_count, product_ids) = tokio::try_join!(
            self.catalog_repository.count_products(predicate),
            self.catalog_repository.find_product_page(query),
        )?;

        if product_ids.is_empty() {
            return Ok(ProductsPage::empty(window.page, window.limit, total_count));
        }

        let (variant_rows, image_rows) = tokio::try_join!(
            self.catalog_repository
                .fetch_variant_rows(product_ids.clone()),
            self.catalog_repository.fetch_image_rows(product_ids.clone()),
        )?;

        let position: HashMap<Uuid, usize> = product_ids
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();

        let mut rows = variant_rows;
        rows.extend(image_rows);
        rows.retain(|row| position.contains_key(&row.product.id));
        rows.sort_by_key(|row| position.get(&row.product.id).copied().unwrap_or(usize::MAX));

        let scope = match params.color {
            Some(colors) => ImageScope::Colors(colors),
            None => ImageScope::Generic,
        };
        let products = assemble_products(&rows, &scope);

        tracing::debug!(
            total_count,
            returned = products.len(),
            page = window.page,
            "products listed"
        );

        Ok(ProductsPage {
            products,
            total_count,
            page: window.page,
            page_size: window.limit,
        })
    }

    #[instrument(skip(self))]
    async fn get_product(&self, product_id: Uuid) -> Result<Option<ProductDetails>, CoreError> {
        let rows = self
            .catalog_repository
            .fetch_product_rows(product_id)
            .await?;

        Ok(assemble_product_details(&rows))
    }

    #[instrument(skip(self))]
    async fn get_filter_options(&self) -> Result<FilterOptions, CoreError> {
        let options = self.catalog_repository.fetch_filter_options().await?;

        Ok(FilterOptions {
            price_ranges: price_range_options(),
            ..options
        })
    }
}
