use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, QueryResult, Statement};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        catalog::{
            entities::FilterOptions,
            ports::CatalogRepository,
            predicate::{ProductPredicate, ProductQuery, VariantPredicate},
            value_objects::{CatalogRow, VariantSnapshot},
        },
        common::entities::app_errors::CoreError,
    },
    infrastructure::catalog::{
        mappers::{self, RowShape},
        sql::{self, ReferenceTable},
    },
};

#[derive(Debug, Clone)]
pub struct PostgresCatalogRepository {
    pub db: DatabaseConnection,
}

impl PostgresCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn query_all(&self, stmt: Statement, context: &str) -> Result<Vec<QueryResult>, CoreError> {
        self.db.query_all(stmt).await.map_err(|e| {
            error!("Failed to {}: {}", context, e);
            CoreError::Storage(e.to_string())
        })
    }

    async fn query_one(&self, stmt: Statement, context: &str) -> Result<Option<QueryResult>, CoreError> {
        self.db.query_one(stmt).await.map_err(|e| {
            error!("Failed to {}: {}", context, e);
            CoreError::Storage(e.to_string())
        })
    }

    async fn fetch_rows(
        &self,
        stmt: Statement,
        shape: RowShape,
        context: &str,
    ) -> Result<Vec<CatalogRow>, CoreError> {
        self.query_all(stmt, context)
            .await?
            .iter()
            .map(|row| mappers::catalog_row(row, shape))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_decode_error(context, e))
    }

    async fn fetch_reference<T>(
        &self,
        table: ReferenceTable,
        map: fn(&QueryResult) -> Result<T, DbErr>,
    ) -> Result<Vec<T>, CoreError> {
        let context = "fetch filter options";
        self.query_all(sql::reference_table(table), context)
            .await?
            .iter()
            .map(map)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_decode_error(context, e))
    }
}

fn map_decode_error(context: &str, e: DbErr) -> CoreError {
    error!("Failed to decode rows while trying to {}: {}", context, e);
    CoreError::Storage(e.to_string())
}

/// Aggregate queries always yield exactly one row.
fn missing_row(context: &str) -> CoreError {
    error!("Failed to {}: query returned no row", context);
    CoreError::Storage(format!("{context}: query returned no row"))
}

impl CatalogRepository for PostgresCatalogRepository {
    async fn any_variant_matches(&self, predicate: VariantPredicate) -> Result<bool, CoreError> {
        let context = "check variant filters";
        let row = self
            .query_one(sql::any_variant_matches(&predicate), context)
            .await?
            .ok_or_else(|| missing_row(context))?;

        row.try_get::<bool>("", "matched")
            .map_err(|e| map_decode_error(context, e))
    }

    async fn count_products(&self, predicate: ProductPredicate) -> Result<i64, CoreError> {
        let context = "count products";
        let row = self
            .query_one(sql::count_products(&predicate), context)
            .await?
            .ok_or_else(|| missing_row(context))?;

        row.try_get::<i64>("", "count")
            .map_err(|e| map_decode_error(context, e))
    }

    async fn find_product_page(&self, query: ProductQuery) -> Result<Vec<Uuid>, CoreError> {
        let context = "fetch product page";
        self.query_all(sql::product_page(&query), context)
            .await?
            .iter()
            .map(|row| row.try_get::<Uuid>("", "product_id"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_decode_error(context, e))
    }

    async fn fetch_variant_rows(&self, product_ids: Vec<Uuid>) -> Result<Vec<CatalogRow>, CoreError> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_rows(
            sql::variant_rows(&product_ids),
            RowShape::Variants,
            "fetch variant rows",
        )
            .await
    }

    async fn fetch_image_rows(&self, product_ids: Vec<Uuid>) -> Result<Vec<CatalogRow>, CoreError> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_rows(
            sql::image_rows(&product_ids),
            RowShape::Images,
            "fetch image rows",
        )
            .await
    }

    async fn fetch_product_rows(&self, product_id: Uuid) -> Result<Vec<CatalogRow>, CoreError> {
        self.fetch_rows(sql::product_rows(product_id), RowShape::Full, "fetch product")
            .await
    }

    async fn find_variant(&self, variant_id: Uuid) -> Result<Option<VariantSnapshot>, CoreError> {
        let context = "fetch variant";
        self.query_one(sql::variant_snapshot(variant_id), context)
            .await?
            .map(|row| mappers::variant_snapshot(&row))
            .transpose()
            .map_err(|e| map_decode_error(context, e))
    }

    async fn fetch_filter_options(&self) -> Result<FilterOptions, CoreError> {
        let (categories, brands, genders, colors, sizes) = tokio::try_join!(
            self.fetch_reference(ReferenceTable::Categories, mappers::category_entry),
            self.fetch_reference(ReferenceTable::Brands, mappers::brand_entry),
            self.fetch_reference(ReferenceTable::Genders, mappers::gender_entry),
            self.fetch_reference(ReferenceTable::Colors, mappers::color_entry),
            self.fetch_reference(ReferenceTable::Sizes, mappers::size_entry),
        )?;

        Ok(FilterOptions {
            categories,
            brands,
            genders,
            colors,
            sizes,
            price_ranges: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    use super::*;

    type Row = BTreeMap<&'static str, Value>;

    fn repository(results: Vec<Vec<Row>>) -> PostgresCatalogRepository {
        PostgresCatalogRepository::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(results)
                .into_connection(),
        )
    }

    fn product_row(id: u128) -> Row {
        let created = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        BTreeMap::from([
            ("product_id", Uuid::from_u128(id).into()),
            ("product_name", "Pegasus 41".into()),
            ("product_description", Value::String(None)),
            ("product_is_published", true.into()),
            ("product_created_at", created.into()),
            ("product_updated_at", created.into()),
            ("category_id", Uuid::from_u128(10).into()),
            ("category_name", "Running".into()),
            ("category_slug", "running".into()),
            ("brand_id", Uuid::from_u128(20).into()),
            ("brand_name", "Nike".into()),
            ("brand_slug", "nike".into()),
            ("gender_id", Uuid::from_u128(30).into()),
            ("gender_label", "Men".into()),
            ("gender_slug", "men".into()),
        ])
    }

    fn variant_row(id: u128, price: Value) -> Row {
        let mut row = product_row(id);
        row.insert("variant_id", Uuid::from_u128(100).into());
        row.insert("variant_sku", "PEG-41-RED-9".into());
        row.insert("variant_price", price);
        row.insert("variant_sale_price", Value::Decimal(None));
        row.insert("variant_in_stock", 4i32.into());
        row
    }

    fn id_list() -> Vec<Uuid> {
        vec![Uuid::from_u128(1)]
    }

    #[tokio::test]
    async fn test_variant_check_reads_matched_flag() {
        let repository = repository(vec![vec![BTreeMap::from([("matched", true.into())])]]);

        let matched = repository
            .any_variant_matches(VariantPredicate::default())
            .await;
        assert_eq!(matched, Ok(true));
    }

    #[tokio::test]
    async fn test_undecodable_variant_check_is_a_storage_error() {
        let repository = repository(vec![
            vec![BTreeMap::from([("matched", "yes".into())])],
            vec![],
        ]);

        // an unreadable flag must not read as "nothing matches"
        assert!(matches!(
            repository
                .any_variant_matches(VariantPredicate::default())
                .await,
            Err(CoreError::Storage(_))
        ));
        assert!(matches!(
            repository
                .any_variant_matches(VariantPredicate::default())
                .await,
            Err(CoreError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_count_requires_a_row() {
        let repository = repository(vec![
            vec![BTreeMap::from([("count", 3i64.into())])],
            vec![],
        ]);
        let predicate = ProductPredicate {
            product: Vec::new(),
            variant: None,
        };

        assert_eq!(repository.count_products(predicate.clone()).await, Ok(3));
        assert!(matches!(
            repository.count_products(predicate).await,
            Err(CoreError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_variant_rows_decode() {
        let repository = repository(vec![vec![variant_row(1, Decimal::from(120).into())]]);

        let rows = repository.fetch_variant_rows(id_list()).await.unwrap();
        assert_eq!(rows.len(), 1);

        let variant = rows[0].variant.as_ref().unwrap();
        assert_eq!(variant.price, Decimal::from(120));
        assert_eq!(variant.sale_price, None);
        assert_eq!(variant.color, None);
        assert_eq!(rows[0].image, None);
        assert_eq!(rows[0].category.as_ref().map(|c| c.slug.as_str()), Some("running"));
    }

    #[tokio::test]
    async fn test_bad_variant_column_is_not_dropped_silently() {
        let repository = repository(vec![vec![variant_row(1, "ninety".into())]]);

        assert!(matches!(
            repository.fetch_variant_rows(id_list()).await,
            Err(CoreError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_product_rows_without_joined_variants_or_images() {
        let repository = repository(vec![vec![product_row(1)]]);

        let rows = repository
            .fetch_product_rows(Uuid::from_u128(1))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].variant, None);
        assert_eq!(rows[0].image, None);
        assert_eq!(rows[0].product.description, None);
    }

    #[tokio::test]
    async fn test_empty_id_list_skips_the_query() {
        let repository = repository(vec![]);

        assert_eq!(repository.fetch_variant_rows(Vec::new()).await, Ok(Vec::new()));
        assert_eq!(repository.fetch_image_rows(Vec::new()).await, Ok(Vec::new()));
    }
}
