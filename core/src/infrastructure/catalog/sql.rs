//! Renders catalog predicates into PostgreSQL statements.
//!
//! Aliases used throughout: `p` products, `c` categories, `b` brands,
//! `g` genders, `v` variants, `co` colors, `s` sizes, `i` images. The
//! variant existence check uses its own `fv`/`fc`/`fs` aliases so it can
//! be nested inside any of the product queries.

use sea_orm::{DatabaseBackend, Statement, Value};
use uuid::Uuid;

use crate::domain::catalog::predicate::{
    FilterCondition, FilterOperator, FilterValue, ProductField, ProductOrder, ProductPredicate,
    ProductQuery, VariantField, VariantPredicate,
};

const PRODUCT_COLUMNS: &str = r#"
    p.id AS product_id,
    p.name AS product_name,
    p.description AS product_description,
    p.is_published AS product_is_published,
    p.created_at AS product_created_at,
    p.updated_at AS product_updated_at,
    c.id AS category_id,
    c.name AS category_name,
    c.slug AS category_slug,
    b.id AS brand_id,
    b.name AS brand_name,
    b.slug AS brand_slug,
    g.id AS gender_id,
    g.label AS gender_label,
    g.slug AS gender_slug"#;

const VARIANT_COLUMNS: &str = r#"
    v.id AS variant_id,
    v.sku AS variant_sku,
    v.price AS variant_price,
    v.sale_price AS variant_sale_price,
    v.in_stock AS variant_in_stock,
    co.id AS color_id,
    co.name AS color_name,
    co.slug AS color_slug,
    co.hex_code AS color_hex_code,
    s.id AS size_id,
    s.name AS size_name,
    s.slug AS size_slug,
    s.sort_order AS size_sort_order"#;

const IMAGE_COLUMNS: &str = r#"
    i.id AS image_id,
    i.url AS image_url,
    i.sort_order AS image_sort_order,
    i.is_primary AS image_is_primary,
    i.variant_id AS image_variant_id"#;

const PRODUCT_JOINS: &str = r#"
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
    LEFT JOIN brands b ON b.id = p.brand_id
    LEFT JOIN genders g ON g.id = p.gender_id"#;

const VARIANT_JOINS: &str = r#"
    LEFT JOIN product_variants v ON v.product_id = p.id
    LEFT JOIN colors co ON co.id = v.color_id
    LEFT JOIN sizes s ON s.id = v.size_id"#;

/// Positional bind values collected while rendering.
#[derive(Debug, Default)]
struct Binds {
    values: Vec<Value>,
}

impl Binds {
    fn push(&mut self, value: impl Into<Value>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }

    fn list(&mut self, items: &[String]) -> Option<String> {
        if items.is_empty() {
            return None;
        }
        let placeholders = items
            .iter()
            .map(|item| self.push(item.clone()))
            .collect::<Vec<_>>();
        Some(placeholders.join(", "))
    }

    fn ids(&mut self, ids: &[Uuid]) -> String {
        ids.iter()
            .map(|id| self.push(*id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn statement(sql: String, binds: Binds) -> Statement {
    Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, binds.values)
}

/// `%` and `_` match literally inside the search text.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn product_column(field: ProductField) -> &'static str {
    match field {
        ProductField::IsPublished => "p.is_published",
        ProductField::Name => "p.name",
        ProductField::CategorySlug => "c.slug",
        ProductField::BrandSlug => "b.slug",
        ProductField::GenderSlug => "g.slug",
    }
}

fn variant_column(field: VariantField) -> &'static str {
    match field {
        VariantField::ColorSlug => "fc.slug",
        VariantField::SizeSlug => "fs.slug",
        VariantField::Price => "fv.price",
    }
}

fn render_condition(column: &str, operator: FilterOperator, value: &FilterValue, binds: &mut Binds) -> String {
    match (operator, value) {
        (FilterOperator::In, FilterValue::List(items)) => match binds.list(items) {
            Some(placeholders) => format!("{column} IN ({placeholders})"),
            None => "FALSE".to_string(),
        },
        (FilterOperator::Ilike, FilterValue::Text(text)) => {
            let pattern = binds.push(format!("%{}%", escape_like(text)));
            format!(r"{column} ILIKE {pattern} ESCAPE '\'")
        }
        (operator, value) => {
            let symbol = match operator {
                FilterOperator::Gte => ">=",
                FilterOperator::Lte => "<=",
                _ => "=",
            };
            let placeholder = match value {
                FilterValue::Bool(flag) => binds.push(*flag),
                FilterValue::Text(text) => binds.push(text.clone()),
                FilterValue::Decimal(amount) => binds.push(*amount),
                FilterValue::List(items) => binds.push(items.join(",")),
            };
            format!("{column} {symbol} {placeholder}")
        }
    }
}

fn render_variant_conditions(
    conditions: &[FilterCondition<VariantField>],
    binds: &mut Binds,
) -> Vec<String> {
    conditions
        .iter()
        .map(|c| render_condition(variant_column(c.field), c.operator, &c.value, binds))
        .collect()
}

/// One existence check: a single variant row has to satisfy every condition.
fn render_variant_exists(predicate: &VariantPredicate, binds: &mut Binds) -> String {
    let mut clauses = vec!["fv.product_id = p.id".to_string()];
    clauses.extend(render_variant_conditions(&predicate.conditions, binds));

    format!(
        "EXISTS (SELECT 1 FROM product_variants fv \
         JOIN colors fc ON fc.id = fv.color_id \
         JOIN sizes fs ON fs.id = fv.size_id \
         WHERE {})",
        clauses.join(" AND ")
    )
}

fn render_where(predicate: &ProductPredicate, binds: &mut Binds) -> String {
    let mut clauses = predicate
        .product
        .iter()
        .map(|c| render_condition(product_column(c.field), c.operator, &c.value, binds))
        .collect::<Vec<_>>();

    if let Some(variant) = predicate.variant.as_ref().filter(|v| !v.is_empty()) {
        clauses.push(render_variant_exists(variant, binds));
    }

    if clauses.is_empty() {
        "TRUE".to_string()
    } else {
        clauses.join(" AND ")
    }
}

fn render_order(order: ProductOrder) -> &'static str {
    match order {
        ProductOrder::MinPriceAsc => "pr.min_price ASC NULLS LAST, p.id ASC",
        ProductOrder::MaxPriceDesc => "pr.max_price DESC NULLS LAST, p.id ASC",
        ProductOrder::CreatedAtDesc => "p.created_at DESC, p.id ASC",
    }
}

pub fn any_variant_matches(predicate: &VariantPredicate) -> Statement {
    let mut binds = Binds::default();
    let mut clauses = vec![format!("p.is_published = {}", binds.push(true))];
    clauses.extend(render_variant_conditions(&predicate.conditions, &mut binds));

    let sql = format!(
        "SELECT EXISTS (SELECT 1 FROM product_variants fv \
         JOIN products p ON p.id = fv.product_id \
         JOIN colors fc ON fc.id = fv.color_id \
         JOIN sizes fs ON fs.id = fv.size_id \
         WHERE {}) AS matched",
        clauses.join(" AND ")
    );
    statement(sql, binds)
}

pub fn count_products(predicate: &ProductPredicate) -> Statement {
    let mut binds = Binds::default();
    let filter = render_where(predicate, &mut binds);
    let sql = format!("SELECT COUNT(*) AS count {PRODUCT_JOINS} WHERE {filter}");
    statement(sql, binds)
}

pub fn product_page(query: &ProductQuery) -> Statement {
    let mut binds = Binds::default();
    let filter = render_where(&query.predicate, &mut binds);
    let sql = format!(
        "SELECT p.id AS product_id {PRODUCT_JOINS} \
         LEFT JOIN (SELECT product_id, MIN(price) AS min_price, MAX(price) AS max_price \
                    FROM product_variants GROUP BY product_id) pr ON pr.product_id = p.id \
         WHERE {filter} \
         ORDER BY {} \
         LIMIT {} OFFSET {}",
        render_order(query.order),
        query.window.limit,
        query.window.offset,
    );
    statement(sql, binds)
}

pub fn variant_rows(product_ids: &[Uuid]) -> Statement {
    let mut binds = Binds::default();
    let ids = binds.ids(product_ids);
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS}, {VARIANT_COLUMNS} {PRODUCT_JOINS} \
         JOIN product_variants v ON v.product_id = p.id \
         LEFT JOIN colors co ON co.id = v.color_id \
         LEFT JOIN sizes s ON s.id = v.size_id \
         WHERE p.id IN ({ids}) \
         ORDER BY v.created_at ASC, v.id ASC"
    );
    statement(sql, binds)
}

pub fn image_rows(product_ids: &[Uuid]) -> Statement {
    let mut binds = Binds::default();
    let ids = binds.ids(product_ids);
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS}, {IMAGE_COLUMNS} {PRODUCT_JOINS} \
         JOIN product_images i ON i.product_id = p.id \
         WHERE p.id IN ({ids}) \
         ORDER BY i.sort_order ASC, i.id ASC"
    );
    statement(sql, binds)
}

pub fn product_rows(product_id: Uuid) -> Statement {
    let mut binds = Binds::default();
    let id = binds.push(product_id);
    let published = binds.push(true);
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS}, {VARIANT_COLUMNS}, {IMAGE_COLUMNS} {PRODUCT_JOINS} {VARIANT_JOINS} \
         LEFT JOIN product_images i ON i.product_id = p.id \
         WHERE p.id = {id} AND p.is_published = {published} \
         ORDER BY s.sort_order ASC, v.id ASC, i.sort_order ASC, i.id ASC"
    );
    statement(sql, binds)
}

pub fn variant_snapshot(variant_id: Uuid) -> Statement {
    Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        r#"
        SELECT
            v.id AS variant_id,
            v.product_id,
            p.name AS product_name,
            v.sku,
            v.price,
            v.sale_price,
            v.in_stock,
            p.is_published
        FROM product_variants v
        JOIN products p ON p.id = v.product_id
        WHERE v.id = $1
        "#,
        [variant_id.into()],
    )
}

pub fn reference_table(table: ReferenceTable) -> Statement {
    let sql = match table {
        ReferenceTable::Categories => "SELECT id, name, slug FROM categories ORDER BY name ASC",
        ReferenceTable::Brands => "SELECT id, name, slug FROM brands ORDER BY name ASC",
        ReferenceTable::Genders => "SELECT id, label, slug FROM genders ORDER BY label ASC",
        ReferenceTable::Colors => "SELECT id, name, slug, hex_code FROM colors ORDER BY name ASC",
        ReferenceTable::Sizes => "SELECT id, name, slug, sort_order FROM sizes ORDER BY sort_order ASC, name ASC",
    };
    Statement::from_string(DatabaseBackend::Postgres, sql)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceTable {
    Categories,
    Brands,
    Genders,
    Colors,
    Sizes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{filter_params::FilterParams, predicate::build_product_query};

    fn query(raw: &str) -> ProductQuery {
        build_product_query(&FilterParams::decode(raw))
    }

    #[test]
    fn test_color_and_size_land_in_one_exists_clause() {
        let stmt = count_products(&query("color=red&size=10").predicate);

        assert_eq!(stmt.sql.matches("EXISTS").count(), 1);
        let exists = &stmt.sql[stmt.sql.find("EXISTS").unwrap()..];
        assert!(exists.contains("fc.slug IN ($2)"));
        assert!(exists.contains("fs.slug IN ($3)"));
        assert_eq!(stmt.values.as_ref().map(|v| v.0.len()), Some(3));
    }

    #[test]
    fn test_no_variant_filters_means_no_exists() {
        let stmt = count_products(&query("category=running&brand=nike,puma").predicate);

        assert!(!stmt.sql.contains("EXISTS"));
        assert!(stmt.sql.contains("p.is_published = $1"));
        assert!(stmt.sql.contains("c.slug IN ($2)"));
        assert!(stmt.sql.contains("b.slug IN ($3, $4)"));
    }

    #[test]
    fn test_price_bounds_are_variant_conditions() {
        let stmt = count_products(&query("price=75-100").predicate);
        assert!(stmt.sql.contains("fv.price >= $2"));
        assert!(stmt.sql.contains("fv.price <= $3"));
    }

    #[test]
    fn test_search_is_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");

        let stmt = count_products(&query("search=air").predicate);
        assert!(stmt.sql.contains(r"p.name ILIKE $2 ESCAPE '\'"));
    }

    #[test]
    fn test_page_ordering_and_window() {
        let stmt = product_page(&query("sort=price_desc&page=2"));
        assert!(stmt.sql.contains("ORDER BY pr.max_price DESC NULLS LAST, p.id ASC"));
        assert!(stmt.sql.contains("LIMIT 12 OFFSET 12"));

        let stmt = product_page(&query("sort=price_asc"));
        assert!(stmt.sql.contains("ORDER BY pr.min_price ASC NULLS LAST"));

        let stmt = product_page(&query(""));
        assert!(stmt.sql.contains("ORDER BY p.created_at DESC"));
    }

    #[test]
    fn test_staged_lookup_only_checks_published_variants() {
        let predicate = query("color=red&size=10").predicate.variant.unwrap();
        let stmt = any_variant_matches(&predicate);

        assert!(stmt.sql.starts_with("SELECT EXISTS"));
        assert!(stmt.sql.contains("p.is_published = $1 AND fc.slug IN ($2) AND fs.slug IN ($3)"));
    }

    #[test]
    fn test_row_queries_bind_every_id() {
        let ids = [Uuid::from_u128(1), Uuid::from_u128(2)];
        let stmt = variant_rows(&ids);
        assert!(stmt.sql.contains("WHERE p.id IN ($1, $2)"));

        let stmt = image_rows(&ids);
        assert!(stmt.sql.contains("JOIN product_images i"));
    }
}
