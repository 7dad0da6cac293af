use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::ToSchema;

/// Multi-valued filter axis, addressed by slug lists in the query string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    Gender,
    Color,
    Size,
    Price,
    Category,
    Brand,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 6] = [
        FilterDimension::Gender,
        FilterDimension::Color,
        FilterDimension::Size,
        FilterDimension::Price,
        FilterDimension::Category,
        FilterDimension::Brand,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FilterDimension::Gender => "gender",
            FilterDimension::Color => "color",
            FilterDimension::Size => "size",
            FilterDimension::Price => "price",
            FilterDimension::Category => "category",
            FilterDimension::Brand => "brand",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterDimension::Gender => "Gender",
            FilterDimension::Color => "Color",
            FilterDimension::Size => "Size",
            FilterDimension::Price => "Price",
            FilterDimension::Category => "Category",
            FilterDimension::Brand => "Brand",
        }
    }
}

impl FromStr for FilterDimension {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gender" => Ok(FilterDimension::Gender),
            "color" => Ok(FilterDimension::Color),
            "size" => Ok(FilterDimension::Size),
            "price" => Ok(FilterDimension::Price),
            "category" => Ok(FilterDimension::Category),
            "brand" => Ok(FilterDimension::Brand),
            _ => Err(()),
        }
    }
}

/// Sort choices offered to shoppers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    Featured,
    Newest,
    PriceAsc,
    PriceDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Featured,
        SortOption::Newest,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
    ];

    /// Resolve a raw `sort` value; anything unrecognized is `Featured`.
    pub fn from_key(key: Option<&str>) -> Self {
        key.and_then(|k| k.parse().ok())
            .unwrap_or(SortOption::Featured)
    }

    pub fn key(self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::Newest => "newest",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::Newest => "Newest",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
        }
    }
}

impl FromStr for SortOption {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(SortOption::Featured),
            "newest" | "latest" => Ok(SortOption::Newest),
            "price_asc" => Ok(SortOption::PriceAsc),
            "price_desc" => Ok(SortOption::PriceDesc),
            _ => Err(()),
        }
    }
}

/// One removable chip in the "active filters" bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActiveFilter {
    pub kind: String,
    pub label: String,
    pub value: String,
}

/// Decoded product listing query string.
///
/// `None` on a dimension means "no filter on this axis". A present list is
/// never empty: an empty list would mean "match nothing", which no query
/// string can express.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_min: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<Decimal>,
}

impl FilterParams {
    /// Parse a raw query string (leading `?` optional).
    ///
    /// Never fails: malformed numbers, unknown keys and empty values are
    /// dropped field by field.
    pub fn decode(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = FilterParams::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "search" => params.search = non_empty(&value),
                "sort" => params.sort = non_empty(&value),
                "page" => params.page = value.trim().parse::<u32>().ok(),
                "priceMin" => params.price_min = Decimal::from_str(value.trim()).ok(),
                "priceMax" => params.price_max = Decimal::from_str(value.trim()).ok(),
                other => {
                    if let Ok(dimension) = other.parse::<FilterDimension>() {
                        params.insert_values(dimension, split_list(&value));
                    }
                }
            }
        }

        params
    }

    /// Serialize back to a query string, keys in alphabetical order.
    ///
    /// Absent and empty values are left out entirely.
    pub fn encode(&self) -> String {
        let mut pairs: Vec<(&'static str, String)> = Vec::new();

        for dimension in FilterDimension::ALL {
            if let Some(values) = self.values(dimension) {
                let encoded = values
                    .iter()
                    .filter(|v| !v.is_empty())
                    .map(|v| encode_component(v))
                    .collect::<Vec<_>>();
                if !encoded.is_empty() {
                    pairs.push((dimension.key(), encoded.join(",")));
                }
            }
        }

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", encode_component(search)));
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("sort", encode_component(sort)));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(min) = self.price_min {
            pairs.push(("priceMin", min.to_string()));
        }
        if let Some(max) = self.price_max {
            pairs.push(("priceMax", max.to_string()));
        }

        pairs.sort_by_key(|(key, _)| *key);
        pairs
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn values(&self, dimension: FilterDimension) -> Option<&[String]> {
        match dimension {
            FilterDimension::Gender => self.gender.as_deref(),
            FilterDimension::Color => self.color.as_deref(),
            FilterDimension::Size => self.size.as_deref(),
            FilterDimension::Price => self.price.as_deref(),
            FilterDimension::Category => self.category.as_deref(),
            FilterDimension::Brand => self.brand.as_deref(),
        }
    }

    fn values_mut(&mut self, dimension: FilterDimension) -> &mut Option<Vec<String>> {
        match dimension {
            FilterDimension::Gender => &mut self.gender,
            FilterDimension::Color => &mut self.color,
            FilterDimension::Size => &mut self.size,
            FilterDimension::Price => &mut self.price,
            FilterDimension::Category => &mut self.category,
            FilterDimension::Brand => &mut self.brand,
        }
    }

    fn insert_values(&mut self, dimension: FilterDimension, incoming: Vec<String>) {
        if incoming.is_empty() {
            return;
        }
        let values = self.values_mut(dimension).get_or_insert_with(Vec::new);
        for value in incoming {
            if !values.contains(&value) {
                values.push(value);
            }
        }
    }

    pub fn sort_option(&self) -> SortOption {
        SortOption::from_key(self.sort.as_deref())
    }

    pub fn has_active_filters(&self) -> bool {
        FilterDimension::ALL
            .iter()
            .any(|dimension| self.values(*dimension).is_some())
            || self.search.is_some()
            || self.price_min.is_some()
            || self.price_max.is_some()
    }

    /// Select one more value on a dimension. Already selected values are
    /// not duplicated.
    pub fn add_filter(&self, dimension: FilterDimension, value: &str) -> Self {
        let mut next = self.clone();
        next.insert_values(dimension, split_list(value));
        next.page = Some(1);
        next
    }

    pub fn remove_filter(&self, dimension: FilterDimension, value: &str) -> Self {
        let mut next = self.clone();
        let slot = next.values_mut(dimension);
        let emptied = match slot.as_mut() {
            Some(values) => {
                values.retain(|v| v != value);
                values.is_empty()
            }
            None => false,
        };
        if emptied {
            *slot = None;
        }
        next.page = Some(1);
        next
    }

    pub fn clear_filter(&self, dimension: FilterDimension) -> Self {
        let mut next = self.clone();
        *next.values_mut(dimension) = None;
        next.page = Some(1);
        next
    }

    /// Drop every filter, the search text and the sort.
    pub fn clear_all() -> Self {
        FilterParams {
            page: Some(1),
            ..Default::default()
        }
    }

    pub fn set_sort(&self, sort: &str) -> Self {
        let mut next = self.clone();
        next.sort = non_empty(sort);
        next.page = Some(1);
        next
    }

    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut active = Vec::new();

        if let Some(search) = &self.search {
            active.push(ActiveFilter {
                kind: "search".to_string(),
                label: format!("Search: \"{search}\""),
                value: search.clone(),
            });
        }

        for dimension in [
            FilterDimension::Category,
            FilterDimension::Brand,
            FilterDimension::Gender,
            FilterDimension::Color,
            FilterDimension::Size,
            FilterDimension::Price,
        ] {
            for value in self.values(dimension).unwrap_or_default() {
                let label = match dimension {
                    FilterDimension::Price => format!("Price: ${value}"),
                    _ => format!("{}: {value}", dimension.label()),
                };
                active.push(ActiveFilter {
                    kind: dimension.key().to_string(),
                    label,
                    value: value.clone(),
                });
            }
        }

        if self.price_min.is_some() || self.price_max.is_some() {
            let min = self
                .price_min
                .map(|m| m.to_string())
                .unwrap_or_else(|| "0".to_string());
            let max = self
                .price_max
                .map(|m| m.to_string())
                .unwrap_or_else(|| "∞".to_string());
            active.push(ActiveFilter {
                kind: "priceRange".to_string(),
                label: format!("Price: ${min} - ${max}"),
                value: format!("{min}-{max}"),
            });
        }

        active
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_decode_lists_and_scalars() {
        let params = FilterParams::decode(
            "?gender=men&color=red,dark-team-red&size=10&price=0-75&search=air+max&sort=price_asc&page=2&priceMin=10&priceMax=99.50",
        );
        assert_eq!(params.gender, strings(&["men"]));
        assert_eq!(params.color, strings(&["red", "dark-team-red"]));
        assert_eq!(params.size, strings(&["10"]));
        assert_eq!(params.price, strings(&["0-75"]));
        assert_eq!(params.search.as_deref(), Some("air max"));
        assert_eq!(params.sort.as_deref(), Some("price_asc"));
        assert_eq!(params.page, Some(2));
        assert_eq!(params.price_min, Some(Decimal::from(10)));
        assert_eq!(params.price_max, Some(Decimal::new(9950, 2)));
    }

    #[test]
    fn test_decode_empty_value_is_absent() {
        let params = FilterParams::decode("color=&size=,,&search=");
        assert_eq!(params.color, None);
        assert_eq!(params.size, None);
        assert_eq!(params.search, None);
        assert_eq!(params, FilterParams::default());
    }

    #[test]
    fn test_decode_repeated_keys_append_without_duplicates() {
        let params = FilterParams::decode("color=red&color=blue,red");
        assert_eq!(params.color, strings(&["red", "blue"]));
    }

    #[test]
    fn test_decode_ignores_unknown_keys_and_bad_numbers() {
        let params =
            FilterParams::decode("utm_source=mail&page=two&priceMin=cheap&priceMax=12..5&brand=nike");
        assert_eq!(params.page, None);
        assert_eq!(params.price_min, None);
        assert_eq!(params.price_max, None);
        assert_eq!(params.brand, strings(&["nike"]));
    }

    #[test]
    fn test_encode_sorts_keys_and_omits_absent() {
        let params = FilterParams {
            size: strings(&["10", "11"]),
            color: strings(&["red"]),
            search: Some(String::new()),
            page: Some(1),
            ..Default::default()
        };
        assert_eq!(params.encode(), "color=red&page=1&size=10,11");
        assert_eq!(FilterParams::default().encode(), "");
    }

    #[test]
    fn test_round_trip_of_decoded_values() {
        let queries = [
            "brand=nike&category=running,trail&search=pegasus+41%2C+red&sort=newest",
            "color=red%20white&gender=women&page=3&priceMax=150&priceMin=0.50",
            "price=0-75,150%2B&size=9.5",
            "",
        ];
        for query in queries {
            let decoded = FilterParams::decode(query);
            assert_eq!(FilterParams::decode(&decoded.encode()), decoded, "{query}");
        }
    }

    #[test]
    fn test_mutators_reset_page() {
        let params = FilterParams::decode("color=red&page=4&sort=newest");

        let added = params.add_filter(FilterDimension::Size, "10");
        assert_eq!(added.size, strings(&["10"]));
        assert_eq!(added.page, Some(1));

        let removed = params.remove_filter(FilterDimension::Color, "red");
        assert_eq!(removed.color, None);
        assert_eq!(removed.page, Some(1));

        let cleared = params.clear_filter(FilterDimension::Color);
        assert_eq!(cleared.color, None);
        assert_eq!(cleared.page, Some(1));

        let sorted = params.set_sort("price_desc");
        assert_eq!(sorted.sort.as_deref(), Some("price_desc"));
        assert_eq!(sorted.page, Some(1));

        // input left untouched
        assert_eq!(params.page, Some(4));
        assert_eq!(params.color, strings(&["red"]));
    }

    #[test]
    fn test_add_filter_skips_duplicates() {
        let params = FilterParams::decode("color=red");
        let again = params.add_filter(FilterDimension::Color, "red");
        assert_eq!(again.color, strings(&["red"]));
    }

    #[test]
    fn test_remove_filter_keeps_other_values() {
        let params = FilterParams::decode("color=red,blue");
        let next = params.remove_filter(FilterDimension::Color, "red");
        assert_eq!(next.color, strings(&["blue"]));
    }

    #[test]
    fn test_clear_all() {
        let cleared = FilterParams::clear_all();
        assert_eq!(cleared.encode(), "page=1");
        assert!(!cleared.has_active_filters());
    }

    #[test]
    fn test_sort_option_fallback() {
        assert_eq!(SortOption::from_key(Some("latest")), SortOption::Newest);
        assert_eq!(SortOption::from_key(Some("bogus")), SortOption::Featured);
        assert_eq!(SortOption::from_key(None).label(), "Featured");
        assert_eq!(SortOption::PriceAsc.label(), "Price: Low to High");
    }

    #[test]
    fn test_active_filters_labels() {
        let params = FilterParams::decode("search=pegasus&color=red&price=0-75&priceMin=20");
        let labels = params
            .active_filters()
            .into_iter()
            .map(|f| f.label)
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            vec![
                "Search: \"pegasus\"".to_string(),
                "Color: red".to_string(),
                "Price: $0-75".to_string(),
                "Price: $20 - $∞".to_string(),
            ]
        );
    }
}
