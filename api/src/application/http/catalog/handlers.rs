pub mod apply_filter_action;
pub mod get_collections;
pub mod get_featured_products;
pub mod get_filter_options;
pub mod get_product;
pub mod get_products;
