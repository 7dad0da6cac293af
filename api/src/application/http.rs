pub mod cart;
pub mod catalog;
pub mod health;
pub mod query_extractor;
pub mod server;
