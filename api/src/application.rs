pub mod cart_session;
pub mod http;
