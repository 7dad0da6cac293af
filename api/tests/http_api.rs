use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use storefront_api::{
    application::{
        cart_session::CART_SESSION_HEADER,
        http::server::{app_state::AppState, http_server::api_routes},
    },
    args::{Args, DatabaseArgs, LogArgs, ServerArgs},
};
use storefront_core::application::service_from_connection;
use test_context::{AsyncTestContext, test_context};

struct ApiContext {
    server: TestServer,
}

fn test_args() -> Args {
    Args {
        server: ServerArgs {
            host: "127.0.0.1".to_string(),
            port: 0,
            root_path: String::new(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        database: DatabaseArgs {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            name: "storefront".to_string(),
            max_connections: 1,
            run_migrations: false,
        },
        log: LogArgs {
            filter: "info".to_string(),
            json: false,
        },
    }
}

impl AsyncTestContext for ApiContext {
    async fn setup() -> Self {
        // No database behind the catalog: cart routes that never touch it still work.
        let service = service_from_connection(DatabaseConnection::Disconnected);
        let state = AppState::new(Arc::new(test_args()), service);
        let router = api_routes(state.clone()).with_state(state);

        ApiContext {
            server: TestServer::new(router).unwrap(),
        }
    }
}

fn session(value: &'static str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(CART_SESSION_HEADER),
        HeaderValue::from_static(value),
    )
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_health(ctx: &mut ApiContext) {
    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_cart_requires_session_header(ctx: &mut ApiContext) {
    let response = ctx.server.get("/cart").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "E_BAD_REQUEST");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_new_session_has_empty_cart(ctx: &mut ApiContext) {
    let (name, value) = session("guest-1");
    let response = ctx.server.get("/cart").add_header(name, value).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total_items"], 0);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_update_missing_item_is_not_found(ctx: &mut ApiContext) {
    // removing needs no catalog lookup, so the cart itself reports the miss
    let (name, value) = session("guest-2");
    let response = ctx
        .server
        .put("/cart/items/00000000-0000-0000-0000-000000000001")
        .add_header(name, value)
        .json(&json!({ "quantity": 0 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_add_item_rejects_zero_quantity(ctx: &mut ApiContext) {
    let (name, value) = session("guest-3");
    let response = ctx
        .server
        .post("/cart/items")
        .add_header(name, value)
        .json(&json!({
            "variant_id": "00000000-0000-0000-0000-000000000001",
            "quantity": 0,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_migrate_into_same_session_is_rejected(ctx: &mut ApiContext) {
    let (name, value) = session("user-1");
    let response = ctx
        .server
        .post("/cart/migrate")
        .add_header(name, value)
        .json(&json!({ "guest_session": "user-1" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_filter_action_resets_page(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/products/filters")
        .json(&json!({
            "query": "color=red&page=3",
            "action": { "type": "add", "dimension": "color", "value": "blue" },
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["query"], "color=red,blue&page=1");
    assert_eq!(body["href"], "/products?color=red,blue&page=1");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_raising_quantity_without_catalog_is_internal_error(ctx: &mut ApiContext) {
    let (name, value) = session("guest-4");
    let response = ctx
        .server
        .put("/cart/items/00000000-0000-0000-0000-000000000001")
        .add_header(name, value)
        .json(&json!({ "quantity": 2 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_listing_storage_failure_is_internal_error(ctx: &mut ApiContext) {
    let response = ctx.server.get("/products").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "E_INTERNAL_SERVER_ERROR");
    assert_eq!(body["message"], "failed to load");
}
