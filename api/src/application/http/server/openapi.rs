use crate::application::http::{
    cart::router::CartApiDoc,
    catalog::router::CatalogApiDoc,
    health::{__path_health, HealthResponse},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API"
    ),
    paths(health),
    components(schemas(HealthResponse)),
    nest(
        (path = "/products", api = CatalogApiDoc),
        (path = "/cart", api = CartApiDoc),
    )
)]
pub struct ApiDoc;
