use sea_orm::DatabaseConnection;

use crate::{
    domain::common::{StorefrontConfig, services::Service},
    infrastructure::{
        cart::memory::InMemoryCartStorage, catalog::repository::PostgresCatalogRepository,
        db::postgres::Postgres,
    },
};

pub type StorefrontService = Service<PostgresCatalogRepository, InMemoryCartStorage>;

pub async fn create_service(config: StorefrontConfig) -> Result<StorefrontService, anyhow::Error> {
    let postgres = Postgres::new(&config.database).await?;

    Ok(service_from_connection(postgres.get_db()))
}

/// Wires the service over an existing connection.
pub fn service_from_connection(db: DatabaseConnection) -> StorefrontService {
    Service::new(
        PostgresCatalogRepository::new(db),
        InMemoryCartStorage::new(),
    )
}
