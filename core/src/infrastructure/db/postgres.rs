use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{error, info};

use crate::domain::common::DatabaseConfig;

#[derive(Clone)]
pub struct Postgres {
    db: DatabaseConnection,
}

impl Postgres {
    pub async fn new(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let mut options = ConnectOptions::new(config.url());
        options
            .max_connections(config.max_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let db = Database::connect(options).await.map_err(|e| {
            error!("Failed to connect to database {}: {}", config.name, e);
            e
        })?;

        if config.run_migrations {
            sqlx::migrate!("./migrations")
                .run(db.get_postgres_connection_pool())
                .await?;
            info!("database migrations applied");
        }

        Ok(Self { db })
    }

    pub fn get_db(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
