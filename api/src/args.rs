use clap::Parser;
use storefront_core::domain::common::{DatabaseConfig, StorefrontConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "storefront-api", version, about = "Storefront catalog and cart API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/api`
    #[arg(long = "root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DatabaseArgs {
    #[arg(long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(long = "database-password", env = "DATABASE_PASSWORD", default_value = "postgres")]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "storefront")]
    pub name: String,

    #[arg(long = "database-max-connections", env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    #[arg(long = "run-migrations", env = "DATABASE_RUN_MIGRATIONS")]
    pub run_migrations: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    /// Emit JSON lines instead of human readable output
    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for StorefrontConfig {
    fn from(args: Args) -> Self {
        StorefrontConfig {
            database: DatabaseConfig {
                host: args.database.host,
                port: args.database.port,
                username: args.database.user,
                password: args.database.password,
                name: args.database.name,
                max_connections: args.database.max_connections,
                run_migrations: args.database.run_migrations,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_overrides() {
        let args = Args::parse_from([
            "storefront-api",
            "--server-port",
            "8080",
            "--allowed-origins",
            "http://a.test,http://b.test",
            "--run-migrations",
        ]);

        assert_eq!(args.server.port, 8080);
        assert_eq!(args.server.allowed_origins.len(), 2);

        let config = StorefrontConfig::from(args);
        assert!(config.database.run_migrations);
        assert!(config.database.url().starts_with("postgres://"));
    }
}
