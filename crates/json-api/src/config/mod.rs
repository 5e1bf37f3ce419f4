//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, observability::LoggingConfig, server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Coupons JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "coupons-json", about = "Coupons JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::{observability::LogFormat, *};

    #[test]
    fn parses_flags_over_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "coupons-json",
            "--port",
            "9000",
            "--database-url",
            "postgres://localhost/coupons",
            "--log-format",
            "json",
            "--run-migrations",
            "false",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
        assert!(matches!(config.logging.log_format, LogFormat::Json));
        assert_eq!(config.database.database_url, "postgres://localhost/coupons");
        assert!(!config.database.run_migrations);
        assert_eq!(config.server.shutdown_grace_seconds, 30);

        Ok(())
    }
}
