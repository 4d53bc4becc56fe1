//! Server configuration module

use clap::Parser;

use crate::config::{
    cache::CacheConfig, logging::LoggingConfig, server::ServerRuntimeConfig,
    session::SessionConfig, storage::StorageConfig,
};

pub(crate) mod cache;
pub(crate) mod logging;
pub(crate) mod server;
pub(crate) mod session;
pub(crate) mod storage;

/// Cartline JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "cartline-json", about = "Cartline JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Storage backend settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Catalog cache settings.
    #[command(flatten)]
    pub cache: CacheConfig,

    /// Session cookie settings.
    #[command(flatten)]
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
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

    use super::*;
    use crate::config::{logging::LogFormat, storage::StorageBackend};

    #[test]
    fn defaults_apply_without_arguments() -> TestResult {
        let config = ServerConfig::try_parse_from(["cartline-json", "--storage-backend", "memory"])?;

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.session.session_cookie_name, "cart_session");
        assert_eq!(config.cache.items_cache_ttl_seconds, 60);
        assert!(matches!(config.storage.storage_backend, StorageBackend::Memory));
        assert!(matches!(config.logging.log_format, LogFormat::Compact));

        Ok(())
    }

    #[test]
    fn arguments_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "cartline-json",
            "--port",
            "9000",
            "--storage-backend",
            "postgres",
            "--database-url",
            "postgres://localhost/cartline",
            "--log-format",
            "json",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
        assert_eq!(
            config.storage.database_url.as_deref(),
            Some("postgres://localhost/cartline")
        );
        assert!(matches!(config.logging.log_format, LogFormat::Json));

        Ok(())
    }
}
