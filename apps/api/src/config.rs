//! API server configuration module.
//!
//! Configuration is layered with the `config` crate:
//!
//! ```text
//! defaults ──► tableside.toml (optional) ──► TABLESIDE_* environment variables
//!                                               (last one wins)
//! ```
//!
//! `TABLESIDE_PORT=8080` overrides `port`, `TABLESIDE_DATABASE_PATH` overrides
//! `database_path`, and so on.

use std::net::SocketAddr;

use config::{Config, Environment, File, Source};
use serde::{Deserialize, Serialize};

/// Base name of the optional configuration file (`tableside.toml`).
pub const CONFIG_FILE: &str = "tableside";

/// Prefix of the environment variables read at startup.
pub const ENV_PREFIX: &str = "TABLESIDE";

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Connection pool size
    pub database_max_connections: u32,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl ApiConfig {
    /// Load configuration from `tableside.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(File::with_name(CONFIG_FILE).required(false))
    }

    /// Load configuration with `file` layered between the defaults and the
    /// environment.
    pub fn from_source<S>(file: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3333)?
            .set_default("database_path", "./data/tableside.db")?
            .set_default("database_max_connections", 5)?
            .set_default("log_level", "info")?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ApiConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("port".to_string()));
        }
        if self.database_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "database_max_connections".to_string(),
            ));
        }
        if self.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("database_path".to_string()));
        }
        Ok(())
    }

    /// Address the server listens on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("host".to_string()))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<ApiConfig, ConfigError> {
        ApiConfig::from_source(File::from_str(toml, FileFormat::Toml))
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3333);
        assert_eq!(config.database_path, "./data/tableside.db");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.socket_addr().unwrap().port(), 3333);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = from_toml(
            r#"
            host = "127.0.0.1"
            port = 8080
            database_path = "/var/lib/tableside/pos.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.database_path, "/var/lib/tableside/pos.db");
        assert_eq!(config.database_max_connections, 5);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            from_toml("port = 0"),
            Err(ConfigError::InvalidValue(field)) if field == "port"
        ));
        assert!(matches!(
            from_toml("database_max_connections = 0"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(from_toml("port = \"many\""), Err(ConfigError::Source(_))));
        assert!(matches!(
            from_toml("database_path = \"  \""),
            Err(ConfigError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_bad_host() {
        let config = from_toml("host = \"not a host\"").unwrap();
        assert!(config.socket_addr().is_err());
    }
}
