pub mod catalogs;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use catalogs::{CatalogConfig, CatalogEntry};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub catalog: CatalogSourceConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_rate_limit: u64,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSourceConfig {
    /// YAML manifest listing the catalogs to serve
    pub config_path: PathBuf,
    /// Single CSV served as `default` when set, bypassing the manifest
    pub recipes_csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_request_body_size: usize,
    pub max_query_length: usize,
}

fn env_or<T: std::str::FromStr>(name: &str, default: &str) -> Result<T> {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {name} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env_or("PORT", "8080")?;
        let api_rate_limit = env_or("API_RATE_LIMIT", "100")?;
        let request_timeout_seconds = env_or("REQUEST_TIMEOUT_SECONDS", "10")?;

        let config_path = std::env::var("CATALOG_CONFIG_PATH")
            .unwrap_or_else(|_| "config/catalogs.yaml".to_string())
            .into();
        let recipes_csv = std::env::var("RECIPES_CSV").ok().map(PathBuf::from);

        let max_request_body_size = env_or("MAX_REQUEST_BODY_SIZE", "65536")?;
        let max_query_length = env_or("MAX_QUERY_LENGTH", "4096")?;

        Ok(Settings {
            server: ServerConfig {
                host,
                port,
                api_rate_limit,
                request_timeout_seconds,
            },
            catalog: CatalogSourceConfig {
                config_path,
                recipes_csv,
            },
            limits: LimitsConfig {
                max_request_body_size,
                max_query_length,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(Error::Config(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        if self.limits.max_query_length == 0 {
            return Err(Error::Config(
                "Maximum query length must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// The catalog manifest to load: a direct CSV wins over the YAML file
    pub fn catalog_config(&self) -> Result<CatalogConfig> {
        match &self.catalog.recipes_csv {
            Some(csv) => Ok(CatalogConfig::single("default", csv.clone())),
            None => CatalogConfig::from_file(&self.catalog.config_path),
        }
    }
}
