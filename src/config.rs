// src/config.rs
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub schema_bootstrap: bool,
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set for the postgres store")]
    MissingDatabaseUrl,
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match lookup("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STORE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        Ok(Self {
            backend,
            database_url,
            max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            schema_bootstrap: parse_var(&lookup, "SCHEMA_BOOTSTRAP", false)?,
            host: parse_var(&lookup, "HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parse_var(&lookup, "PORT", 3000)?,
        })
    }
}
