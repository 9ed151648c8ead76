//! Server configuration read from the process environment.
//!
//! - `HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: listen port (default `5000`)
//! - `DATABASE_URL`: task store connection string, `memory:`, `file://<path>`
//!   or a bare path (default `~/.tasklist/tasks.json`)

use std::net::SocketAddr;

use tasklist_core::StoreLocation;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error("invalid listen address {host}:{port}")]
    InvalidAddress { host: String, port: u16 },

    #[error("invalid DATABASE_URL: {0}")]
    InvalidStore(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreLocation,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store: StoreLocation::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(value) if !value.trim().is_empty() => match value.trim().parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(value)),
            },
            _ => DEFAULT_PORT,
        };

        let store = match lookup("DATABASE_URL") {
            Some(value) => StoreLocation::parse(&value)
                .map_err(|error| ConfigError::InvalidStore(error.to_string()))?,
            None => StoreLocation::default(),
        };

        Ok(Self { host, port, store })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidAddress {
                host: self.host.clone(),
                port: self.port,
            })
    }
}
