//! REST runtime configuration.
//!
//! Resolved once at process startup and handed to the router, so request handlers never read
//! process-wide environment variables.

use std::net::SocketAddr;

use orders_types::NonEmptyText;

pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_GREETING: &str = "Hello World!";

pub const REST_ADDR_ENV: &str = "ORDERS_REST_ADDR";
pub const GREETING_ENV: &str = "ORDERS_GREETING";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ORDERS_REST_ADDR is not a valid socket address ({value}): {source}")]
    InvalidAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("ORDERS_GREETING cannot be empty")]
    EmptyGreeting,
}

/// REST configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct RestConfig {
    addr: SocketAddr,
    greeting: NonEmptyText,
}

impl RestConfig {
    /// Build a config from raw (optional) environment values.
    ///
    /// Unset or whitespace-only values fall back to the defaults for the address; the greeting
    /// only falls back when unset.
    pub fn from_env_values(
        addr: Option<String>,
        greeting: Option<String>,
    ) -> Result<Self, ConfigError> {
        let addr = addr
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REST_ADDR.into());
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidAddr {
                value: addr.clone(),
                source,
            })?;

        let greeting = match greeting {
            Some(value) => NonEmptyText::try_from(value).map_err(|_| ConfigError::EmptyGreeting)?,
            None => NonEmptyText::new(DEFAULT_GREETING).map_err(|_| ConfigError::EmptyGreeting)?,
        };

        Ok(Self { addr, greeting })
    }

    /// Read [`REST_ADDR_ENV`] and [`GREETING_ENV`] from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_values(
            std::env::var(REST_ADDR_ENV).ok(),
            std::env::var(GREETING_ENV).ok(),
        )
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn greeting(&self) -> &str {
        self.greeting.as_str()
    }
}
