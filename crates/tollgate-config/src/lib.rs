//! # Tollgate Config
//!
//! Configuration loaded once at process start from environment variables:
//!
//! - [`jwt`]: token signing key and time-to-live
//! - [`hashing`]: password hashing cost factor
//! - [`cors`]: allowed CORS origins
//! - [`server`]: listen port
//!
//! Loaders return [`ConfigError`] instead of falling back to insecure defaults,
//! so a misconfigured deployment fails at startup.
//!
//! # Example
//!
//! ```ignore
//! use tollgate_config::{HashingConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let hashing_config = HashingConfig::from_env()?;
//! ```

pub mod cors;
pub mod hashing;
pub mod jwt;
pub mod server;

use thiserror::Error;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use hashing::HashingConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Reads an optional variable and parses it, treating an unparsable value as an error.
pub(crate) fn parse_var<T>(key: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    match raw {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::invalid(key, format!("cannot parse {value:?}"))),
    }
}
