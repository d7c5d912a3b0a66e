use std::env;
use std::fmt;

use crate::{ConfigError, parse_var};

/// Default token lifetime: 24 hours.
pub const DEFAULT_TTL_SECONDS: i64 = 86_400;
/// Longest accepted token lifetime: one year.
pub const MAX_TTL_SECONDS: i64 = 365 * 86_400;
const MIN_SECRET_LEN: usize = 32;

/// Signing keys that have shipped as defaults or examples and must never sign real tokens.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "your-secret-key-change-in-production",
    "mysecretpassword",
    "secret",
    "changeme",
    "change-me",
    "jwt_secret",
];

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, ttl_seconds: i64) -> Result<Self, ConfigError> {
        let secret = secret.into();

        if secret.trim().is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }
        if PLACEHOLDER_SECRETS
            .iter()
            .any(|placeholder| placeholder.eq_ignore_ascii_case(secret.trim()))
        {
            return Err(ConfigError::invalid(
                "JWT_SECRET",
                "a known placeholder value cannot be used as signing key",
            ));
        }
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::invalid(
                "JWT_SECRET",
                format!("must be at least {MIN_SECRET_LEN} bytes"),
            ));
        }
        if ttl_seconds < 0 {
            return Err(ConfigError::invalid("JWT_TTL_SECONDS", "must not be negative"));
        }
        if ttl_seconds > MAX_TTL_SECONDS {
            return Err(ConfigError::invalid(
                "JWT_TTL_SECONDS",
                format!("must be at most {MAX_TTL_SECONDS}"),
            ));
        }

        Ok(Self {
            secret,
            ttl_seconds,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        let ttl_seconds = parse_var("JWT_TTL_SECONDS", env::var("JWT_TTL_SECONDS").ok())?
            .unwrap_or(DEFAULT_TTL_SECONDS);

        Self::new(secret, ttl_seconds)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_SECRET: &str = "a-properly-random-signing-key-of-48-characters!!";

    #[test]
    fn test_accepts_strong_secret() {
        let config = JwtConfig::new(GOOD_SECRET, 3600).unwrap();
        assert_eq!(config.ttl_seconds, 3600);
    }

    #[test]
    fn test_rejects_empty_secret() {
        assert_eq!(
            JwtConfig::new("   ", 3600).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
    }

    #[test]
    fn test_rejects_placeholder_secrets() {
        for placeholder in ["mysecretpassword", "your-secret-key-change-in-production", "SECRET"] {
            assert!(matches!(
                JwtConfig::new(placeholder, 3600),
                Err(ConfigError::Invalid { key: "JWT_SECRET", .. })
            ));
        }
    }

    #[test]
    fn test_rejects_short_secret() {
        assert!(JwtConfig::new("too-short", 3600).is_err());
    }

    #[test]
    fn test_rejects_negative_ttl() {
        assert!(matches!(
            JwtConfig::new(GOOD_SECRET, -1),
            Err(ConfigError::Invalid { key: "JWT_TTL_SECONDS", .. })
        ));
    }

    #[test]
    fn test_rejects_ttl_above_maximum() {
        assert!(JwtConfig::new(GOOD_SECRET, MAX_TTL_SECONDS).is_ok());
        for ttl in [MAX_TTL_SECONDS + 1, 10_000_000_000_000_000, i64::MAX] {
            assert!(matches!(
                JwtConfig::new(GOOD_SECRET, ttl),
                Err(ConfigError::Invalid { key: "JWT_TTL_SECONDS", .. })
            ));
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new(GOOD_SECRET, 60).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains(GOOD_SECRET));
        assert!(rendered.contains("<redacted>"));
    }
}
