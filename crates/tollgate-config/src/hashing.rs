use std::env;

use crate::{ConfigError, parse_var};

pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashingConfig {
    pub cost: u32,
}

impl HashingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let cost = parse_var("BCRYPT_COST", env::var("BCRYPT_COST").ok())?
            .unwrap_or(DEFAULT_BCRYPT_COST);

        if !(4..=31).contains(&cost) {
            return Err(ConfigError::invalid("BCRYPT_COST", "must be within 4..=31"));
        }

        Ok(Self { cost })
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}
