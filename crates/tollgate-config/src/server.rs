use std::env;
use std::net::SocketAddr;

use crate::{ConfigError, parse_var};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_var("PORT", env::var("PORT").ok())?.unwrap_or(3000);
        Ok(Self { port })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
