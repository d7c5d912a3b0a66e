use std::sync::Arc;

use tollgate_auth::TokenService;
use tollgate_config::{ConfigError, CorsConfig, HashingConfig, JwtConfig, ServerConfig};
use tollgate_core::{HashingError, PasswordHasher};
use tollgate_db::{CourseStore, IdentityStore, OwnershipStore, ProjectStore};
use tollgate_observability::PrometheusHandle;

use crate::modules::auth::service::AuthService;
use crate::utils::auth_helpers::AccessGuard;

/// Everything read from the environment at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub hashing: HashingConfig,
    pub cors: CorsConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            hashing: HashingConfig::from_env()?,
            cors: CorsConfig::from_env(),
            server: ServerConfig::from_env()?,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub access: AccessGuard,
    pub courses: Arc<dyn CourseStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub cors_config: CorsConfig,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Wires every component to the one store handle.
    pub fn new<S>(config: &AppConfig, store: Arc<S>) -> Result<Self, HashingError>
    where
        S: IdentityStore + OwnershipStore + CourseStore + ProjectStore + 'static,
    {
        let identities: Arc<dyn IdentityStore> = store.clone();
        let ownership: Arc<dyn OwnershipStore> = store.clone();
        let courses: Arc<dyn CourseStore> = store.clone();
        let projects: Arc<dyn ProjectStore> = store;

        let hasher = PasswordHasher::new(config.hashing.cost)?;
        let tokens = TokenService::new(&config.jwt);

        Ok(Self {
            auth: Arc::new(AuthService::new(identities, hasher, tokens)?),
            access: AccessGuard::new(ownership),
            courses,
            projects,
            cors_config: config.cors.clone(),
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}
