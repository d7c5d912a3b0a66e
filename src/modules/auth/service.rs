//! Signup, login and bearer authentication.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use tollgate_auth::{SessionClaim, TokenService};
use tollgate_core::PasswordHasher;
use tollgate_core::password::MAX_PASSWORD_BYTES;
use tollgate_db::{IdentityStore, StoreError};
use tollgate_models::{LoginRequest, LoginResponse, NewIdentity, SignupRequest};
use tollgate_observability::{
    track_login_failure, track_login_success, track_signup, track_token_issued,
    track_token_rejected,
};

use super::error::AuthError;
use crate::validator::format_errors;

const BEARER_PREFIX: &str = "Bearer ";

/// Hashed once at startup; verified against when the email is unknown so that
/// both login failure paths do the same bcrypt work.
const DUMMY_PASSWORD: &str = "tollgate-timing-equalizer";

pub struct AuthService {
    identities: Arc<dyn IdentityStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Result<Self, tollgate_core::HashingError> {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD)?;
        Ok(Self {
            identities,
            hasher,
            tokens,
            dummy_hash,
        })
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Registers a new identity and returns its id.
    ///
    /// The email uniqueness check is the store's atomic insert; there is no
    /// prior lookup.
    #[instrument(skip(self, dto), fields(email = %dto.email.trim()))]
    pub async fn signup(&self, dto: SignupRequest) -> Result<Uuid, AuthError> {
        let dto = SignupRequest {
            email: dto.email.trim().to_string(),
            name: dto.name.trim().to_string(),
            ..dto
        };

        dto.validate()
            .map_err(|errors| AuthError::Validation(format_errors(&errors)))?;

        if dto.password.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::Validation(format!(
                "password must be at most {MAX_PASSWORD_BYTES} bytes"
            )));
        }
        if let Some(role) = dto.role {
            if !role.is_self_assignable() {
                return Err(AuthError::Validation(format!(
                    "role {role} cannot be chosen at signup"
                )));
            }
        }

        let password_hash = self.hasher.hash_async(dto.password).await?;

        let identity = self
            .identities
            .create_identity(NewIdentity {
                email: dto.email,
                name: dto.name,
                role: dto.role,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AuthError::DuplicateEmail,
                other => AuthError::Store(other),
            })?;

        let role = identity.role.map(|r| r.as_str()).unwrap_or("none");
        track_signup(role);
        info!(identity_id = %identity.id, role, "Identity created");

        Ok(identity.id)
    }

    #[instrument(skip(self, dto), fields(email = %dto.email.trim()))]
    pub async fn login(&self, dto: LoginRequest) -> Result<LoginResponse, AuthError> {
        dto.validate()
            .map_err(|errors| AuthError::Validation(format_errors(&errors)))?;

        let identity = self
            .identities
            .find_identity_by_email(dto.email.trim())
            .await?;

        let Some(identity) = identity else {
            // Result is discarded; only the work matters.
            let _ = self
                .hasher
                .verify_async(dto.password, self.dummy_hash.clone())
                .await?;
            track_login_failure("unknown_email");
            debug!("Login failed: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let valid = self
            .hasher
            .verify_async(dto.password, identity.password_hash.clone())
            .await?;

        if !valid {
            track_login_failure("wrong_password");
            debug!(identity_id = %identity.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue_session(identity.id, identity.role)?;
        track_token_issued();
        track_login_success();
        info!(identity_id = %identity.id, "Login succeeded");

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.default_ttl().num_seconds(),
        })
    }

    /// Resolves an `Authorization` header value into a verified claim.
    ///
    /// An absent header, one without the `Bearer ` scheme, or an empty token
    /// is [`AuthError::MissingCredential`]. A present token that fails
    /// verification is [`AuthError::Token`].
    pub fn authenticate(&self, raw: Option<&str>) -> Result<SessionClaim, AuthError> {
        let token = raw
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingCredential)?;

        self.tokens.verify(token).map_err(|e| {
            track_token_rejected(e.reason());
            warn!(reason = e.reason(), "Rejected bearer token");
            AuthError::Token(e)
        })
    }
}
