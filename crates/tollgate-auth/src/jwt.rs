//! Token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the process-wide key from [`JwtConfig`].
//! Expiry is checked here rather than by `jsonwebtoken` so the boundary is
//! exact: a token is expired once `now >= exp`, with no leeway. A token issued
//! with a zero TTL is therefore rejected by every later check.
//!
//! There is no revocation; a token stays valid until it expires.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use tollgate_config::JwtConfig;
use tollgate_config::jwt::MAX_TTL_SECONDS;
use tollgate_core::AppError;
use tollgate_models::Role;

use crate::claims::SessionClaim;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    BadSignature,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl TokenError {
    /// Short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Expired => "expired",
            TokenError::Malformed => "malformed",
            TokenError::BadSignature => "bad_signature",
            TokenError::Signing(_) => "signing",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::unauthorized("token_expired", "Token has expired"),
            // Malformed and forged tokens get the same answer.
            TokenError::Malformed | TokenError::BadSignature => {
                AppError::unauthorized("invalid_token", "Invalid token")
            }
            TokenError::Signing(_) => AppError::internal(err),
        }
    }
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            default_ttl: Duration::seconds(config.ttl_seconds.clamp(0, MAX_TTL_SECONDS)),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Signs a token for `identity_id` that expires `ttl` after issue.
    pub fn issue(
        &self,
        identity_id: Uuid,
        role: Option<Role>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let iat = Utc::now().timestamp();
        let claims = SessionClaim {
            sub: identity_id,
            role,
            iat,
            exp: iat + ttl.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Signs a token with the configured default TTL.
    pub fn issue_session(&self, identity_id: Uuid, role: Option<Role>) -> Result<String, TokenError> {
        self.issue(identity_id, role, self.default_ttl)
    }

    /// Checks signature and expiry and returns the embedded claim.
    pub fn verify(&self, token: &str) -> Result<SessionClaim, TokenError> {
        let claim = decode::<SessionClaim>(token, &self.decoding_key, &self.validation)?.claims;

        if Utc::now().timestamp() >= claim.exp {
            return Err(TokenError::Expired);
        }

        Ok(claim)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
