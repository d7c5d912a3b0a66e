use thiserror::Error;

use tollgate_auth::TokenError;
use tollgate_core::{AppError, HashingError};
use tollgate_db::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("email is already registered")]
    DuplicateEmail,
    /// Same variant for an unknown email and a wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("missing bearer credential")]
    MissingCredential,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Hashing(#[from] HashingError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(message) => AppError::unprocessable(message),
            AuthError::DuplicateEmail => {
                AppError::conflict("duplicate_email", "Email is already registered")
            }
            AuthError::InvalidCredentials => {
                AppError::unauthorized("invalid_credentials", "Invalid email or password")
            }
            AuthError::MissingCredential => AppError::unauthorized(
                "missing_credential",
                "Authorization header with a bearer token is required",
            ),
            AuthError::Token(e) => e.into(),
            AuthError::Hashing(e) => AppError::internal(e),
            AuthError::Store(e) => AppError::internal(e),
        }
    }
}
