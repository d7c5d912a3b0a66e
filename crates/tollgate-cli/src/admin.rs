use thiserror::Error;

use tollgate_core::password::{HashingError, MAX_PASSWORD_BYTES, PasswordHasher};
use tollgate_db::{IdentityStore, StoreError};
use tollgate_models::{Identity, NewIdentity, Role};

#[derive(Debug, Error)]
pub enum CreateAdminError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error("an identity with this email already exists")]
    AlreadyExists,
    #[error(transparent)]
    Hashing(#[from] HashingError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CreateAdminError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => CreateAdminError::AlreadyExists,
            other => CreateAdminError::Store(other),
        }
    }
}

/// Creates an `ADMIN` identity through the same hashing and uniqueness rules as signup.
pub async fn create_admin(
    store: &dyn IdentityStore,
    hasher: PasswordHasher,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Identity, CreateAdminError> {
    let name = name.trim();
    let email = email.trim();

    if name.is_empty() {
        return Err(CreateAdminError::Invalid("name is required"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(CreateAdminError::Invalid("email must be a valid address"));
    }
    if password.is_empty() {
        return Err(CreateAdminError::Invalid("password is required"));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(CreateAdminError::Invalid("password must be at most 72 bytes"));
    }

    let password_hash = hasher.hash_async(password.to_string()).await?;

    let identity = store
        .create_identity(NewIdentity {
            email: email.to_string(),
            name: name.to_string(),
            role: Some(Role::Admin),
            password_hash,
        })
        .await?;

    Ok(identity)
}
