//! Password hashing and verification.
//!
//! Wraps bcrypt with a fixed, configured cost factor. Plaintext and hashes are
//! never logged. bcrypt is CPU-bound for the duration set by the cost, so the
//! `*_async` variants move the work onto tokio's blocking pool.

use thiserror::Error;

/// Cost used when no explicit value is configured.
pub const DEFAULT_COST: u32 = 10;
/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;
/// bcrypt only reads the first 72 bytes of its input. Signup rejects longer
/// passwords and [`PasswordHasher::verify`] never matches one.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum HashingError {
    #[error("bcrypt cost {0} is outside {MIN_COST}..={MAX_COST}")]
    InvalidCost(u32),
    #[error("failed to hash password")]
    Hash(#[source] bcrypt::BcryptError),
    #[error("stored password hash is malformed")]
    MalformedHash(#[source] bcrypt::BcryptError),
    #[error("password hashing task did not complete")]
    Worker(#[from] tokio::task::JoinError),
}

/// Salted one-way password transform with a fixed work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, HashingError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(HashingError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes `plaintext` with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, HashingError> {
        bcrypt::hash(plaintext, self.cost).map_err(HashingError::Hash)
    }

    /// Checks `plaintext` against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; only a hash that cannot be parsed is an error.
    /// Plaintext over [`MAX_PASSWORD_BYTES`] is always a mismatch, since bcrypt
    /// would compare only its prefix.
    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, HashingError> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        bcrypt::verify(plaintext, hash).map_err(HashingError::MalformedHash)
    }

    pub async fn hash_async(&self, plaintext: String) -> Result<String, HashingError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext)).await?
    }

    pub async fn verify_async(&self, plaintext: String, hash: String) -> Result<bool, HashingError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash)).await?
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}
