//! # Tollgate Core
//!
//! Foundational types shared by every Tollgate crate:
//!
//! - [`errors`]: the HTTP boundary error with opaque rendering of server faults
//! - [`password`]: salted, cost-configurable password hashing (the credential store)
//!
//! # Example
//!
//! ```ignore
//! use tollgate_core::password::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(10)?;
//! let hash = hasher.hash("correct horse battery staple")?;
//! assert!(hasher.verify("correct horse battery staple", &hash)?);
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};
pub use password::{HashingError, PasswordHasher};
