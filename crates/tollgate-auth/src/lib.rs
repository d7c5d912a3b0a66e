//! # Tollgate Auth
//!
//! The stateless half of the authentication core:
//!
//! - [`claims`]: [`SessionClaim`], the verified content of a bearer token
//! - [`jwt`]: [`TokenService`], which issues and verifies HS256 tokens
//! - [`access`]: pure ownership and role rules producing an [`AccessDecision`]
//!
//! Nothing here performs I/O. Store-backed authorization (which must look the
//! resource owner up first) lives with the HTTP layer and calls into [`access`].
//!
//! # Example
//!
//! ```ignore
//! use tollgate_auth::{TokenService, access};
//! use tollgate_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env()?);
//! let token = tokens.issue_session(user_id, Some(Role::Instructor))?;
//! let claim = tokens.verify(&token)?;
//! assert!(access::can_perform_role_action(&claim, Role::Instructor));
//! ```

pub mod access;
pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use access::AccessDecision;
pub use claims::SessionClaim;
pub use jwt::{TokenError, TokenService};
