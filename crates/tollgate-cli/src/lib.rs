//! # Tollgate CLI
//!
//! Administrative operations that are deliberately not reachable over HTTP.
//! The only one today is creating `ADMIN` identities, which signup refuses.

pub mod admin;

pub use admin::{CreateAdminError, create_admin};
