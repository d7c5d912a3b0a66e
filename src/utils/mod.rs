//! Shared helpers for the HTTP layer.
//!
//! - [`auth_helpers`]: the store-backed access guard used before every mutation

pub mod auth_helpers;
