//! # Tollgate DB
//!
//! The persistent-store boundary consumed by the auth core.
//!
//! - [`store`]: the [`IdentityStore`], [`OwnershipStore`], [`CourseStore`] and
//!   [`ProjectStore`] traits
//! - [`postgres`]: [`PgStore`], backed by SQLx and PostgreSQL
//! - [`memory`]: [`MemoryStore`], an in-process substitute for tests and local runs
//!
//! Lookups return `Ok(None)` for missing records; only backend faults are errors.
//! Uniqueness of identity emails is enforced by the store itself (a unique
//! index in Postgres, a single write lock in memory), never by a read followed
//! by a write in application code.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tollgate_db::{init_db_pool, PgStore};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let store = Arc::new(PgStore::new(pool));
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::{PgStore, init_db_pool};
pub use store::{CourseStore, IdentityStore, OwnershipStore, ProjectStore, StoreError};

// Re-export PgPool for convenience
pub use sqlx::PgPool;
