//! Request authentication and role gating.
//!
//! - [`auth`]: the `require_auth` layer and the [`auth::AuthUser`] extractor
//! - [`role`]: extractors that additionally require a specific role
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_auth` verifies the token and stores the [`tollgate_auth::SessionClaim`]
//!    in the request extensions, or rejects with 401 before the handler runs
//! 3. Handlers read the claim through `AuthUser` (or a role extractor)
//!
//! A missing or non-bearer header is rejected with code `missing_credential`;
//! a bearer token that fails verification with `invalid_token` or
//! `token_expired`.

pub mod auth;
pub mod role;
