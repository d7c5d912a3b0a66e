//! Claim structure carried inside session tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use tollgate_models::Role;

/// Decoded payload of a verified token.
///
/// Built fresh for each request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionClaim {
    /// Identity id (subject claim)
    pub sub: Uuid,
    /// Role at the time of issue, absent for identities without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds)
    pub exp: i64,
}

impl SessionClaim {
    pub fn identity_id(&self) -> Uuid {
        self.sub
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }
}
