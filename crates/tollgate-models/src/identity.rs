//! Identity (account) records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Coarse-grained permission category attached to an identity at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Instructor => "INSTRUCTOR",
            Role::Admin => "ADMIN",
        }
    }

    /// Roles a caller may pick for themselves at signup.
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, Role::Student | Role::Instructor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STUDENT" => Ok(Role::Student),
            "INSTRUCTOR" => Ok(Role::Instructor),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A registered account.
///
/// `password_hash` always holds bcrypt output and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Option<Role>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Insert payload for the identity store. The hash is produced before this is built.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub email: String,
    pub name: String,
    pub role: Option<Role>,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_screaming_case() {
        assert_eq!(serde_json::to_string(&Role::Instructor).unwrap(), r#""INSTRUCTOR""#);
        let role: Role = serde_json::from_str(r#""STUDENT""#).unwrap();
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn test_role_from_str_round_trips_display() {
        for role in [Role::Student, Role::Instructor, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("instructor".parse::<Role>().is_err());
    }

    #[test]
    fn test_admin_is_not_self_assignable() {
        assert!(Role::Student.is_self_assignable());
        assert!(Role::Instructor.is_self_assignable());
        assert!(!Role::Admin.is_self_assignable());
    }

    #[test]
    fn test_identity_never_serializes_hash() {
        let identity = Identity {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            name: "A".to_string(),
            role: Some(Role::Student),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&identity).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$"));
    }
}
