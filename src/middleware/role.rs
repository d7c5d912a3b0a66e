use axum::{extract::FromRequestParts, http::request::Parts};

use tollgate_core::AppError;
use tollgate_models::Role;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Declares an extractor that yields the [`AuthUser`] only when its role is exactly `$role`.
macro_rules! require_role {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = AuthUser::from_request_parts(parts, state).await?;
                state.access.ensure_role(auth_user.claim(), $role)?;
                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireInstructor, Role::Instructor);
