use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use tollgate_auth::SessionClaim;
use tollgate_core::AppError;

use crate::state::AppState;

fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Layer that verifies the bearer token and attaches the claim to the request.
///
/// Nothing is attached on failure; the request never reaches the handler.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claim = state
        .auth
        .authenticate(authorization_header(req.headers()))?;

    req.extensions_mut().insert(claim);
    Ok(next.run(req).await)
}

/// The verified session of the current request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionClaim);

impl AuthUser {
    pub fn claim(&self) -> &SessionClaim {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claim) = parts.extensions.get::<SessionClaim>() {
            return Ok(AuthUser(claim.clone()));
        }

        // Route not behind `require_auth`: verify here instead.
        let claim = state.auth.authenticate(authorization_header(&parts.headers))?;
        Ok(AuthUser(claim))
    }
}
