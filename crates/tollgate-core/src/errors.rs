//! Application error type rendered at the HTTP boundary.
//!
//! Client errors (4xx) carry a user-facing message and a stable machine code.
//! Server errors (5xx) are logged with their full cause chain and rendered as
//! an opaque body so internal details never reach the client.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// JSON body returned for every rejected request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, code: &'static str, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            code,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", err)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "validation_error",
            anyhow::anyhow!(message.into()),
        )
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            anyhow::anyhow!(message.into()),
        )
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, code, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", anyhow::anyhow!(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", anyhow::anyhow!(message.into()))
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, code, anyhow::anyhow!(message.into()))
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Message as the client will see it.
    pub fn public_message(&self) -> String {
        if self.is_server_error() {
            INTERNAL_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {:#}", self.status, self.code, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(
                status = %self.status.as_u16(),
                code = self.code,
                error = ?self.error,
                "Request failed with server error"
            );
        }

        let body = Json(ErrorResponse {
            error: self.public_message(),
            code: self.code.to_string(),
        });

        (self.status, body).into_response()
    }
}

impl From<crate::password::HashingError> for AppError {
    fn from(err: crate::password::HashingError) -> Self {
        AppError::internal(err)
    }
}
