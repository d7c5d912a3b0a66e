use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use tollgate_core::AppError;

/// Joins every field message into one sorted, comma-separated line.
pub(crate) fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

fn missing_field(body_text: &str) -> Option<&str> {
    body_text
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
}

fn unknown_field(body_text: &str) -> Option<&str> {
    body_text
        .split("unknown field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if let JsonRejection::MissingJsonContentType(_) = rejection {
        return AppError::bad_request("Missing 'Content-Type: application/json' header");
    }

    let body_text = rejection.body_text();
    if let Some(field) = missing_field(&body_text) {
        return AppError::bad_request(format!("{field} is required"));
    }
    if let Some(field) = unknown_field(&body_text) {
        return AppError::bad_request(format!("{field} cannot be set"));
    }

    match rejection {
        JsonRejection::JsonDataError(_) => AppError::bad_request("Invalid field type in request"),
        _ => AppError::bad_request("Invalid request body"),
    }
}

/// JSON body extractor that runs `validator` rules before the handler sees the value.
///
/// Unparsable bodies are 400; parsed bodies that break a rule are 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(format_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}
