use reqwest::StatusCode;

use crate::domain::common::entities::app_errors::CoreError;

use super::wire::ErrorBody;

/// Turns a non-success response into the error shown to the user: the body's
/// `error` field, else its `message`, else the endpoint's own default.
pub(crate) fn error_for_status(status: StatusCode, body: &str, fallback: &str) -> CoreError {
    let parsed = ErrorBody::parse(body);
    let message = parsed
        .error
        .filter(|m| !m.trim().is_empty())
        .or(parsed.message.filter(|m| !m.trim().is_empty()))
        .unwrap_or_else(|| fallback.to_string());

    match status {
        StatusCode::NOT_FOUND => CoreError::NotFound(message),
        StatusCode::CONFLICT => CoreError::Conflict(message),
        _ => CoreError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
